use std::fmt;

use static_assertions::assert_impl_all;

use crate::producer::ExecState;

/// Error for pulls through a generator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PullError<E> {
    /// Fault captured from the producer body, reported once.
    Fault(E),
    /// Pull on a producer that already completed.
    Completed,
}

impl<E: fmt::Display> fmt::Display for PullError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PullError::Fault(fault) => write!(f, "producer fault: {}", fault),
            PullError::Completed => f.write_str("pull on completed producer"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for PullError<E> {}

/// Error for resuming a producer in a state that cannot run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ResumeError {
    state: ExecState,
}

assert_impl_all!(ResumeError: Send);

impl ResumeError {
    pub(crate) fn new(state: ExecState) -> ResumeError {
        ResumeError { state }
    }

    /// State the producer was in when the resume was refused.
    pub fn state(&self) -> ExecState {
        self.state
    }
}

impl fmt::Display for ResumeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "resume on {} producer", self.state)
    }
}

impl std::error::Error for ResumeError {}
