//! Resumable producers paused between emitted values.

use derive_where::derive_where;
use static_assertions::assert_not_impl_any;
use strum::Display;

use crate::error::ResumeError;

/// Execution state of a [Producer].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ExecState {
    /// Constructed but never run.
    NotStarted,
    /// Paused at a yield point, able to run again.
    Suspended,
    /// Ran to its end; no further values.
    Completed,
}

/// Outcome of one run of a producer body.
pub enum Step<T, E> {
    /// Emits one value and suspends.
    Yield(T),
    /// Ends the computation.
    Complete,
    /// Records an error and suspends; the producer stays resumable.
    Fault(E),
}

/// Selects when the first step of a producer body runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StartPolicy {
    /// First step runs on first [Producer::resume].
    Lazy,
    /// First step runs before construction returns.
    Eager,
}

/// Producer drives a computation that pauses after each emitted value.
///
/// Each [Producer::resume] runs the body one step and stores its outcome:
/// a yielded value, a captured fault or completion. Storage and control are
/// separate so one bookkeeping serves both generic value streams and
/// specialized gates.
#[derive_where(Debug; T, E)]
pub struct Producer<T: 'static, E: 'static> {
    state: ExecState,
    value: Option<T>,
    fault: Option<E>,
    #[derive_where(skip)]
    f: Box<dyn FnMut() -> Step<T, E>>,
}

assert_not_impl_any!(Producer<(), ()>: Send);

impl<T, E> Producer<T, E> {
    /// Constructs a producer over a step function.
    ///
    /// With [StartPolicy::Eager] the first step runs here; a fault it raises
    /// is captured for later pickup, not propagated.
    pub fn new<F>(f: F, policy: StartPolicy) -> Producer<T, E>
    where
        F: FnMut() -> Step<T, E> + 'static,
    {
        let mut producer = Producer { state: ExecState::NotStarted, value: None, fault: None, f: Box::new(f) };
        if policy == StartPolicy::Eager {
            producer.step();
        }
        producer
    }

    fn step(&mut self) {
        match (self.f)() {
            Step::Yield(value) => {
                self.value = Some(value);
                self.state = ExecState::Suspended;
            },
            Step::Complete => {
                self.value = None;
                self.state = ExecState::Completed;
            },
            Step::Fault(fault) => {
                self.fault = Some(fault);
                self.state = ExecState::Suspended;
            },
        }
    }

    /// Advances the computation to its next yield point or completion.
    ///
    /// A fault raised by the body is captured and the producer marked
    /// suspended-with-error; it never propagates from here. Pick it up with
    /// [Producer::take_fault].
    ///
    /// # Errors
    /// Fails on a completed producer.
    pub fn resume(&mut self) -> Result<(), ResumeError> {
        if self.state == ExecState::Completed {
            return Err(ResumeError::new(self.state));
        }
        self.step();
        Ok(())
    }

    /// Most recently emitted value, if one is pending.
    ///
    /// Empty before the first resume and after completion.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Moves the pending value out of its slot.
    pub fn take_value(&mut self) -> Option<T> {
        self.value.take()
    }

    /// Moves the captured fault out, clearing it so it is reported once.
    pub fn take_fault(&mut self) -> Option<E> {
        self.fault.take()
    }

    pub fn state(&self) -> ExecState {
        self.state
    }

    /// Checks whether the computation has no further values.
    pub fn is_completed(&self) -> bool {
        self.state == ExecState::Completed
    }
}
