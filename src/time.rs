//! Elapsed-time gates polled through the pull protocol.

use std::convert::Infallible;
use std::time::{Duration, Instant};

use static_assertions::assert_not_impl_any;

use crate::error::PullError;
use crate::generator::{self, Generator};
use crate::producer::Step;

/// Alarm reports whether a fixed duration has passed since it was armed.
///
/// A polling primitive, not a blocking wait: each pull resumes a producer
/// that samples a monotonic clock and recomputes the lapsed flag against
/// the armed threshold. The caller observes time passing by pulling
/// repeatedly; once lapsed the flag never reverts.
pub struct Alarm {
    lapses: Generator<bool, Infallible>,
}

assert_not_impl_any!(Alarm: Send);

impl Alarm {
    /// Arms an alarm lapsing `duration` from now.
    ///
    /// Zero duration lapses on the very first pull. The start instant and
    /// threshold are fixed here; pulls only re-sample the clock.
    pub fn after(duration: Duration) -> Alarm {
        let start = Instant::now();
        let lapses = generator::lazy(move || Step::Yield(start.elapsed() >= duration));
        Alarm { lapses }
    }

    /// Pulls the lapsed flag, sampling the clock at most once per call.
    pub fn lapsed(&mut self) -> bool {
        match self.lapses.next() {
            Ok(lapsed) => lapsed,
            Err(PullError::Fault(fault)) => match fault {},
            Err(PullError::Completed) => unreachable!("alarm producer completed"),
        }
    }
}
