//! Fill-on-demand wrappers owning one resumable producer.

use ignore_result::Ignore;
use static_assertions::assert_not_impl_any;

use crate::error::PullError;
use crate::producer::{Producer, StartPolicy, Step};

/// Generator owns a [Producer] and caches its most recent value.
///
/// The producer is resumed only when the cache is stale, so repeated
/// non-consuming checks never advance it more than once between pulls. A
/// fault captured during a resume surfaces from the same consumer-facing
/// call, exactly once.
///
/// Generator is the sole owner of its producer. Duplicating a suspended
/// computation is not well-defined, so it is not clonable; moving it to a
/// new owner is fine. Dropping it releases the producer without resuming
/// it, completed or not.
pub struct Generator<T: 'static, E: 'static> {
    producer: Producer<T, E>,
    fresh: bool,
}

assert_not_impl_any!(Generator<(), ()>: Send);

impl<T, E> Generator<T, E> {
    /// Wraps a producer.
    ///
    /// The cache starts fresh iff an eager start left a value pending.
    pub fn new(producer: Producer<T, E>) -> Generator<T, E> {
        let fresh = producer.value().is_some();
        Generator { producer, fresh }
    }

    /// Checks whether another value can be pulled, resuming the producer if
    /// the cache is stale.
    ///
    /// This is the sole non-consuming call that may advance the producer.
    ///
    /// # Errors
    /// Surfaces a fault captured by the resume this check triggered.
    pub fn has_more(&mut self) -> Result<bool, PullError<E>> {
        self.fill()?;
        Ok(!self.producer.is_completed())
    }

    /// Pulls the next value, resuming the producer at most once, and marks
    /// the cache stale so the following pull resumes again.
    ///
    /// # Errors
    /// * [PullError::Fault] on a fault captured by the producer; reported
    ///   once, the following pull proceeds from the suspension point.
    /// * [PullError::Completed] on pull past completion.
    pub fn next(&mut self) -> Result<T, PullError<E>> {
        self.fill()?;
        match self.producer.take_value() {
            Some(value) => {
                self.fresh = false;
                Ok(value)
            },
            None => Err(PullError::Completed),
        }
    }

    fn fill(&mut self) -> Result<(), PullError<E>> {
        if self.fresh {
            return Ok(());
        }
        // An eager start may have parked a fault before the first pull.
        if let Some(fault) = self.producer.take_fault() {
            return Err(PullError::Fault(fault));
        }
        if !self.producer.is_completed() {
            self.producer.resume().ignore();
            if let Some(fault) = self.producer.take_fault() {
                // Cache stays stale so the following pull resumes again.
                return Err(PullError::Fault(fault));
            }
        }
        self.fresh = true;
        Ok(())
    }
}

impl<T, E> IntoIterator for Generator<T, E> {
    type IntoIter = IntoIter<T, E>;
    type Item = Result<T, PullError<E>>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { generator: self }
    }
}

/// An iterator that owns its source generator.
///
/// Faults are yielded as `Err` items; iteration ends at completion.
pub struct IntoIter<T: 'static, E: 'static> {
    generator: Generator<T, E>,
}

impl<T, E> std::iter::Iterator for IntoIter<T, E> {
    type Item = Result<T, PullError<E>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.generator.has_more() {
            Ok(true) => Some(self.generator.next()),
            Ok(false) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

/// Constructs a generator whose first step runs on first pull.
pub fn lazy<T, E, F>(f: F) -> Generator<T, E>
where
    F: FnMut() -> Step<T, E> + 'static,
{
    Generator::new(Producer::new(f, StartPolicy::Lazy))
}

/// Constructs a generator whose first step runs before construction
/// returns, leaving its value cached for the first pull.
pub fn eager<T, E, F>(f: F) -> Generator<T, E>
where
    F: FnMut() -> Step<T, E> + 'static,
{
    Generator::new(Producer::new(f, StartPolicy::Eager))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use ignore_result::Ignore;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;
    use crate::generator;

    fn counter() -> Generator<u64, &'static str> {
        let mut count = 0;
        generator::lazy(move || {
            count += 1;
            Step::Yield(count - 1)
        })
    }

    fn countdown(mut remaining: u64) -> Generator<u64, &'static str> {
        generator::lazy(move || {
            if remaining == 0 {
                return Step::Complete;
            }
            remaining -= 1;
            Step::Yield(remaining)
        })
    }

    #[test_case(1)]
    #[test_case(2)]
    #[test_case(17)]
    fn counter_in_order(n: u64) {
        let mut counter = counter();
        for expected in 0..n {
            assert_eq!(counter.next().unwrap(), expected);
        }
    }

    #[test]
    fn counter_in_order_random_length() {
        let n = fastrand::u64(1..1000);
        let mut counter = counter();
        for expected in 0..n {
            assert_eq!(counter.next().unwrap(), expected);
        }
    }

    #[test]
    fn has_more_fills_once() {
        let resumes = Rc::new(Cell::new(0));
        let counted = resumes.clone();
        let mut count = 0;
        let mut counter: Generator<u64, &str> = generator::lazy(move || {
            counted.set(counted.get() + 1);
            count += 1;
            Step::Yield(count - 1)
        });

        assert_eq!(counter.has_more().unwrap(), true);
        assert_eq!(counter.has_more().unwrap(), true);
        assert_eq!(counter.has_more().unwrap(), true);
        assert_eq!(resumes.get(), 1);

        assert_eq!(counter.next().unwrap(), 0);
        assert_eq!(resumes.get(), 1);

        assert_eq!(counter.next().unwrap(), 1);
        assert_eq!(resumes.get(), 2);
    }

    #[test]
    fn fault_surfaces_once() {
        let mut pulls = 0;
        let mut generator: Generator<u64, &str> = generator::lazy(move || {
            pulls += 1;
            match pulls {
                2 => Step::Fault("flaky"),
                n => Step::Yield(n),
            }
        });

        assert_eq!(generator.next().unwrap(), 1);
        assert_eq!(generator.next().unwrap_err(), PullError::Fault("flaky"));
        assert_eq!(generator.next().unwrap(), 3);
    }

    #[test]
    fn fault_surfaces_from_has_more() {
        let mut generator: Generator<u64, &str> = generator::lazy(|| Step::Fault("broken"));
        assert_eq!(generator.has_more().unwrap_err(), PullError::Fault("broken"));
        assert_eq!(generator.has_more().unwrap_err(), PullError::Fault("broken"));
    }

    #[test]
    fn eager_fault_deferred_to_first_pull() {
        let mut generator: Generator<u64, &str> = generator::eager(|| Step::Fault("broken"));
        assert_eq!(generator.next().unwrap_err(), PullError::Fault("broken"));
    }

    #[test]
    fn eager_value_cached_for_first_pull() {
        let mut count = 0;
        let mut counter: Generator<u64, &str> = generator::eager(move || {
            count += 1;
            Step::Yield(count - 1)
        });
        assert_eq!(counter.next().unwrap(), 0);
        assert_eq!(counter.next().unwrap(), 1);
    }

    #[test]
    fn completion_reported() {
        let mut countdown = countdown(2);
        assert_eq!(countdown.has_more().unwrap(), true);
        assert_eq!(countdown.next().unwrap(), 1);
        assert_eq!(countdown.next().unwrap(), 0);
        assert_eq!(countdown.has_more().unwrap(), false);
        assert_eq!(countdown.next().unwrap_err(), PullError::Completed);
        assert_eq!(countdown.next().unwrap_err(), PullError::Completed);
    }

    #[test]
    fn completed_producer_not_resumed_again() {
        let resumes = Rc::new(Cell::new(0));
        let counted = resumes.clone();
        let mut generator: Generator<u64, &str> = generator::lazy(move || {
            counted.set(counted.get() + 1);
            Step::Complete
        });
        assert_eq!(generator.has_more().unwrap(), false);
        assert_eq!(generator.has_more().unwrap(), false);
        generator.next().ignore();
        assert_eq!(resumes.get(), 1);
    }

    #[test]
    fn into_iter() {
        let drained: Vec<u64> = countdown(3).into_iter().map(Result::unwrap).collect();
        assert_eq!(drained, vec![2, 1, 0]);
    }

    #[test]
    fn into_iter_infinite() {
        let heads: Vec<u64> = counter().into_iter().take(4).map(Result::unwrap).collect();
        assert_eq!(heads, vec![0, 1, 2, 3]);
    }

    #[test]
    fn drop_before_completion() {
        let dropped = Rc::new(Cell::new(false));
        let flag = scopeguard::guard(dropped.clone(), |flag| flag.set(true));
        let mut generator: Generator<u64, &str> = generator::lazy(move || {
            let _flag = &flag;
            Step::Yield(1)
        });
        generator.next().ignore();
        drop(generator);
        assert_eq!(dropped.get(), true);
    }

    #[test]
    fn drop_after_completion() {
        let mut countdown = countdown(1);
        assert_eq!(countdown.next().unwrap(), 0);
        assert_eq!(countdown.has_more().unwrap(), false);
        drop(countdown);
    }
}
