#![allow(clippy::needless_doctest_main)]

//! # Pull-driven resumable producers building on cooperative suspend and resume
//! `lull` provides a single-threaded resumption primitive where a producer suspends after each
//! emitted value and runs again only when a consumer pulls the next one.
//!
//! ## Usage
//! Construct a [producer::Producer] over a step function, or wrap one directly through
//! [generator::lazy]/[generator::eager].
//!
//! ### Producer
//! * Each [producer::Producer::resume] runs the body one step, to its next yield point or
//!   completion.
//! * A [producer::Step::Fault] raised by the body is captured, never thrown across the resume.
//! * [producer::StartPolicy] selects whether the first step runs at construction or on first
//!   resume.
//!
//! ### Generator
//! * [generator::Generator] owns one producer and caches its most recent value, resuming only
//!   when the cache is stale.
//! * [generator::Generator::has_more] and [generator::Generator::next] share that fill logic, so
//!   repeated checks never advance the producer between pulls.
//! * Captured faults surface as [PullError::Fault] from the next consumer-facing call, once.
//!
//! ### Time
//! * [time::Alarm] polls whether a duration has passed, one clock sample per pull, without
//!   blocking.
//!
//! ## Example
//! ```rust
//! use lull::generator;
//! use lull::producer::Step;
//!
//! fn main() {
//!     let mut count = 0u64;
//!     let mut numbers = generator::lazy(move || -> Step<u64, &'static str> {
//!         count += 1;
//!         Step::Yield(count - 1)
//!     });
//!
//!     let mut sum = 0;
//!     while numbers.has_more().unwrap() && sum < 10 {
//!         sum += numbers.next().unwrap();
//!     }
//!     println!("sum: {}", sum);
//!     assert_eq!(sum, 10);
//! }
//! ```

mod error;
pub mod generator;
pub mod producer;
pub mod time;

pub use error::{PullError, ResumeError};
