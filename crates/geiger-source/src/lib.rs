//! Counter and clock sources and the poll-cycle monitor for geiger.
//!
//! - [`CounterSource`] / [`ClockSource`] - Ports the estimator is fed from
//! - [`SystemClock`] - Wrapping millisecond clock backed by `Instant`
//! - [`SimulatedCounter`] - Constant-rate pulse generator with fault injection
//! - [`ReplaySource`] - Recorded poll cycles read from NDJSON
//! - [`Monitor`] - Drives one poll cycle, skipping failed reads

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/geiger/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod clock;
mod monitor;
mod ports;
mod replay;
mod simulated;

/// Controllable test doubles for the source ports.
///
/// Only available with the `test-helpers` feature or in test builds.
#[cfg(any(test, feature = "test-helpers"))]
pub mod mocks;

pub use clock::SystemClock;
pub use monitor::{Monitor, PollOutcome, PollStats};
pub use ports::{ClockSource, CounterSource};
pub use replay::{ReplayClock, ReplayCounter, ReplayError, ReplaySample, ReplaySource};
pub use simulated::SimulatedCounter;
