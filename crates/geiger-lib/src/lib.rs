//! Sliding-window pulse rate estimation for wrapping hardware counters.
//!
//! This is a facade crate that re-exports functionality from the geiger
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```
//! use geiger_lib::prelude::*;
//!
//! let clock = SystemClock::new();
//! let counter = SimulatedCounter::new(clock, 50.0);
//! let mut monitor = Monitor::new(counter, clock);
//! let mut estimator = RateEstimator::new(WindowConfig::default()).unwrap();
//!
//! match monitor.poll(&mut estimator) {
//!     PollOutcome::Updated { snapshot, .. } => println!("{snapshot}"),
//!     PollOutcome::Skipped(failure) => eprintln!("skipped: {failure}"),
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/geiger/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use geiger_types::*;

// Re-export the estimator
pub use geiger_window::{BucketWindow, CounterDelta, EstimatorPhase, RateEstimator, rate};

// Re-export sources
#[cfg(feature = "source")]
pub use geiger_source::{
    ClockSource, CounterSource, Monitor, PollOutcome, PollStats, ReplayClock, ReplayCounter,
    ReplayError, ReplaySample, ReplaySource, SimulatedCounter, SystemClock,
};

#[cfg(feature = "test-helpers")]
pub use geiger_source::mocks;

/// Prelude module for convenient imports.
///
/// ```
/// use geiger_lib::prelude::*;
/// ```
pub mod prelude {
    pub use geiger_types::{BitWidth, ConfigError, RateSnapshot, ReadFailure, WindowConfig};

    pub use geiger_window::{EstimatorPhase, RateEstimator};

    #[cfg(feature = "source")]
    pub use geiger_source::{
        ClockSource, CounterSource, Monitor, PollOutcome, PollStats, ReplaySource,
        SimulatedCounter, SystemClock,
    };
}
