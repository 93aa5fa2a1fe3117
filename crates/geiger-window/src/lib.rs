//! Sliding-window pulse rate estimator for geiger.
//!
//! This crate turns raw readings of a wrapping hardware counter, taken at
//! irregular times from a wrapping millisecond clock, into a counts-per-minute
//! estimate:
//!
//! - [`CounterDelta`] - Pulses since the previous reading, across counter wraps
//! - [`BucketWindow`] - Ring of time buckets covering the trailing window
//! - [`rate`] - Bucket totals and per-minute normalization
//! - [`RateEstimator`] - The update facade tying the pieces together

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/geiger/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod delta;
mod estimator;
pub mod rate;
mod window;

pub use delta::CounterDelta;
pub use estimator::{EstimatorPhase, RateEstimator};
pub use window::BucketWindow;
