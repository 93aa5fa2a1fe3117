//! Core types for the geiger pulse rate estimator.
//!
//! This crate provides the fundamental data structures used throughout geiger:
//!
//! - [`BitWidth`] - Width of a wrapping unsigned value with modular distance
//! - [`WindowConfig`] - Sliding window configuration and derived constants
//! - [`RateSnapshot`] - Counts-per-minute estimate handed to presentation
//! - [`ReadFailure`] - Failed counter read reported by a counter source

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/geiger/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod snapshot;
mod width;

pub use config::{DEFAULT_BUCKET_COUNT, DEFAULT_WINDOW_MS, MS_PER_MINUTE, WindowConfig};
pub use error::{ConfigError, ReadFailure};
pub use snapshot::RateSnapshot;
pub use width::{BitWidth, clock_distance_32, counter_distance_24};
