//! Error types for geiger.

use thiserror::Error;

/// Error for an invalid sliding window configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The window must contain at least one bucket.
    #[error("Bucket count must be at least 1")]
    NoBuckets,

    /// The window is shorter than one millisecond per bucket.
    #[error("Window of {window_ms} ms is too short for {bucket_count} buckets")]
    WindowTooShort {
        /// Configured window duration in milliseconds.
        window_ms: u32,
        /// Configured number of buckets.
        bucket_count: usize,
    },

    /// The clock wraps within one window, so elapsed time cannot be resolved.
    #[error("A {clock_bits}-bit clock wraps before a {window_ms} ms window elapses")]
    ClockTooNarrow {
        /// Configured clock width.
        clock_bits: u8,
        /// Configured window duration in milliseconds.
        window_ms: u32,
    },

    /// Wrapping widths are limited to 1..=32 bits.
    #[error("Invalid bit width: {bits} (expected 1..=32)")]
    InvalidBitWidth {
        /// The rejected width.
        bits: u8,
    },
}

/// A counter read that did not produce a value.
///
/// The cycle that produced it must be skipped: the reading is never fed into
/// the estimator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadFailure {
    /// The hardware did not answer in time.
    #[error("Counter read timed out after {waited_ms} ms")]
    Timeout {
        /// How long the source waited for a response.
        waited_ms: u32,
    },

    /// Any other bus or device failure.
    #[error("Counter bus error: {0}")]
    Bus(String),
}
