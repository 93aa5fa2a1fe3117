//! Rate snapshot handed to the presentation layer.

use serde::{Deserialize, Serialize};

/// Counts-per-minute estimate produced by one estimator update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RateSnapshot {
    /// Pulses in the window, normalized to one minute.
    pub rate_per_minute: u32,
    /// True once a full window of history has been observed.
    ///
    /// While false the rate undercounts and should be presented as an
    /// in-progress count rather than a calibrated rate.
    pub window_complete: bool,
    /// Raw sum of all bucket counts.
    pub window_counts: u64,
}

impl RateSnapshot {
    /// Creates a new snapshot.
    #[must_use]
    pub const fn new(rate_per_minute: u32, window_complete: bool, window_counts: u64) -> Self {
        Self {
            rate_per_minute,
            window_complete,
            window_counts,
        }
    }
}

impl std::fmt::Display for RateSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.window_complete {
            write!(f, "{} CPM", self.rate_per_minute)
        } else {
            write!(f, "{} counts (warming)", self.window_counts)
        }
    }
}
