//! Bucket totals and per-minute normalization.

use geiger_types::{MS_PER_MINUTE, RateSnapshot};

/// Sums every bucket in the window.
#[must_use]
pub fn total_counts(buckets: &[u32]) -> u64 {
    buckets.iter().map(|&count| u64::from(count)).sum()
}

/// Normalizes `total_counts` over `window_ms` to counts per minute.
///
/// Multiplies before dividing, so the result truncates exactly once.
/// Saturates at `u32::MAX` and returns 0 for an empty window duration.
#[must_use]
pub fn rate_per_minute(total_counts: u64, window_ms: u32) -> u32 {
    if window_ms == 0 {
        return 0;
    }
    let rate = u128::from(total_counts) * u128::from(MS_PER_MINUTE) / u128::from(window_ms);
    u32::try_from(rate).unwrap_or(u32::MAX)
}

/// Builds the snapshot for the current bucket contents.
#[must_use]
pub fn snapshot(buckets: &[u32], window_ms: u32, window_complete: bool) -> RateSnapshot {
    let total = total_counts(buckets);
    RateSnapshot::new(rate_per_minute(total, window_ms), window_complete, total)
}
