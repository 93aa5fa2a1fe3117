//! Workload generators for the estimator benchmarks.

use geiger_lib::WindowConfig;

/// One poll cycle: raw counter reading and clock time.
pub type Sample = (u32, u32);

/// Polls once per bucket with `pulses` new counts each time.
///
/// Starts just below both wrap points so every run crosses them.
pub fn steady_samples(config: &WindowConfig, updates: u32, pulses: u32) -> Vec<Sample> {
    let step = config.ms_per_bucket();
    let mut counter = 0x00FF_FF00u32;
    let mut now = u32::MAX - 10 * step;
    (0..updates)
        .map(|_| {
            counter = counter.wrapping_add(pulses) & 0x00FF_FFFF;
            now = now.wrapping_add(step);
            (counter, now)
        })
        .collect()
}

/// Polls with gaps of ten windows, so every update clears the whole ring.
pub fn sparse_samples(config: &WindowConfig, updates: u32) -> Vec<Sample> {
    let gap = config.window_ms.wrapping_mul(10);
    let mut now = 0u32;
    (0..updates)
        .map(|i| {
            now = now.wrapping_add(gap);
            (i, now)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steady_samples_wrap() {
        let samples = steady_samples(&WindowConfig::default(), 200, 17);
        assert_eq!(samples.len(), 200);
        assert!(samples.windows(2).any(|pair| pair[1].0 < pair[0].0));
        assert!(samples.windows(2).any(|pair| pair[1].1 < pair[0].1));
    }

    #[test]
    fn test_sparse_samples_gap() {
        let samples = sparse_samples(&WindowConfig::default(), 3);
        assert_eq!(samples, vec![(0, 600_000), (1, 1_200_000), (2, 1_800_000)]);
    }
}
