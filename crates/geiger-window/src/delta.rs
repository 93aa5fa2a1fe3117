//! Pulse delta resolution across counter wraparound.

use geiger_types::BitWidth;
use tracing::trace;

/// Tracks the previous counter reading and resolves pulse deltas.
#[derive(Debug, Clone)]
pub struct CounterDelta {
    width: BitWidth,
    previous: Option<u32>,
}

impl CounterDelta {
    /// Creates a resolver for a counter of the given width.
    #[must_use]
    pub const fn new(width: BitWidth) -> Self {
        Self {
            width,
            previous: None,
        }
    }

    /// Returns the pulses observed since the previous reading.
    ///
    /// The first reading only establishes the baseline and yields 0. Every
    /// reading, including the first, becomes the new baseline. At most one
    /// wrap between readings is assumed; see [`BitWidth::forward_distance`].
    pub fn resolve(&mut self, current: u32) -> u32 {
        let current = self.width.mask(current);
        let delta = match self.previous {
            Some(previous) => self.width.forward_distance(previous, current),
            None => 0,
        };
        trace!(previous = ?self.previous, current, delta, "resolved counter delta");
        self.previous = Some(current);
        delta
    }

    /// Returns the stored baseline, if any reading has been seen.
    #[must_use]
    pub const fn previous(&self) -> Option<u32> {
        self.previous
    }

    /// Returns true once the first reading has been recorded.
    #[must_use]
    pub const fn has_seen_first_sample(&self) -> bool {
        self.previous.is_some()
    }

    /// Returns the counter width.
    #[must_use]
    pub const fn width(&self) -> BitWidth {
        self.width
    }
}

impl Default for CounterDelta {
    fn default() -> Self {
        Self::new(BitWidth::COUNTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_is_baseline() {
        let mut delta = CounterDelta::default();
        assert!(!delta.has_seen_first_sample());
        assert_eq!(delta.resolve(0x12_3456), 0);
        assert_eq!(delta.previous(), Some(0x12_3456));
        assert!(delta.has_seen_first_sample());
    }

    #[test]
    fn test_forward_delta() {
        let mut delta = CounterDelta::default();
        delta.resolve(100);
        assert_eq!(delta.resolve(130), 30);
        assert_eq!(delta.resolve(130), 0);
        assert_eq!(delta.previous(), Some(130));
    }

    #[test]
    fn test_wrapped_delta() {
        let mut delta = CounterDelta::default();
        delta.resolve(0xFF_FFFE);
        assert_eq!(delta.resolve(2), 4);
        assert_eq!(delta.previous(), Some(2));
    }

    #[test]
    fn test_double_wrap_undercounts() {
        let mut delta = CounterDelta::new(BitWidth::new(8).unwrap());
        delta.resolve(10);
        // 256 + 256 + 5 pulses really happened
        assert_eq!(delta.resolve(15), 5);
    }

    #[test]
    fn test_out_of_range_reading_is_masked() {
        let mut delta = CounterDelta::default();
        delta.resolve(0x0100_0005);
        assert_eq!(delta.previous(), Some(5));
    }
}
