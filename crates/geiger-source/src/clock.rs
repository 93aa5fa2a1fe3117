//! Clock adapters for time operations.
//!
//! Provides [`SystemClock`] for live runs. See `MockClock` (in
//! `crate::mocks`) for a controllable test clock.

use std::time::Instant;

use geiger_types::BitWidth;

use crate::ClockSource;

/// Millisecond clock measured from construction, wrapping at its width.
///
/// A start offset places the clock anywhere in its range, so wraparound can
/// be exercised in a live run without waiting 49 days.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    started: Instant,
    offset_ms: u32,
    width: BitWidth,
}

impl SystemClock {
    /// Creates a 32-bit clock reading 0 now.
    #[must_use]
    pub fn new() -> Self {
        Self::with_offset(0, BitWidth::CLOCK)
    }

    /// Creates a clock of the given width reading `offset_ms` now.
    #[must_use]
    pub fn with_offset(offset_ms: u32, width: BitWidth) -> Self {
        Self {
            started: Instant::now(),
            offset_ms: width.mask(offset_ms),
            width,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockSource for SystemClock {
    fn now_ms(&self) -> u32 {
        let elapsed = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.width.wrapping_add(self.offset_ms, elapsed)
    }

    fn width(&self) -> BitWidth {
        self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_system_clock() {
        let clock = SystemClock::new();
        let t1 = clock.now_ms();
        std::thread::sleep(Duration::from_millis(10));
        let t2 = clock.now_ms();

        assert!(t2 >= t1 + 10);
    }

    #[test]
    fn test_offset_wraps() {
        let clock = SystemClock::with_offset(u32::MAX, BitWidth::CLOCK);
        std::thread::sleep(Duration::from_millis(5));
        assert!(clock.now_ms() < 1_000);
    }

    #[test]
    fn test_narrow_width_masks_offset() {
        let clock = SystemClock::with_offset(0x1_0005, BitWidth::new(16).unwrap());
        assert!(clock.now_ms() >= 5);
        assert!(clock.now_ms() < 0x1_0000);
    }
}
