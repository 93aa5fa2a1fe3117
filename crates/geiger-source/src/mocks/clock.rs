//! Mock clock for testing.

use std::sync::{Arc, Mutex};

use crate::ClockSource;

/// Mock millisecond clock for testing.
///
/// Allows tests to control time progression explicitly, including across the
/// 32-bit wrap.
///
/// # Examples
///
/// ```
/// use geiger_source::ClockSource;
/// use geiger_source::mocks::MockClock;
///
/// let clock = MockClock::new(u32::MAX - 9);
/// clock.advance(20);
/// assert_eq!(clock.now_ms(), 10);
///
/// clock.set(600);
/// assert_eq!(clock.now_ms(), 600);
/// ```
///
/// All clones share the same underlying time value, so a counter simulator
/// holding one clone sees time advanced through another.
#[derive(Debug, Clone)]
pub struct MockClock {
    current_ms: Arc<Mutex<u32>>,
}

impl MockClock {
    /// Create a mock clock starting at `start_ms`.
    pub fn new(start_ms: u32) -> Self {
        Self {
            current_ms: Arc::new(Mutex::new(start_ms)),
        }
    }

    /// Advance the clock by `ms`, wrapping at 32 bits.
    pub fn advance(&self, ms: u32) {
        let mut time = self
            .current_ms
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock");
        *time = time.wrapping_add(ms);
    }

    /// Set the clock to a specific time.
    pub fn set(&self, ms: u32) {
        let mut time = self
            .current_ms
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock");
        *time = ms;
    }
}

impl ClockSource for MockClock {
    fn now_ms(&self) -> u32 {
        *self
            .current_ms
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock")
    }
}
