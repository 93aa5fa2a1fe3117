//! Ports the estimator is fed from.
//!
//! Adapters in this crate (and test doubles in [`crate::mocks`]) implement
//! these traits; the monitor only depends on the traits.

use geiger_types::{BitWidth, ReadFailure};

/// Source of raw hardware counter readings.
pub trait CounterSource {
    /// Reads the latest raw counter value.
    ///
    /// # Errors
    ///
    /// Returns a [`ReadFailure`] when the hardware did not answer. The caller
    /// must skip the poll cycle; this port never retries on its own.
    fn read_counter(&mut self) -> Result<u32, ReadFailure>;
}

/// Source of free-running milliseconds, wrapping at the clock width.
pub trait ClockSource {
    /// Returns the current time in milliseconds.
    fn now_ms(&self) -> u32;

    /// Width at which the clock wraps back to zero.
    fn width(&self) -> BitWidth {
        BitWidth::CLOCK
    }
}

impl<T: CounterSource + ?Sized> CounterSource for &mut T {
    fn read_counter(&mut self) -> Result<u32, ReadFailure> {
        (**self).read_counter()
    }
}

impl<T: ClockSource + ?Sized> ClockSource for &T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }

    fn width(&self) -> BitWidth {
        (**self).width()
    }
}
