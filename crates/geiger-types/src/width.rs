//! Wrapping unsigned widths and modular forward distance.
//!
//! Both the hardware pulse counter and the millisecond clock are free-running
//! unsigned values that restart at zero after their maximum. Distances between
//! two readings are always computed forward, modulo the width, assuming the
//! value wrapped at most once between the two readings.

use crate::ConfigError;

/// Largest value of a 24-bit hardware counter.
const COUNTER_24_MAX: u32 = 0x00FF_FFFF;

/// Width in bits of a wrapping unsigned value, in `1..=32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitWidth(u8);

impl BitWidth {
    /// Default hardware counter width.
    pub const COUNTER: Self = Self(24);

    /// Default millisecond clock width.
    pub const CLOCK: Self = Self(32);

    /// Creates a width of `bits` bits.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBitWidth`] if `bits` is not in `1..=32`.
    pub const fn new(bits: u8) -> Result<Self, ConfigError> {
        if bits == 0 || bits > 32 {
            return Err(ConfigError::InvalidBitWidth { bits });
        }
        Ok(Self(bits))
    }

    /// Returns the number of bits.
    #[must_use]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Returns the largest representable value, `2^bits - 1`.
    #[must_use]
    pub const fn max(&self) -> u32 {
        u32::MAX >> (32 - self.0 as u32)
    }

    /// Returns the number of distinct values, `2^bits`.
    #[must_use]
    pub const fn modulus(&self) -> u64 {
        1u64 << self.0
    }

    /// Truncates `value` to this width.
    #[must_use]
    pub const fn mask(&self, value: u32) -> u32 {
        value & self.max()
    }

    /// Returns the forward distance from `previous` to `current`.
    ///
    /// If `current < previous` the value is assumed to have wrapped exactly
    /// once, giving `(max - previous) + current + 1`. A value that wrapped more
    /// than once between readings cannot be told apart from a short distance
    /// and is silently undercounted.
    #[must_use]
    pub const fn forward_distance(&self, previous: u32, current: u32) -> u32 {
        let previous = self.mask(previous);
        let current = self.mask(current);
        if current >= previous {
            current - previous
        } else {
            (self.max() - previous) + current + 1
        }
    }

    /// Adds `by` to `value`, wrapping modulo `2^bits`.
    #[must_use]
    pub const fn wrapping_add(&self, value: u32, by: u64) -> u32 {
        let modulus = self.modulus();
        ((self.mask(value) as u64 + by % modulus) % modulus) as u32
    }
}

impl std::fmt::Display for BitWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-bit", self.0)
    }
}

/// Pulses between two readings of a 24-bit hardware counter.
#[must_use]
pub const fn counter_distance_24(previous: u32, current: u32) -> u32 {
    let previous = previous & COUNTER_24_MAX;
    let current = current & COUNTER_24_MAX;
    if current >= previous {
        current - previous
    } else {
        (COUNTER_24_MAX - previous) + current + 1
    }
}

/// Milliseconds between two readings of a 32-bit millisecond clock.
#[must_use]
pub const fn clock_distance_32(previous: u32, current: u32) -> u32 {
    if current >= previous {
        current - previous
    } else {
        (u32::MAX - previous) + current + 1
    }
}
