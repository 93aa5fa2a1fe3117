//! Sliding window configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{BitWidth, ConfigError};

/// Milliseconds in one minute, the unit of the reported rate.
pub const MS_PER_MINUTE: u64 = 60_000;

/// Default trailing window duration.
pub const DEFAULT_WINDOW_MS: u32 = 60_000;

/// Default number of buckets in the window.
pub const DEFAULT_BUCKET_COUNT: usize = 100;

/// Configuration of the sliding window, fixed for the estimator's lifetime.
///
/// Every field is optional when deserializing; missing fields take their
/// defaults:
///
/// ```
/// use geiger_types::WindowConfig;
///
/// let config: WindowConfig = serde_json::from_str(r#"{"bucket_count": 60}"#).unwrap();
/// assert_eq!(config.bucket_count, 60);
/// assert_eq!(config.window_ms, 60_000);
/// assert_eq!(config.ms_per_bucket(), 1_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Trailing window duration in milliseconds.
    pub window_ms: u32,
    /// Number of buckets the window is split into.
    pub bucket_count: usize,
    /// Width of the hardware pulse counter in bits.
    pub counter_bits: u8,
    /// Width of the millisecond clock in bits.
    pub clock_bits: u8,
}

impl WindowConfig {
    /// Creates a configuration with the given window and bucket count, using
    /// the default 24-bit counter and 32-bit clock.
    #[must_use]
    pub const fn new(window_ms: u32, bucket_count: usize) -> Self {
        Self {
            window_ms,
            bucket_count,
            counter_bits: BitWidth::COUNTER.bits(),
            clock_bits: BitWidth::CLOCK.bits(),
        }
    }

    /// Sets the counter width.
    #[must_use]
    pub const fn with_counter_bits(mut self, bits: u8) -> Self {
        self.counter_bits = bits;
        self
    }

    /// Sets the clock width.
    #[must_use]
    pub const fn with_clock_bits(mut self, bits: u8) -> Self {
        self.clock_bits = bits;
        self
    }

    /// Checks that the configuration describes a usable window.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no buckets, if a bucket would be shorter
    /// than one millisecond, or if either width is outside `1..=32`. The clock
    /// must also not wrap within one window, since elapsed time is resolved
    /// across at most one wrap.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bucket_count == 0 {
            return Err(ConfigError::NoBuckets);
        }
        if (self.window_ms as usize) < self.bucket_count {
            return Err(ConfigError::WindowTooShort {
                window_ms: self.window_ms,
                bucket_count: self.bucket_count,
            });
        }
        BitWidth::new(self.counter_bits)?;
        let clock = BitWidth::new(self.clock_bits)?;
        if u64::from(self.window_ms) >= clock.modulus() {
            return Err(ConfigError::ClockTooNarrow {
                clock_bits: self.clock_bits,
                window_ms: self.window_ms,
            });
        }
        Ok(())
    }

    /// Duration of one bucket, truncated to whole milliseconds.
    ///
    /// Returns 0 for a configuration that fails [`validate`](Self::validate).
    #[must_use]
    pub fn ms_per_bucket(&self) -> u32 {
        u32::try_from(self.bucket_count)
            .ok()
            .and_then(|count| self.window_ms.checked_div(count))
            .unwrap_or(0)
    }

    /// Width of the hardware counter.
    ///
    /// # Errors
    ///
    /// Returns an error if `counter_bits` is outside `1..=32`.
    pub const fn counter_width(&self) -> Result<BitWidth, ConfigError> {
        BitWidth::new(self.counter_bits)
    }

    /// Width of the millisecond clock.
    ///
    /// # Errors
    ///
    /// Returns an error if `clock_bits` is outside `1..=32`.
    pub const fn clock_width(&self) -> Result<BitWidth, ConfigError> {
        BitWidth::new(self.clock_bits)
    }

    /// Longest poll interval that keeps counter deltas exact at `max_rate_hz`.
    ///
    /// Polling any slower lets the counter wrap more than once between two
    /// reads at that pulse rate, which undercounts without any way to detect
    /// it. For the default 24-bit counter at 1 MHz this is about 16.7 s.
    ///
    /// Returns `None` when `max_rate_hz` is 0 or the counter width is invalid.
    #[must_use]
    pub fn max_safe_poll_interval(&self, max_rate_hz: u32) -> Option<Duration> {
        if max_rate_hz == 0 {
            return None;
        }
        let width = self.counter_width().ok()?;
        let nanos = u128::from(width.modulus()) * 1_000_000_000 / u128::from(max_rate_hz);
        Some(Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX)))
    }

    /// Time until the millisecond clock wraps back to zero.
    ///
    /// Returns `None` when the clock width is invalid.
    #[must_use]
    pub fn clock_wrap_period(&self) -> Option<Duration> {
        let width = self.clock_width().ok()?;
        Some(Duration::from_millis(width.modulus()))
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_MS, DEFAULT_BUCKET_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WindowConfig::default();
        assert_eq!(config.window_ms, 60_000);
        assert_eq!(config.bucket_count, 100);
        assert_eq!(config.ms_per_bucket(), 600);
        assert_eq!(config.counter_width().unwrap(), BitWidth::COUNTER);
        assert_eq!(config.clock_width().unwrap(), BitWidth::CLOCK);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_configs() {
        assert_eq!(
            WindowConfig::new(60_000, 0).validate(),
            Err(ConfigError::NoBuckets)
        );
        assert_eq!(
            WindowConfig::new(50, 100).validate(),
            Err(ConfigError::WindowTooShort {
                window_ms: 50,
                bucket_count: 100,
            })
        );
        assert_eq!(
            WindowConfig::default().with_counter_bits(0).validate(),
            Err(ConfigError::InvalidBitWidth { bits: 0 })
        );
        assert_eq!(
            WindowConfig::default().with_clock_bits(64).validate(),
            Err(ConfigError::InvalidBitWidth { bits: 64 })
        );
    }

    #[test]
    fn test_validate_rejects_clock_wrapping_within_window() {
        // 256 ms clock, 600 ms buckets: the window could never advance
        assert_eq!(
            WindowConfig::default().with_clock_bits(8).validate(),
            Err(ConfigError::ClockTooNarrow {
                clock_bits: 8,
                window_ms: 60_000,
            })
        );
        // 65 536 ms clock still covers a 60 s window
        assert!(WindowConfig::default().with_clock_bits(16).validate().is_ok());
        assert!(
            WindowConfig::new(65_536, 100)
                .with_clock_bits(16)
                .validate()
                .is_err()
        );
        assert!(WindowConfig::new(200, 10).with_clock_bits(8).validate().is_ok());
    }

    #[test]
    fn test_ms_per_bucket_truncates() {
        assert_eq!(WindowConfig::new(1_000, 3).ms_per_bucket(), 333);
        assert_eq!(WindowConfig::new(1_000, 0).ms_per_bucket(), 0);
    }

    #[test]
    fn test_max_safe_poll_interval() {
        let config = WindowConfig::default();
        let interval = config.max_safe_poll_interval(1_000_000).unwrap();
        assert_eq!(interval, Duration::from_micros(16_777_216));
        assert!(config.max_safe_poll_interval(0).is_none());
    }

    #[test]
    fn test_clock_wrap_period() {
        let config = WindowConfig::default().with_clock_bits(16);
        assert_eq!(config.clock_wrap_period(), Some(Duration::from_millis(65_536)));
    }

    #[test]
    fn test_partial_json() {
        let config: WindowConfig = serde_json::from_str(r#"{"window_ms": 30000}"#).unwrap();
        assert_eq!(config.window_ms, 30_000);
        assert_eq!(config.bucket_count, DEFAULT_BUCKET_COUNT);
        assert_eq!(config.counter_bits, 24);
    }
}
