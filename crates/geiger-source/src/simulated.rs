//! Constant-rate simulated pulse counter.

use geiger_types::{BitWidth, ReadFailure};

use crate::{ClockSource, CounterSource};

/// Simulated hardware counter producing pulses at a fixed rate.
///
/// Pulses are derived from the total time observed on the clock, so
/// fractional pulses carry over between reads and long runs stay exact.
#[derive(Debug, Clone)]
pub struct SimulatedCounter<K> {
    clock: K,
    width: BitWidth,
    rate_millihertz: u64,
    start_value: u32,
    last_ms: Option<u32>,
    elapsed_ms: u64,
    fail_every: u64,
    timeout_ms: u32,
    reads: u64,
}

impl<K: ClockSource> SimulatedCounter<K> {
    /// Creates a 24-bit counter pulsing at `rate_hz`, timed by `clock`.
    #[must_use]
    pub fn new(clock: K, rate_hz: f64) -> Self {
        let rate_millihertz = if rate_hz.is_finite() && rate_hz > 0.0 {
            (rate_hz * 1_000.0).round() as u64
        } else {
            0
        };
        Self {
            clock,
            width: BitWidth::COUNTER,
            rate_millihertz,
            start_value: 0,
            last_ms: None,
            elapsed_ms: 0,
            fail_every: 0,
            timeout_ms: 50,
            reads: 0,
        }
    }

    /// Sets the counter width.
    #[must_use]
    pub fn with_width(mut self, width: BitWidth) -> Self {
        self.width = width;
        self
    }

    /// Starts the counter at `value` instead of 0.
    #[must_use]
    pub fn with_start_value(mut self, value: u32) -> Self {
        self.start_value = value;
        self
    }

    /// Fails every `n`th read with a timeout. 0 disables failures.
    #[must_use]
    pub fn with_fail_every(mut self, n: u64) -> Self {
        self.fail_every = n;
        self
    }

    /// Sets the wait reported by injected timeouts.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Total pulses generated so far.
    #[must_use]
    pub const fn pulses(&self) -> u64 {
        (self.elapsed_ms as u128 * self.rate_millihertz as u128 / 1_000_000) as u64
    }

    /// Number of reads attempted, including failed ones.
    #[must_use]
    pub const fn reads(&self) -> u64 {
        self.reads
    }

    fn observe_clock(&mut self) {
        let now = self.clock.now_ms();
        if let Some(last) = self.last_ms {
            self.elapsed_ms += u64::from(self.clock.width().forward_distance(last, now));
        }
        self.last_ms = Some(now);
    }
}

impl<K: ClockSource> CounterSource for SimulatedCounter<K> {
    fn read_counter(&mut self) -> Result<u32, ReadFailure> {
        // The hardware keeps counting whether or not the read succeeds
        self.observe_clock();
        self.reads += 1;

        if self.fail_every > 0 && self.reads % self.fail_every == 0 {
            return Err(ReadFailure::Timeout {
                waited_ms: self.timeout_ms,
            });
        }

        Ok(self.width.wrapping_add(self.start_value, self.pulses()))
    }
}
