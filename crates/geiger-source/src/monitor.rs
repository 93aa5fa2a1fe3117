//! Poll-cycle driver.
//!
//! The monitor is the only code that talks to both the sources and the
//! estimator. A failed counter read ends the cycle before the clock is even
//! read, so the estimator never sees it.

use geiger_types::{RateSnapshot, ReadFailure};
use geiger_window::RateEstimator;
use serde::Serialize;
use tracing::warn;

use crate::{ClockSource, CounterSource};

/// Result of one poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The estimator was updated.
    Updated {
        /// The rate after the update.
        snapshot: RateSnapshot,
        /// Pulses counted since the previous successful read.
        pulses: u32,
    },
    /// The counter read failed and the cycle was skipped.
    Skipped(ReadFailure),
}

impl PollOutcome {
    /// Returns the snapshot if the cycle updated the estimator.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&RateSnapshot> {
        match self {
            Self::Updated { snapshot, .. } => Some(snapshot),
            Self::Skipped(_) => None,
        }
    }

    /// Returns true if the cycle was skipped.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

/// Counts of poll cycles by outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PollStats {
    /// Cycles that updated the estimator.
    pub updated: u64,
    /// Cycles skipped because the counter read failed.
    pub skipped: u64,
}

impl PollStats {
    /// Total cycles run.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.updated + self.skipped
    }
}

/// Drives poll cycles from a counter source and a clock source.
#[derive(Debug)]
pub struct Monitor<C, K> {
    counter: C,
    clock: K,
    stats: PollStats,
}

impl<C: CounterSource, K: ClockSource> Monitor<C, K> {
    /// Creates a monitor reading from `counter` and `clock`.
    pub fn new(counter: C, clock: K) -> Self {
        Self {
            counter,
            clock,
            stats: PollStats::default(),
        }
    }

    /// Runs one poll cycle against `estimator`.
    ///
    /// Reads the counter first; on failure the cycle is skipped and the
    /// estimator is left untouched. Otherwise reads the clock and updates.
    pub fn poll(&mut self, estimator: &mut RateEstimator) -> PollOutcome {
        let raw = match self.counter.read_counter() {
            Ok(raw) => raw,
            Err(failure) => {
                warn!(error = %failure, "counter read failed, skipping poll cycle");
                self.stats.skipped += 1;
                return PollOutcome::Skipped(failure);
            }
        };
        let now_ms = self.clock.now_ms();

        let snapshot = estimator.update(raw, now_ms);
        self.stats.updated += 1;

        PollOutcome::Updated {
            snapshot,
            pulses: estimator.last_pulses(),
        }
    }

    /// Returns the cycle counts so far.
    pub const fn stats(&self) -> PollStats {
        self.stats
    }

    /// Returns the counter source.
    pub const fn counter(&self) -> &C {
        &self.counter
    }

    /// Returns the clock source.
    pub const fn clock(&self) -> &K {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockClock, ScriptedCounter};

    #[test]
    fn test_poll_updates() {
        let clock = MockClock::new(0);
        let counter = ScriptedCounter::new([Ok(100), Ok(112)]);
        let mut monitor = Monitor::new(counter, clock.clone());
        let mut estimator = RateEstimator::default();

        let first = monitor.poll(&mut estimator);
        assert_eq!(
            first,
            PollOutcome::Updated {
                snapshot: RateSnapshot::new(0, false, 0),
                pulses: 0,
            }
        );

        clock.advance(600);
        match monitor.poll(&mut estimator) {
            PollOutcome::Updated { snapshot, pulses } => {
                assert_eq!(pulses, 12);
                assert_eq!(snapshot.window_counts, 12);
            }
            PollOutcome::Skipped(failure) => panic!("unexpected skip: {failure}"),
        }
        assert_eq!(monitor.stats(), PollStats { updated: 2, skipped: 0 });
    }

    #[test]
    fn test_failed_read_is_skipped() {
        let clock = MockClock::new(0);
        let counter = ScriptedCounter::new([
            Ok(100),
            Err(ReadFailure::Timeout { waited_ms: 50 }),
            Ok(130),
        ]);
        let mut monitor = Monitor::new(counter, clock.clone());
        let mut estimator = RateEstimator::default();

        monitor.poll(&mut estimator);
        let before = estimator.clone();

        clock.advance(600);
        let outcome = monitor.poll(&mut estimator);
        assert!(outcome.is_skipped());
        assert!(outcome.snapshot().is_none());
        assert_eq!(estimator.previous_counter(), before.previous_counter());
        assert_eq!(estimator.buckets(), before.buckets());
        assert_eq!(estimator.last_snapshot(), before.last_snapshot());

        clock.advance(600);
        let outcome = monitor.poll(&mut estimator);
        assert_eq!(outcome.snapshot().unwrap().window_counts, 30);
        assert_eq!(
            outcome,
            PollOutcome::Updated {
                snapshot: *outcome.snapshot().unwrap(),
                pulses: 30,
            }
        );
        assert_eq!(monitor.stats().total(), 3);
        assert_eq!(monitor.stats().skipped, 1);
    }

    #[test]
    fn test_pulses_across_counter_wrap() {
        let clock = MockClock::new(0);
        let counter = ScriptedCounter::new([Ok(0xFF_FFFE), Ok(2)]);
        let mut monitor = Monitor::new(counter, clock.clone());
        let mut estimator = RateEstimator::default();

        monitor.poll(&mut estimator);
        clock.advance(100);
        match monitor.poll(&mut estimator) {
            PollOutcome::Updated { pulses, .. } => assert_eq!(pulses, 4),
            PollOutcome::Skipped(failure) => panic!("unexpected skip: {failure}"),
        }
    }
}
