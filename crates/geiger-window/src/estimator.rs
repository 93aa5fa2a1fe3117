//! Rate estimator facade.

use geiger_types::{BitWidth, ConfigError, RateSnapshot, WindowConfig};
use tracing::{debug, info};

use crate::{BucketWindow, CounterDelta, rate};

/// Lifecycle of the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EstimatorPhase {
    /// No update has been made yet.
    Uninitialized,
    /// Updates are flowing but less than a full window has been observed.
    Warming,
    /// A full window has been observed; the rate is a true trailing average.
    SteadyState,
}

impl EstimatorPhase {
    /// Returns the phase as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Warming => "warming",
            Self::SteadyState => "steady",
        }
    }
}

impl std::fmt::Display for EstimatorPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sliding-window counts-per-minute estimator.
///
/// Feed it one raw counter reading and the current clock time per poll cycle.
/// Failed counter reads must be skipped by the caller; `update` only accepts
/// successfully read values.
///
/// # Example
///
/// ```
/// use geiger_types::WindowConfig;
/// use geiger_window::{EstimatorPhase, RateEstimator};
///
/// let mut estimator = RateEstimator::new(WindowConfig::default()).unwrap();
/// estimator.update(0, 0);
///
/// let mut snapshot = Default::default();
/// for i in 1..=100u32 {
///     snapshot = estimator.update(i * 10, i * 600);
/// }
///
/// assert!(snapshot.window_complete);
/// assert_eq!(snapshot.rate_per_minute, 1000);
/// assert_eq!(estimator.phase(), EstimatorPhase::SteadyState);
/// ```
#[derive(Debug, Clone)]
pub struct RateEstimator {
    config: WindowConfig,
    counter: CounterDelta,
    window: BucketWindow,
    last_pulses: u32,
    last_snapshot: Option<RateSnapshot>,
}

impl RateEstimator {
    /// Creates an estimator with all buckets empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(config: WindowConfig) -> Result<Self, ConfigError> {
        let window = BucketWindow::new(&config)?;
        Ok(Self {
            config,
            counter: CounterDelta::new(config.counter_width()?),
            window,
            last_pulses: 0,
            last_snapshot: None,
        })
    }

    /// Records one poll cycle and returns the updated rate.
    ///
    /// Resolves the pulses since the previous reading, advances the bucket
    /// ring to `now_ms`, adds the pulses to the current bucket and aggregates.
    pub fn update(&mut self, raw_counter: u32, now_ms: u32) -> RateSnapshot {
        let pulses = self.counter.resolve(raw_counter);
        self.last_pulses = pulses;

        let was_complete = self.window.completed_full_window();
        let advanced = self.window.advance(now_ms);
        if advanced > 0 {
            debug!(
                advanced,
                cursor = self.window.cursor(),
                "advanced rate window"
            );
        }
        if !was_complete && self.window.completed_full_window() {
            info!(
                window_ms = self.config.window_ms,
                "full window observed, rate is now steady"
            );
        }

        self.window.record(pulses);

        let snapshot = rate::snapshot(
            self.window.buckets(),
            self.config.window_ms,
            self.window.completed_full_window(),
        );
        self.last_snapshot = Some(snapshot);
        snapshot
    }

    /// Returns the snapshot computed by the most recent update.
    #[must_use]
    pub const fn last_snapshot(&self) -> Option<RateSnapshot> {
        self.last_snapshot
    }

    /// Returns the pulses resolved by the most recent update.
    ///
    /// The first update establishes the baseline and resolves 0.
    #[must_use]
    pub const fn last_pulses(&self) -> u32 {
        self.last_pulses
    }

    /// Returns the current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> EstimatorPhase {
        if !self.counter.has_seen_first_sample() {
            EstimatorPhase::Uninitialized
        } else if self.window.completed_full_window() {
            EstimatorPhase::SteadyState
        } else {
            EstimatorPhase::Warming
        }
    }

    /// Returns the configuration the estimator was built with.
    #[must_use]
    pub const fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Returns the bucket counts in ring order.
    #[must_use]
    pub fn buckets(&self) -> &[u32] {
        self.window.buckets()
    }

    /// Returns the index of the bucket currently being written.
    #[must_use]
    pub const fn current_bucket_index(&self) -> usize {
        self.window.cursor()
    }

    /// Returns the last counter reading, if any.
    #[must_use]
    pub const fn previous_counter(&self) -> Option<u32> {
        self.counter.previous()
    }
}

impl Default for RateEstimator {
    fn default() -> Self {
        let config = WindowConfig::default();
        Self {
            config,
            counter: CounterDelta::default(),
            window: BucketWindow::from_parts(
                config.bucket_count,
                config.ms_per_bucket(),
                BitWidth::CLOCK,
            ),
            last_pulses: 0,
            last_snapshot: None,
        }
    }
}
