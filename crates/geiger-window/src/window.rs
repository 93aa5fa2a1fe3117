//! Ring of time buckets covering the trailing window.

use geiger_types::{BitWidth, ConfigError, WindowConfig};

/// Fixed-size ring of pulse buckets advanced by elapsed clock time.
///
/// Exactly one bucket is current at any time. The cursor moves forward one
/// bucket per elapsed `ms_per_bucket`, zeroing each bucket it enters, and
/// wraps to index 0 after the last bucket.
#[derive(Debug, Clone)]
pub struct BucketWindow {
    buckets: Vec<u32>,
    cursor: usize,
    bucket_began_at_ms: Option<u32>,
    ms_per_bucket: u32,
    clock: BitWidth,
    completed_full_window: bool,
}

impl BucketWindow {
    /// Creates an empty window from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(config: &WindowConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(
            config.bucket_count,
            config.ms_per_bucket(),
            config.clock_width()?,
        ))
    }

    /// Builds a window from values already known to be valid.
    pub(crate) fn from_parts(bucket_count: usize, ms_per_bucket: u32, clock: BitWidth) -> Self {
        Self {
            buckets: vec![0; bucket_count],
            cursor: 0,
            bucket_began_at_ms: None,
            ms_per_bucket,
            clock,
            completed_full_window: false,
        }
    }

    /// Moves the window forward to `now_ms`, returning the buckets advanced.
    ///
    /// The first call only anchors the current bucket at `now_ms`. Later calls
    /// advance one bucket per whole `ms_per_bucket` elapsed since the current
    /// bucket began; partial progress is kept for the next call. The bucket
    /// start time moves by exact multiples of `ms_per_bucket` rather than
    /// snapping to `now_ms`, so sparse updates do not drift.
    pub fn advance(&mut self, now_ms: u32) -> u32 {
        let now_ms = self.clock.mask(now_ms);
        let Some(began) = self.bucket_began_at_ms else {
            self.bucket_began_at_ms = Some(now_ms);
            return 0;
        };

        let elapsed = self.clock.forward_distance(began, now_ms);
        let steps = elapsed / self.ms_per_bucket;
        if steps == 0 {
            return 0;
        }

        let len = self.buckets.len();
        if steps as usize >= len {
            // Stepping N or more times clears every bucket and always passes index 0
            self.buckets.fill(0);
            self.cursor = (self.cursor + steps as usize % len) % len;
            self.completed_full_window = true;
        } else {
            for _ in 0..steps {
                self.step();
            }
        }

        let moved = u64::from(steps) * u64::from(self.ms_per_bucket);
        self.bucket_began_at_ms = Some(self.clock.wrapping_add(began, moved));
        steps
    }

    /// Adds `pulses` to the current bucket.
    pub fn record(&mut self, pulses: u32) {
        let bucket = &mut self.buckets[self.cursor];
        *bucket = bucket.saturating_add(pulses);
    }

    /// Moves the cursor forward by one bucket and clears it.
    fn step(&mut self) {
        self.cursor += 1;
        if self.cursor == self.buckets.len() {
            self.cursor = 0;
            self.completed_full_window = true;
        }
        self.buckets[self.cursor] = 0;
    }

    /// Returns the bucket counts in ring order.
    #[must_use]
    pub fn buckets(&self) -> &[u32] {
        &self.buckets
    }

    /// Returns the index of the current bucket.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the clock time at which the current bucket began.
    #[must_use]
    pub const fn bucket_began_at_ms(&self) -> Option<u32> {
        self.bucket_began_at_ms
    }

    /// Returns the bucket duration in milliseconds.
    #[must_use]
    pub const fn ms_per_bucket(&self) -> u32 {
        self.ms_per_bucket
    }

    /// Returns true once the cursor has wrapped past the last bucket.
    #[must_use]
    pub const fn completed_full_window(&self) -> bool {
        self.completed_full_window
    }
}
