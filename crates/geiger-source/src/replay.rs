//! Recorded poll cycles replayed from newline-delimited JSON.
//!
//! Each non-empty line describes one poll cycle, either a successful read:
//!
//! ```json
//! {"now_ms": 600, "counter": 10}
//! ```
//!
//! or a failed one:
//!
//! ```json
//! {"now_ms": 1200, "error": "timeout"}
//! ```

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use geiger_types::ReadFailure;
use serde::Deserialize;
use thiserror::Error;

use crate::{ClockSource, CounterSource};

/// Errors that can occur while loading a replay file.
#[derive(Error, Debug)]
pub enum ReplayError {
    /// Failed to open or read the file.
    #[error("Failed to read replay file '{path}': {source}")]
    Read {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A line could not be read from the input.
    #[error("Failed to read replay line {line}: {source}")]
    Io {
        /// 1-based line number.
        line: usize,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A line is not a valid sample.
    #[error("Invalid replay sample on line {line}: {source}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// A line has neither a counter value nor an error.
    #[error("Replay sample on line {line} has neither `counter` nor `error`")]
    MissingReading {
        /// 1-based line number.
        line: usize,
    },
}

/// One recorded poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaySample {
    /// Clock reading at the time of the poll.
    pub now_ms: u32,
    /// What the counter read returned.
    pub reading: Result<u32, ReadFailure>,
}

#[derive(Debug, Deserialize)]
struct SampleLine {
    now_ms: u32,
    #[serde(default)]
    counter: Option<u32>,
    #[serde(default)]
    error: Option<String>,
}

/// A loaded sequence of recorded poll cycles.
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    samples: Vec<ReplaySample>,
}

impl ReplaySource {
    /// Loads samples from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a line is malformed.
    pub fn from_path(path: &Path) -> Result<Self, ReplayError> {
        let file = File::open(path).map_err(|source| ReplayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(BufReader::new(file))
    }

    /// Parses samples from newline-delimited JSON. Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first line that cannot be read or parsed.
    pub fn parse(reader: impl BufRead) -> Result<Self, ReplayError> {
        let mut samples = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let number = index + 1;
            let line = line.map_err(|source| ReplayError::Io {
                line: number,
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let parsed: SampleLine =
                serde_json::from_str(&line).map_err(|source| ReplayError::Parse {
                    line: number,
                    source,
                })?;
            let reading = match (parsed.counter, parsed.error) {
                (_, Some(error)) => Err(failure_from(&error)),
                (Some(counter), None) => Ok(counter),
                (None, None) => return Err(ReplayError::MissingReading { line: number }),
            };
            samples.push(ReplaySample {
                now_ms: parsed.now_ms,
                reading,
            });
        }
        Ok(Self { samples })
    }

    /// Returns the loaded samples.
    #[must_use]
    pub fn samples(&self) -> &[ReplaySample] {
        &self.samples
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if there are no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Splits the recording into a counter and the clock it drives.
    ///
    /// Each counter read consumes one sample and moves the clock to that
    /// sample's time, so reading the clock right after the counter yields the
    /// recorded timestamp.
    #[must_use]
    pub fn into_parts(self) -> (ReplayCounter, ReplayClock) {
        let start = self.samples.first().map_or(0, |sample| sample.now_ms);
        let now = Arc::new(AtomicU32::new(start));
        let counter = ReplayCounter {
            samples: self.samples.into(),
            now: Arc::clone(&now),
        };
        (counter, ReplayClock { now })
    }
}

/// Maps a recorded error string onto the failure taxonomy.
fn failure_from(error: &str) -> ReadFailure {
    match error.strip_prefix("timeout") {
        Some(rest) => ReadFailure::Timeout {
            waited_ms: rest.trim_start_matches(':').trim().parse().unwrap_or(0),
        },
        None => ReadFailure::Bus(error.to_string()),
    }
}

/// Counter half of a replay.
#[derive(Debug)]
pub struct ReplayCounter {
    samples: VecDeque<ReplaySample>,
    now: Arc<AtomicU32>,
}

impl ReplayCounter {
    /// Number of samples not yet read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl CounterSource for ReplayCounter {
    fn read_counter(&mut self) -> Result<u32, ReadFailure> {
        let Some(sample) = self.samples.pop_front() else {
            return Err(ReadFailure::Bus("replay exhausted".to_string()));
        };
        self.now.store(sample.now_ms, Ordering::Relaxed);
        sample.reading
    }
}

/// Clock half of a replay.
#[derive(Debug, Clone)]
pub struct ReplayClock {
    now: Arc<AtomicU32>,
}

impl ClockSource for ReplayClock {
    fn now_ms(&self) -> u32 {
        self.now.load(Ordering::Relaxed)
    }
}
