//! Presentation of poll cycles for the geiger CLI.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use geiger_lib::prelude::*;
use serde::Serialize;

/// Most pulse marks drawn for a single cycle.
const MAX_PULSE_MARKS: u32 = 20;

/// Output format for poll cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    Text,
    Json,
    Ndjson,
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
        };
        write!(f, "{name}")
    }
}

/// One poll cycle as written to stdout.
#[derive(Debug, Serialize)]
pub(crate) struct CycleRecord {
    /// Wall-clock time the record was produced. A replay stamps every record
    /// with the time the replay started; `now_ms` carries the recorded time.
    timestamp: DateTime<Utc>,
    /// Source clock reading for the cycle.
    now_ms: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    snapshot: Option<RateSnapshot>,
    pulses: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    skipped: Option<String>,
}

impl CycleRecord {
    /// Captures a poll outcome observed at `now_ms` on the source clock.
    pub(crate) fn new(outcome: &PollOutcome, now_ms: u32, timestamp: DateTime<Utc>) -> Self {
        match outcome {
            PollOutcome::Updated { snapshot, pulses } => Self {
                timestamp,
                now_ms,
                snapshot: Some(*snapshot),
                pulses: *pulses,
                skipped: None,
            },
            PollOutcome::Skipped(failure) => Self {
                timestamp,
                now_ms,
                snapshot: None,
                pulses: 0,
                skipped: Some(failure.to_string()),
            },
        }
    }

    /// Renders the record in the given format, without a trailing newline.
    pub(crate) fn render(&self, format: Format) -> Result<String> {
        let rendered = match format {
            Format::Text => self.to_text(),
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Ndjson => serde_json::to_string(self)?,
        };
        Ok(rendered)
    }

    fn to_text(&self) -> String {
        let time = self.timestamp.format("%H:%M:%S%.3f");
        match (&self.snapshot, &self.skipped) {
            (Some(snapshot), _) => format!(
                "[{time}] t={:>10}ms  {:<24} {}",
                self.now_ms,
                snapshot.to_string(),
                pulse_indicator(self.pulses)
            ),
            (None, Some(reason)) => format!("[{time}] t={:>10}ms  skipped: {reason}", self.now_ms),
            (None, None) => format!("[{time}] t={:>10}ms", self.now_ms),
        }
    }
}

/// Draws one mark per pulse observed in a cycle, capped for readability.
pub(crate) fn pulse_indicator(pulses: u32) -> String {
    let marks = "*".repeat(pulses.min(MAX_PULSE_MARKS) as usize);
    if pulses > MAX_PULSE_MARKS {
        format!("{marks}+")
    } else {
        marks
    }
}

/// One-line run summary.
pub(crate) fn summary(stats: PollStats, last: Option<RateSnapshot>) -> String {
    let rate = last.map_or_else(|| "no data".to_string(), |snapshot| snapshot.to_string());
    format!(
        "{} cycles: {} updated, {} skipped. Last reading: {rate}",
        stats.total(),
        stats.updated,
        stats.skipped
    )
}
