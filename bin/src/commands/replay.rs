//! Replay command implementation.
//!
//! This module feeds a recorded NDJSON file of poll cycles through the
//! monitor, so failed reads are skipped exactly as in a live run.

use crate::display::{CycleRecord, Format, summary};
use anyhow::{Context, Result};
use geiger_lib::prelude::*;
use std::path::Path;
use tracing::info;

/// Replay recorded samples from `input` and print every cycle.
pub(crate) fn replay(input: &Path, config: WindowConfig, format: Format) -> Result<()> {
    let source = ReplaySource::from_path(input)?;
    if source.is_empty() {
        anyhow::bail!("Replay file '{}' has no samples", input.display());
    }
    let failed = source
        .samples()
        .iter()
        .filter(|sample| sample.reading.is_err())
        .count();
    info!(
        samples = source.len(),
        failed,
        path = %input.display(),
        "loaded replay"
    );

    let (counter, clock) = source.into_parts();
    let mut monitor = Monitor::new(counter, clock);
    let mut estimator = RateEstimator::new(config).context("Invalid window configuration")?;

    // Every record carries the replay start time; now_ms is the recorded clock
    let started = chrono::Utc::now();
    while monitor.counter().remaining() > 0 {
        let outcome = monitor.poll(&mut estimator);
        let record = CycleRecord::new(&outcome, monitor.clock().now_ms(), started);
        println!("{}", record.render(format)?);
    }

    if format == Format::Text {
        println!("{}", summary(monitor.stats(), estimator.last_snapshot()));
    }

    Ok(())
}
