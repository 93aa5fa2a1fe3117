//! Run command implementation.
//!
//! This module drives a live monitor: a simulated pulse counter polled on a
//! fixed interval, with each cycle rendered to stdout.

use crate::display::{CycleRecord, Format, summary};
use anyhow::{Context, Result};
use geiger_lib::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, warn};

/// Options for a live run.
#[derive(Debug, Clone)]
pub(crate) struct RunOptions {
    pub(crate) rate_hz: f64,
    pub(crate) poll_ms: u64,
    pub(crate) duration_s: Option<u64>,
    pub(crate) counter_offset: u32,
    pub(crate) clock_offset: u32,
    pub(crate) fail_every: u64,
}

/// Poll a simulated counter until the duration elapses or Ctrl-C.
pub(crate) async fn run(
    config: WindowConfig,
    options: RunOptions,
    format: Format,
    quiet: bool,
) -> Result<()> {
    let mut estimator = RateEstimator::new(config).context("Invalid window configuration")?;

    if options.poll_ms == 0 {
        anyhow::bail!("Poll interval must be at least 1 ms");
    }
    let poll = Duration::from_millis(options.poll_ms);
    warn_if_poll_too_slow(&config, options.rate_hz, poll);

    let clock = SystemClock::with_offset(options.clock_offset, config.clock_width()?);
    let counter = SimulatedCounter::new(clock, options.rate_hz)
        .with_width(config.counter_width()?)
        .with_start_value(options.counter_offset)
        .with_fail_every(options.fail_every);
    let mut monitor = Monitor::new(counter, clock);

    info!(
        rate_hz = options.rate_hz,
        poll_ms = options.poll_ms,
        window_ms = config.window_ms,
        buckets = config.bucket_count,
        "starting monitor"
    );

    // Setup spinner
    let spinner = if quiet || format != Format::Text || !std::io::stdout().is_terminal() {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("Invalid progress template"),
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        pb.set_message("waiting for first reading");
        pb
    };

    let deadline = options
        .duration_s
        .map(|secs| Instant::now() + Duration::from_secs(secs));
    let mut ticker = tokio::time::interval(poll);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = &mut ctrl_c => {
                info!("interrupted");
                break;
            }
        }

        let outcome = monitor.poll(&mut estimator);
        let record = CycleRecord::new(&outcome, monitor.clock().now_ms(), chrono::Utc::now());
        let line = record.render(format)?;
        if spinner.is_hidden() {
            println!("{line}");
        } else {
            spinner.println(line);
        }
        if let Some(snapshot) = outcome.snapshot() {
            spinner.set_message(format!("{snapshot} ({})", estimator.phase()));
        }

        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            break;
        }
    }

    spinner.finish_and_clear();
    if !quiet && format == Format::Text {
        println!("{}", summary(monitor.stats(), estimator.last_snapshot()));
    }

    Ok(())
}

/// Warns when the poll interval lets the counter wrap twice between reads.
fn warn_if_poll_too_slow(config: &WindowConfig, rate_hz: f64, poll: Duration) {
    let rate = if rate_hz.is_finite() && rate_hz > 0.0 {
        rate_hz.ceil() as u32
    } else {
        0
    };
    if let Some(limit) = config.max_safe_poll_interval(rate) {
        if poll > limit {
            warn!(
                poll_ms = poll.as_millis() as u64,
                limit_ms = limit.as_millis() as u64,
                "poll interval exceeds the counter wrap limit, deltas will undercount"
            );
        }
    }
}
