//! Info command implementation.
//!
//! This module prints the effective window configuration together with the
//! limits derived from it.

use anyhow::Result;
use geiger_lib::prelude::*;
use std::time::Duration;

/// Show the window configuration, its derived constants and safe polling limit.
pub(crate) fn show_info(config: WindowConfig, max_rate_hz: u32) -> Result<()> {
    let counter = config.counter_width()?;
    let clock = config.clock_width()?;

    println!("Window:          {} ms", config.window_ms);
    println!("Buckets:         {}", config.bucket_count);
    println!("Bucket length:   {} ms", config.ms_per_bucket());
    println!("Counter:         {counter} (wraps after {} pulses)", counter.modulus());
    println!(
        "Clock:           {clock} (wraps every {})",
        config
            .clock_wrap_period()
            .map_or_else(|| "-".to_string(), format_duration)
    );

    match config.max_safe_poll_interval(max_rate_hz) {
        Some(limit) => println!(
            "Max poll gap:    {} at {max_rate_hz} Hz",
            format_duration(limit)
        ),
        None => println!("Max poll gap:    unbounded at {max_rate_hz} Hz"),
    }

    println!(
        "\nNote: polling slower than the max poll gap lets the counter wrap more than\n\
         once between reads, which undercounts without any error."
    );

    Ok(())
}

/// Formats a duration with the largest sensible unit.
fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs >= 86_400.0 {
        format!("{:.1} days", secs / 86_400.0)
    } else if secs >= 3_600.0 {
        format!("{:.1} h", secs / 3_600.0)
    } else if secs >= 1.0 {
        format!("{secs:.1} s")
    } else {
        format!("{} ms", duration.as_millis())
    }
}
