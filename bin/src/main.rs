//! geiger CLI - Sliding-window pulse rate estimation.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod display;
mod logging;

use config::WindowArgs;
use display::Format;

#[derive(Parser)]
#[command(name = "geiger")]
#[command(about = "Counts-per-minute estimation from a wrapping pulse counter", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (errors only, no spinner)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a live monitor against a simulated pulse counter
    Run {
        #[command(flatten)]
        window: WindowArgs,

        /// Simulated pulse rate in Hz
        #[arg(long, default_value = "20")]
        rate_hz: f64,

        /// Poll interval in milliseconds
        #[arg(long, default_value = "600")]
        poll_ms: u64,

        /// Stop after this many seconds (runs until Ctrl-C if omitted)
        #[arg(long)]
        duration_s: Option<u64>,

        /// Initial simulated counter value, to exercise counter wraparound
        #[arg(long, default_value = "0")]
        counter_offset: u32,

        /// Initial clock value in milliseconds, to exercise clock wraparound
        #[arg(long, default_value = "0")]
        clock_offset: u32,

        /// Fail every Nth counter read with a timeout (0 disables)
        #[arg(long, default_value = "0")]
        fail_every: u64,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Replay recorded poll cycles from an NDJSON file
    Replay {
        /// Recorded samples, one JSON object per line
        input: PathBuf,

        #[command(flatten)]
        window: WindowArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Show the effective window configuration and its derived limits
    Info {
        #[command(flatten)]
        window: WindowArgs,

        /// Highest pulse rate the counter must handle, in Hz
        #[arg(long, default_value = "1000000")]
        max_rate_hz: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Run {
            window,
            rate_hz,
            poll_ms,
            duration_s,
            counter_offset,
            clock_offset,
            fail_every,
            format,
        } => {
            let options = commands::run::RunOptions {
                rate_hz,
                poll_ms,
                duration_s,
                counter_offset,
                clock_offset,
                fail_every,
            };
            commands::run::run(window.resolve()?, options, format, cli.quiet).await
        }
        Commands::Replay {
            input,
            window,
            format,
        } => commands::replay::replay(&input, window.resolve()?, format),
        Commands::Info {
            window,
            max_rate_hz,
        } => commands::info::show_info(window.resolve()?, max_rate_hz),
    }
}
