//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `ig_timestamp` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use ig_timestamp::initialization::init_logger_with;
use ig_timestamp::{run_extraction, Config, LogFormat, LogLevel};

/// Extracts original publication timestamps for a CSV roster of post URLs.
#[derive(Parser, Debug)]
#[command(name = "ig_timestamp", version, about)]
struct Cli {
    /// Input CSV with post URLs (optionally a username column)
    input: PathBuf,

    /// Output CSV for successfully extracted timestamps
    #[arg(long, default_value = "ig_timestamps_success.csv")]
    success_output: PathBuf,

    /// Output CSV for rows that failed extraction
    #[arg(long, default_value = "ig_timestamps_errors.csv")]
    errors_output: PathBuf,

    /// HTTP User-Agent for the API client and the browser session
    #[arg(long)]
    user_agent: Option<String>,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value_t = 15)]
    timeout_seconds: u64,

    /// Minimum delay between roster items, in seconds
    #[arg(long, default_value_t = 8)]
    min_item_delay: u64,

    /// Maximum delay between roster items, in seconds
    #[arg(long, default_value_t = 14)]
    max_item_delay: u64,

    /// Number of simulated scrolls per rendered page
    #[arg(long, default_value_t = 3)]
    scroll_count: usize,

    /// Skip the browser-rendered strategies (structured API only)
    #[arg(long)]
    no_browser: bool,

    /// Minimum log level to display
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Log output format
    #[arg(long, value_enum, default_value = "plain")]
    log_format: LogFormat,
}

impl Cli {
    fn into_config(self) -> Config {
        let defaults = Config::default();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| defaults.user_agent.clone());
        Config {
            input: self.input,
            success_output: self.success_output,
            errors_output: self.errors_output,
            user_agent,
            timeout_seconds: self.timeout_seconds,
            item_delay: (
                Duration::from_secs(self.min_item_delay),
                Duration::from_secs(self.max_item_delay),
            ),
            scroll_count: self.scroll_count,
            no_browser: self.no_browser,
            ..defaults
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = cli.log_level.clone();
    let log_format = cli.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_extraction(cli.into_config()).await {
        Ok(report) => {
            println!(
                "✅ Processed {} row{} ({} succeeded, {} failed) in {:.1}s",
                report.total_rows,
                if report.total_rows == 1 { "" } else { "s" },
                report.successful,
                report.failed,
                report.elapsed_seconds
            );
            println!(
                "Results saved in {} and {}",
                report.success_path.display(),
                report.errors_path.display()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("ig_timestamp error: {e:#}");
            process::exit(1);
        }
    }
}
