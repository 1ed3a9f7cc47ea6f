//! ig_timestamp library: bulk post-timestamp extraction
//!
//! This library reads a CSV roster of social post URLs, resolves each post's
//! original publication timestamp through a chain of extraction strategies
//! (structured API lookup, embedded JSON payload, rendered `<time>` element),
//! and writes the results to success/error CSV files.
//!
//! # Example
//!
//! ```no_run
//! use ig_timestamp::{run_extraction, Config};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     input: PathBuf::from("posts.csv"),
//!     ..Default::default()
//! };
//!
//! let report = run_extraction(config).await?;
//! println!("Processed {} rows: {} succeeded, {} failed",
//!          report.total_rows, report.successful, report.failed);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

pub mod batch;
pub mod config;
pub mod coordinator;
pub mod export;
pub mod initialization;
pub mod input;
pub mod normalize;
pub mod outcome;
pub mod pacing;
mod parse;
pub mod render;
pub mod strategies;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use outcome::{BatchEntry, BatchResult, ExtractionOutcome, FailureKind};
pub use run::{run_extraction, ExtractionReport};

// Internal run module (contains the batch pipeline wiring)
mod run {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;

    use anyhow::{Context, Result};
    use log::info;
    use tokio_util::sync::CancellationToken;

    use crate::batch::BatchRunner;
    use crate::config::Config;
    use crate::export::{write_errors_csv, write_success_csv};
    use crate::initialization::init_client;
    use crate::input::read_rows;
    use crate::pacing::{Pacer, PacingConfig};
    use crate::render::{ChromiumRenderer, PageRenderer};
    use crate::strategies::default_strategies;

    /// Results of one extraction run.
    #[derive(Debug, Clone)]
    pub struct ExtractionReport {
        /// Total number of roster rows processed
        pub total_rows: usize,
        /// Rows that yielded a timestamp
        pub successful: usize,
        /// Rows that did not
        pub failed: usize,
        /// Path to the success CSV
        pub success_path: PathBuf,
        /// Path to the errors CSV
        pub errors_path: PathBuf,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs a timestamp extraction batch with the provided configuration.
    ///
    /// This is the main entry point for the library. It reads the roster,
    /// resolves each post through the strategy chain sequentially, and writes
    /// success and error CSVs.
    ///
    /// Ctrl-C stops the batch at the next row boundary; whatever finished is
    /// still written out.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The input file cannot be opened or parsed
    /// - The HTTP client or browser session cannot be initialized
    /// - An output file cannot be written
    pub async fn run_extraction(config: Config) -> Result<ExtractionReport> {
        let rows = read_rows(&config.input)
            .with_context(|| format!("failed to read roster: {}", config.input.display()))?;
        info!("Found {} URLs in {}", rows.len(), config.input.display());

        let client = init_client(&config).context("failed to initialize HTTP client")?;

        let renderer: Option<Arc<dyn PageRenderer>> = if config.no_browser {
            info!("Browser strategies disabled; using structured API only");
            None
        } else {
            let renderer = ChromiumRenderer::new(
                config.user_agent.clone(),
                Duration::from_secs(crate::config::RENDER_TIMEOUT_SECS),
            )
            .context("failed to prepare browser session")?;
            Some(Arc::new(renderer))
        };

        let pacer = Arc::new(Pacer::new(PacingConfig::from_config(&config)));
        let strategies = default_strategies(&config, client, renderer, Arc::clone(&pacer));

        let cancel = CancellationToken::new();
        let cancel_for_signal = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!("Interrupt received; finishing current row then stopping");
                cancel_for_signal.cancel();
            }
        });

        let start_time = std::time::Instant::now();
        let runner = BatchRunner::new(strategies, pacer, cancel);
        let result = runner.run(&rows, None).await;
        let elapsed_seconds = start_time.elapsed().as_secs_f64();

        let (successes, failures) = result.classify();
        let successful = write_success_csv(&config.success_output, &successes)
            .with_context(|| {
                format!(
                    "failed to write success output: {}",
                    config.success_output.display()
                )
            })?;
        let failed = write_errors_csv(&config.errors_output, &failures).with_context(|| {
            format!(
                "failed to write errors output: {}",
                config.errors_output.display()
            )
        })?;

        info!(
            "Batch complete: {} rows, {} succeeded, {} failed in {:.1}s",
            result.len(),
            successful,
            failed,
            elapsed_seconds
        );

        Ok(ExtractionReport {
            total_rows: result.len(),
            successful,
            failed,
            success_path: config.success_output.clone(),
            errors_path: config.errors_output.clone(),
            elapsed_seconds,
        })
    }
}
