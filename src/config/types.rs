//! Configuration types and CLI option enums.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    API_LOOKUP_DELAY, BATCH_ITEM_DELAY, DEFAULT_USER_AGENT, HTTP_TIMEOUT_SECS, PAGE_LOAD_DELAY,
    SCROLL_COUNT, SCROLL_PAUSE,
};

/// Logging level for the application.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without any CLI dependencies.
///
/// # Examples
///
/// ```no_run
/// use ig_timestamp::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     input: PathBuf::from("posts.csv"),
///     scroll_count: 2,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Input CSV file with post URLs (and optional usernames)
    pub input: PathBuf,

    /// Output CSV for successfully extracted timestamps
    pub success_output: PathBuf,

    /// Output CSV for rows that failed extraction
    pub errors_output: PathBuf,

    /// HTTP User-Agent for both the API client and the browser session
    pub user_agent: String,

    /// Per-request HTTP timeout in seconds
    pub timeout_seconds: u64,

    /// Delay range between batch items (min, max)
    pub item_delay: (Duration, Duration),

    /// Delay range before a structured-API lookup (min, max)
    pub api_delay: (Duration, Duration),

    /// Delay range before a browser page load (min, max)
    pub page_load_delay: (Duration, Duration),

    /// Pause range between simulated scrolls (min, max)
    pub scroll_pause: (Duration, Duration),

    /// Number of simulated scrolls per rendered page
    pub scroll_count: usize,

    /// Skip the browser-rendered strategies (structured API only)
    pub no_browser: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("posts.csv"),
            success_output: PathBuf::from("ig_timestamps_success.csv"),
            errors_output: PathBuf::from("ig_timestamps_errors.csv"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: HTTP_TIMEOUT_SECS,
            item_delay: BATCH_ITEM_DELAY,
            api_delay: API_LOOKUP_DELAY,
            page_load_delay: PAGE_LOAD_DELAY,
            scroll_pause: SCROLL_PAUSE,
            scroll_count: SCROLL_COUNT,
            no_browser: false,
        }
    }
}
