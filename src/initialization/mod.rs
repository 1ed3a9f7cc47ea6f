//! Application initialization and resource setup.
//!
//! Shared resources are built once at startup: the logger, the HTTP client
//! used for structured API lookups, and the browser session for rendered
//! strategies. All initialization functions return proper error types.

mod client;
mod logger;

use thiserror::Error;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;

/// Errors raised while building shared resources.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// The logger could not be installed.
    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
