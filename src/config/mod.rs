//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (delay ranges, timeouts, patterns)
//! - CLI option types and the library `Config`

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
