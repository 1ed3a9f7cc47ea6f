//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;
use crate::initialization::InitializationError;

/// Initializes the HTTP client used by the structured API strategy.
///
/// Configured with the user-agent and timeout from [`Config`]; redirects
/// stay enabled so moved posts still resolve.
///
/// # Errors
///
/// Returns `InitializationError::HttpClient` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
