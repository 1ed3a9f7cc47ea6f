//! Extraction strategies.
//!
//! Three independent retrieval routes, each producing an
//! [`ExtractionOutcome`] and never letting an internal error escape its
//! boundary. Preference order: the structured API is cheapest and most
//! precise when reachable; the two browser-rendered routes exist because the
//! target intermittently withholds structured access, and between them the
//! JSON-blob route is preferred (less fragile to markup changes) with the
//! `<time>`-tag parse as its own internal fallback.

mod api;
mod embedded;
mod rendered;

use std::sync::Arc;
use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;

use crate::config::{Config, EMBEDDED_CALLBACK_PATTERN, EMBEDDED_KEY_PATH};
use crate::outcome::ExtractionOutcome;
use crate::pacing::Pacer;
use crate::render::PageRenderer;

pub use api::StructuredApiStrategy;
pub use embedded::EmbeddedBlobStrategy;
pub use rendered::RenderedPageStrategy;

/// One retrieval route for a post's publication timestamp.
///
/// Implementations must never panic or error past this boundary: internal
/// failures are wrapped into `Failure{StrategyError}`.
#[async_trait]
pub trait TimestampStrategy: Send + Sync {
    /// Strategy name, for logging.
    fn name(&self) -> &'static str;

    /// Attempts to extract the publication timestamp for one post.
    async fn extract(&self, post_id: &str) -> ExtractionOutcome;
}

/// Where the embedded-blob strategy looks inside the page.
///
/// The legacy JSON-callback shape may no longer exist on the live target;
/// both the callback pattern and the key path are configuration, not a
/// load-bearing contract of the pipeline.
#[derive(Debug, Clone)]
pub struct EmbeddedBlobConfig {
    /// Regex whose first capture group covers the JSON payload text.
    pub pattern: Regex,
    /// Dotted key path from the payload root to an epoch-seconds number.
    pub key_path: String,
}

impl Default for EmbeddedBlobConfig {
    fn default() -> Self {
        Self {
            pattern: legacy_callback_pattern().clone(),
            key_path: EMBEDDED_KEY_PATH.to_string(),
        }
    }
}

fn legacy_callback_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Compile-time constant; a failure here is a programming error.
        Regex::new(EMBEDDED_CALLBACK_PATTERN).expect("embedded callback pattern must compile")
    })
}

/// Canonical page URL for a shortcode.
pub(crate) fn post_url(post_id: &str) -> String {
    format!("https://www.instagram.com/p/{post_id}/")
}

/// Builds the default strategy order: structured API, then embedded blob,
/// then rendered-page time tag.
///
/// With `no_browser` set only the structured API route is used.
pub fn default_strategies(
    config: &Config,
    client: Arc<reqwest::Client>,
    renderer: Option<Arc<dyn PageRenderer>>,
    pacer: Arc<Pacer>,
) -> Vec<Arc<dyn TimestampStrategy>> {
    let mut strategies: Vec<Arc<dyn TimestampStrategy>> = vec![Arc::new(
        StructuredApiStrategy::new(client, Arc::clone(&pacer)),
    )];

    if let Some(renderer) = renderer {
        strategies.push(Arc::new(EmbeddedBlobStrategy::new(
            Arc::clone(&renderer),
            Arc::clone(&pacer),
            EmbeddedBlobConfig::default(),
            config.scroll_count,
        )));
        strategies.push(Arc::new(RenderedPageStrategy::new(
            renderer,
            pacer,
            config.scroll_count,
        )));
    }

    strategies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_url_shape() {
        assert_eq!(post_url("ABC123"), "https://www.instagram.com/p/ABC123/");
    }

    #[test]
    fn test_embedded_blob_config_default() {
        let config = EmbeddedBlobConfig::default();
        assert_eq!(config.key_path, "items.0.taken_at");
        assert!(config
            .pattern
            .is_match(r#"window.__additionalDataLoaded('/p/X/', {"a": 1});"#));
    }
}
