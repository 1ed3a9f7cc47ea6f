//! Embedded-data-blob strategy.
//!
//! Loads the rendered page, then searches the raw markup for an inline JSON
//! callback payload and descends a configured key path to the epoch-seconds
//! publication field. Falls through to the `<time>`-element search before
//! declaring the timestamp absent, since a page that lost the blob may still
//! carry the visible tag.

use std::sync::Arc;

use async_trait::async_trait;

use crate::outcome::{ExtractionOutcome, FailureKind};
use crate::pacing::{PaceContext, Pacer};
use crate::parse::{embedded, time_tag};
use crate::render::{PageRenderer, RenderOptions};
use crate::strategies::{EmbeddedBlobConfig, TimestampStrategy};

/// Embedded JSON payload extraction with a time-tag fallback.
pub struct EmbeddedBlobStrategy {
    renderer: Arc<dyn PageRenderer>,
    pacer: Arc<Pacer>,
    config: EmbeddedBlobConfig,
    scroll_count: usize,
}

impl EmbeddedBlobStrategy {
    /// Creates the strategy over the shared browser session.
    pub fn new(
        renderer: Arc<dyn PageRenderer>,
        pacer: Arc<Pacer>,
        config: EmbeddedBlobConfig,
        scroll_count: usize,
    ) -> Self {
        Self {
            renderer,
            pacer,
            config,
            scroll_count,
        }
    }

    /// Pure extraction over already-rendered markup.
    fn extract_from_html(&self, html: &str) -> ExtractionOutcome {
        if let Some(payload) = embedded::capture_payload(html, &self.config.pattern) {
            if let Some(instant) = embedded::timestamp_at(&payload, &self.config.key_path) {
                return ExtractionOutcome::success(instant);
            }
            log::debug!(
                "embedded payload present but key path '{}' missing",
                self.config.key_path
            );
        }

        // Blob absent or key path missing: the visible tag may still exist.
        match time_tag::find_time_tag(html) {
            Some(instant) => ExtractionOutcome::success(instant),
            None => ExtractionOutcome::failure(
                FailureKind::NoTimestampFound,
                "no embedded payload and no <time> element in page",
            ),
        }
    }
}

#[async_trait]
impl TimestampStrategy for EmbeddedBlobStrategy {
    fn name(&self) -> &'static str {
        "embedded-blob"
    }

    async fn extract(&self, post_id: &str) -> ExtractionOutcome {
        self.pacer.await_slot(PaceContext::PageLoad).await;

        let options = RenderOptions {
            scroll_pauses: (0..self.scroll_count)
                .map(|_| self.pacer.sample_delay(PaceContext::Scroll))
                .collect(),
        };

        let url = crate::strategies::post_url(post_id);
        match self.renderer.render(&url, &options).await {
            Ok(html) => self.extract_from_html(&html),
            Err(err) => ExtractionOutcome::failure(FailureKind::TransientError, err.to_string()),
        }
    }
}
