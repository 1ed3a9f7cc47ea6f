//! Rendered-page strategy.
//!
//! Loads the fully rendered post page through the shared browser session,
//! nudges lazy content with a few jittered scrolls, then looks for a
//! `<time datetime="...">` element in the final markup.

use std::sync::Arc;

use async_trait::async_trait;

use crate::outcome::{ExtractionOutcome, FailureKind};
use crate::pacing::{PaceContext, Pacer};
use crate::parse::time_tag;
use crate::render::{PageRenderer, RenderOptions};
use crate::strategies::TimestampStrategy;

/// Browser-rendered `<time>`-tag extraction.
pub struct RenderedPageStrategy {
    renderer: Arc<dyn PageRenderer>,
    pacer: Arc<Pacer>,
    scroll_count: usize,
}

impl RenderedPageStrategy {
    /// Creates the strategy over the shared browser session.
    pub fn new(renderer: Arc<dyn PageRenderer>, pacer: Arc<Pacer>, scroll_count: usize) -> Self {
        Self {
            renderer,
            pacer,
            scroll_count,
        }
    }

    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            scroll_pauses: (0..self.scroll_count)
                .map(|_| self.pacer.sample_delay(PaceContext::Scroll))
                .collect(),
        }
    }
}

#[async_trait]
impl TimestampStrategy for RenderedPageStrategy {
    fn name(&self) -> &'static str {
        "rendered-page"
    }

    async fn extract(&self, post_id: &str) -> ExtractionOutcome {
        self.pacer.await_slot(PaceContext::PageLoad).await;

        let url = crate::strategies::post_url(post_id);
        let html = match self.renderer.render(&url, &self.render_options()).await {
            Ok(html) => html,
            Err(err) => {
                return ExtractionOutcome::failure(FailureKind::TransientError, err.to_string());
            }
        };

        match time_tag::find_time_tag(&html) {
            Some(instant) => ExtractionOutcome::success(instant),
            None => ExtractionOutcome::failure(
                FailureKind::NoTimestampFound,
                "no machine-readable <time> element in rendered page",
            ),
        }
    }
}
