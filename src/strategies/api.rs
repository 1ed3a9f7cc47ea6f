//! Structured-API strategy.
//!
//! Queries the per-post JSON endpoint by shortcode and reads the
//! epoch-seconds publication field directly. Cheapest and most precise
//! route when the target serves it.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;

use crate::outcome::{ExtractionOutcome, FailureKind};
use crate::pacing::{PaceContext, Pacer};
use crate::parse;
use crate::strategies::TimestampStrategy;

/// Key paths tried against the API payload, newest shape first.
const TAKEN_AT_PATHS: &[&str] = &[
    "items.0.taken_at",
    "graphql.shortcode_media.taken_at_timestamp",
];

/// Structured per-post JSON lookup.
pub struct StructuredApiStrategy {
    client: Arc<reqwest::Client>,
    pacer: Arc<Pacer>,
}

impl StructuredApiStrategy {
    /// Creates the strategy over a shared HTTP client.
    pub fn new(client: Arc<reqwest::Client>, pacer: Arc<Pacer>) -> Self {
        Self { client, pacer }
    }

    async fn lookup(&self, post_id: &str) -> anyhow::Result<ExtractionOutcome> {
        self.pacer.await_slot(PaceContext::ApiLookup).await;

        let url = format!(
            "{}?__a=1&__d=dis",
            crate::strategies::post_url(post_id)
        );
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("API request failed")?;

        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::GONE => {
                return Ok(ExtractionOutcome::failure(
                    FailureKind::NotFound,
                    format!("post {post_id} does not exist"),
                ));
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Ok(ExtractionOutcome::failure(
                    FailureKind::PrivateOrUnauthorized,
                    format!("access to post {post_id} refused"),
                ));
            }
            status if !status.is_success() => {
                anyhow::bail!("unexpected HTTP status {status}");
            }
            _ => {}
        }

        let body = response.text().await.context("failed to read API body")?;
        let payload: serde_json::Value =
            serde_json::from_str(&body).context("API response was not JSON")?;

        for path in TAKEN_AT_PATHS {
            if let Some(instant) = parse::embedded::timestamp_at(&payload, path) {
                return Ok(ExtractionOutcome::success(instant));
            }
        }

        Ok(ExtractionOutcome::failure(
            FailureKind::NoTimestampFound,
            "publication field missing from API payload",
        ))
    }
}

#[async_trait]
impl TimestampStrategy for StructuredApiStrategy {
    fn name(&self) -> &'static str {
        "structured-api"
    }

    async fn extract(&self, post_id: &str) -> ExtractionOutcome {
        match self.lookup(post_id).await {
            Ok(outcome) => outcome,
            Err(err) => ExtractionOutcome::strategy_error(&err),
        }
    }
}
