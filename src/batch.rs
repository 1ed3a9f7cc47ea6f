//! Sequential batch execution.
//!
//! Walks the roster one row at a time: normalize, pace, resolve through the
//! strategy chain, record. Rows that fail normalization are recorded as
//! `BAD URL` without touching a strategy or the pacer. Cancellation is
//! checked at the top of every iteration so a stopped run still yields the
//! entries finished so far.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::UNKNOWN_DISPLAY_NAME;
use crate::coordinator;
use crate::input::InputRow;
use crate::normalize;
use crate::outcome::{BatchEntry, BatchResult, ExtractionOutcome, FailureKind};
use crate::pacing::{PaceContext, Pacer};
use crate::strategies::TimestampStrategy;

/// Called after each processed row with the completed fraction in `0.0..=1.0`.
pub type ProgressFn = dyn Fn(f64) + Send + Sync;

/// Drives one roster through the strategy chain.
pub struct BatchRunner {
    strategies: Vec<Arc<dyn TimestampStrategy>>,
    pacer: Arc<Pacer>,
    cancel: CancellationToken,
}

impl BatchRunner {
    /// Creates a runner over a fixed strategy order.
    pub fn new(
        strategies: Vec<Arc<dyn TimestampStrategy>>,
        pacer: Arc<Pacer>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            strategies,
            pacer,
            cancel,
        }
    }

    /// Processes every roster row in order, returning one entry per row.
    ///
    /// On cancellation the result holds only the rows completed so far.
    pub async fn run(&self, rows: &[InputRow], progress: Option<&ProgressFn>) -> BatchResult {
        let total = rows.len();
        let mut result = BatchResult::with_capacity(total);

        for (index, row) in rows.iter().enumerate() {
            if self.cancel.is_cancelled() {
                log::warn!(
                    "batch cancelled after {} of {total} rows; writing partial results",
                    result.len()
                );
                break;
            }

            let entry = self.process_row(row).await;
            log::info!(
                "[{}/{total}] {} -> {}",
                index + 1,
                entry.raw_url,
                entry.outcome.render()
            );
            result.push(entry);

            if let Some(progress) = progress {
                progress((index + 1) as f64 / total as f64);
            }
        }

        result
    }

    async fn process_row(&self, row: &InputRow) -> BatchEntry {
        let reference = match normalize::normalize(&row.url, &row.display_name) {
            Ok(reference) => reference,
            Err(err) => {
                // Malformed rows never reach a strategy and never pace.
                let display_name = if row.display_name.trim().is_empty() {
                    UNKNOWN_DISPLAY_NAME.to_string()
                } else {
                    row.display_name.trim().to_string()
                };
                return BatchEntry {
                    display_name,
                    raw_url: row.url.clone(),
                    outcome: ExtractionOutcome::failure(FailureKind::BadUrl, err.to_string()),
                };
            }
        };

        self.pacer.await_slot(PaceContext::BatchItem).await;
        let outcome = coordinator::resolve(&reference.post_id, &self.strategies).await;

        BatchEntry {
            display_name: reference.display_name,
            raw_url: reference.raw_url,
            outcome,
        }
    }
}
