//! Extraction outcome model and result classification.
//!
//! Every input row produces exactly one [`BatchEntry`], even on total
//! failure: failures are data attached to the row, never exceptions that
//! abort the batch. The tagged [`ExtractionOutcome`] replaces the string
//! sentinels of the original tool (`"ERROR_BAD_URL"`, `"NO TIMESTAMP
//! FOUND"`, ...) while keeping their information content.

use chrono::{DateTime, Utc};
use strum_macros::EnumIter as EnumIterMacro;

/// How an extraction failed.
///
/// Authoritative kinds terminate the fallback chain: no alternate strategy
/// can override them. Inconclusive kinds are worth retrying via a different
/// strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FailureKind {
    /// Malformed input URL; never attempted.
    BadUrl,
    /// The post does not exist.
    NotFound,
    /// The post exists but access is refused.
    PrivateOrUnauthorized,
    /// The post was reachable but carried no recognizable timestamp.
    NoTimestampFound,
    /// Network/timeout/parse hiccup, potentially recoverable by another
    /// strategy or a later run.
    TransientError,
    /// Unexpected failure inside a strategy, wrapped with its message.
    StrategyError,
}

impl FailureKind {
    /// Returns a human-readable token for this failure kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::BadUrl => "BAD URL",
            FailureKind::NotFound => "NOT FOUND",
            FailureKind::PrivateOrUnauthorized => "PRIVATE OR UNAUTHORIZED",
            FailureKind::NoTimestampFound => "NO TIMESTAMP FOUND",
            FailureKind::TransientError => "TRANSIENT ERROR",
            FailureKind::StrategyError => "STRATEGY ERROR",
        }
    }

    /// True when no alternate strategy can override this failure.
    pub fn is_authoritative(&self) -> bool {
        matches!(
            self,
            FailureKind::BadUrl | FailureKind::NotFound | FailureKind::PrivateOrUnauthorized
        )
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of attempting to extract one post's publication timestamp.
///
/// Exactly one variant is populated; never both.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    /// The extraction succeeded.
    Success {
        /// Publication instant, UTC, second resolution.
        timestamp: DateTime<Utc>,
    },
    /// The extraction failed.
    Failure {
        /// What category of failure this was.
        kind: FailureKind,
        /// Human-readable detail, possibly empty.
        detail: String,
    },
}

impl ExtractionOutcome {
    /// Builds a success outcome, truncating to second resolution.
    pub fn success(timestamp: DateTime<Utc>) -> Self {
        use chrono::SubsecRound;
        ExtractionOutcome::Success {
            timestamp: timestamp.trunc_subsecs(0),
        }
    }

    /// Builds a failure outcome.
    pub fn failure(kind: FailureKind, detail: impl Into<String>) -> Self {
        ExtractionOutcome::Failure {
            kind,
            detail: detail.into(),
        }
    }

    /// Wraps an unexpected strategy-internal error.
    pub fn strategy_error(err: &anyhow::Error) -> Self {
        ExtractionOutcome::Failure {
            kind: FailureKind::StrategyError,
            detail: format!("{err:#}"),
        }
    }

    /// True for the `Success` variant.
    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionOutcome::Success { .. })
    }

    /// The failure kind, if this is a failure.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            ExtractionOutcome::Success { .. } => None,
            ExtractionOutcome::Failure { kind, .. } => Some(*kind),
        }
    }

    /// Renders the outcome into the `timestamp` output column.
    ///
    /// Successes render as `YYYY-MM-DD HH:MM:SS` (UTC); failures render as
    /// the kind token, with detail appended when present.
    pub fn render(&self) -> String {
        match self {
            ExtractionOutcome::Success { timestamp } => {
                timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
            }
            ExtractionOutcome::Failure { kind, detail } => {
                if detail.is_empty() {
                    kind.as_str().to_string()
                } else {
                    format!("{}: {}", kind.as_str(), detail)
                }
            }
        }
    }
}

/// One processed input row: the identity/URL pair plus its outcome.
#[derive(Debug, Clone)]
pub struct BatchEntry {
    /// Identity column value, `"unknown"` when absent from input.
    pub display_name: String,
    /// The raw URL as supplied (trimmed).
    pub raw_url: String,
    /// What happened for this row.
    pub outcome: ExtractionOutcome,
}

/// Ordered sequence of per-row results, preserving input order.
///
/// Never mutated after the batch completes; split lazily into success/error
/// views by [`BatchResult::classify`].
#[derive(Debug, Default)]
pub struct BatchResult {
    entries: Vec<BatchEntry>,
}

impl BatchResult {
    /// Creates an empty result with capacity for `n` rows.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            entries: Vec::with_capacity(n),
        }
    }

    /// Appends one row's result. Rows are appended strictly in input order.
    pub fn push(&mut self, entry: BatchEntry) {
        self.entries.push(entry);
    }

    /// All entries in input order.
    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    /// Number of processed rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no rows were processed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of successful rows.
    pub fn successful(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_success()).count()
    }

    /// Partitions entries by outcome tag, preserving relative input order
    /// within each partition.
    pub fn classify(&self) -> (Vec<&BatchEntry>, Vec<&BatchEntry>) {
        self.entries
            .iter()
            .partition(|entry| entry.outcome.is_success())
    }
}
