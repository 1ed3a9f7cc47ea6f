//! Fallback coordination across extraction strategies.
//!
//! Strategies run strictly in the given order. Authoritative failures
//! (`BadUrl`, `NotFound`, `PrivateOrUnauthorized`) end the chain: no
//! alternate strategy can override them. Inconclusive failures
//! (`TransientError`, `NoTimestampFound`, `StrategyError`) pass control to
//! the next strategy; when every strategy is exhausted the *last*
//! inconclusive failure is returned, since later strategies are assumed
//! more informative about root cause.

use std::sync::Arc;

use crate::outcome::{ExtractionOutcome, FailureKind};
use crate::strategies::TimestampStrategy;

/// Runs strategies in order until one succeeds or fails authoritatively.
pub async fn resolve(
    post_id: &str,
    strategies: &[Arc<dyn TimestampStrategy>],
) -> ExtractionOutcome {
    let mut last_inconclusive: Option<ExtractionOutcome> = None;

    for strategy in strategies {
        let outcome = strategy.extract(post_id).await;
        match &outcome {
            ExtractionOutcome::Success { .. } => {
                log::debug!("post {post_id}: {} succeeded", strategy.name());
                return outcome;
            }
            ExtractionOutcome::Failure { kind, detail } => {
                if kind.is_authoritative() {
                    log::debug!(
                        "post {post_id}: {} returned authoritative failure {kind}",
                        strategy.name()
                    );
                    return outcome;
                }
                log::debug!(
                    "post {post_id}: {} inconclusive ({kind}: {detail}), trying next strategy",
                    strategy.name()
                );
                last_inconclusive = Some(outcome);
            }
        }
    }

    last_inconclusive.unwrap_or_else(|| {
        ExtractionOutcome::failure(FailureKind::StrategyError, "no strategies configured")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stub strategy returning a fixed outcome and counting invocations.
    struct StubStrategy {
        outcome: ExtractionOutcome,
        calls: AtomicUsize,
    }

    impl StubStrategy {
        fn new(outcome: ExtractionOutcome) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TimestampStrategy for StubStrategy {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn extract(&self, _post_id: &str) -> ExtractionOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn success() -> ExtractionOutcome {
        ExtractionOutcome::success(Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 30).unwrap())
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let first = StubStrategy::new(success());
        let second = StubStrategy::new(success());
        let strategies: Vec<Arc<dyn TimestampStrategy>> =
            vec![Arc::clone(&first) as _, Arc::clone(&second) as _];

        let outcome = resolve("ABC", &strategies).await;
        assert!(outcome.is_success());
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 0);
    }

    #[tokio::test]
    async fn test_fallback_ordering_reaches_third_strategy() {
        let first = StubStrategy::new(ExtractionOutcome::failure(
            FailureKind::TransientError,
            "timeout",
        ));
        let second = StubStrategy::new(ExtractionOutcome::failure(
            FailureKind::TransientError,
            "timeout again",
        ));
        let third = StubStrategy::new(success());
        let strategies: Vec<Arc<dyn TimestampStrategy>> = vec![
            Arc::clone(&first) as _,
            Arc::clone(&second) as _,
            Arc::clone(&third) as _,
        ];

        let outcome = resolve("ABC", &strategies).await;
        assert!(outcome.is_success());
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
        assert_eq!(third.calls(), 1);
    }

    #[tokio::test]
    async fn test_authoritative_failure_short_circuits() {
        let first = StubStrategy::new(ExtractionOutcome::failure(FailureKind::NotFound, "gone"));
        let second = StubStrategy::new(success());
        let strategies: Vec<Arc<dyn TimestampStrategy>> =
            vec![Arc::clone(&first) as _, Arc::clone(&second) as _];

        let outcome = resolve("ABC", &strategies).await;
        assert_eq!(outcome.failure_kind(), Some(FailureKind::NotFound));
        assert_eq!(second.calls(), 0, "second strategy must never run");
    }

    #[tokio::test]
    async fn test_private_short_circuits() {
        let first = StubStrategy::new(ExtractionOutcome::failure(
            FailureKind::PrivateOrUnauthorized,
            "",
        ));
        let second = StubStrategy::new(success());
        let strategies: Vec<Arc<dyn TimestampStrategy>> =
            vec![Arc::clone(&first) as _, Arc::clone(&second) as _];

        let outcome = resolve("ABC", &strategies).await;
        assert_eq!(
            outcome.failure_kind(),
            Some(FailureKind::PrivateOrUnauthorized)
        );
        assert_eq!(second.calls(), 0);
    }

    #[tokio::test]
    async fn test_exhaustion_returns_last_inconclusive() {
        let first = StubStrategy::new(ExtractionOutcome::failure(
            FailureKind::TransientError,
            "first",
        ));
        let second = StubStrategy::new(ExtractionOutcome::failure(
            FailureKind::NoTimestampFound,
            "second",
        ));
        let strategies: Vec<Arc<dyn TimestampStrategy>> =
            vec![Arc::clone(&first) as _, Arc::clone(&second) as _];

        let outcome = resolve("ABC", &strategies).await;
        match outcome {
            ExtractionOutcome::Failure { kind, detail } => {
                assert_eq!(kind, FailureKind::NoTimestampFound);
                assert_eq!(detail, "second");
            }
            ExtractionOutcome::Success { .. } => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn test_no_strategies_configured() {
        let outcome = resolve("ABC", &[]).await;
        assert_eq!(outcome.failure_kind(), Some(FailureKind::StrategyError));
    }
}
