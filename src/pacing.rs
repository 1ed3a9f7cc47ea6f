//! Request pacing with mandatory jitter.
//!
//! Every network-touching operation waits on [`Pacer::await_slot`] first.
//! The delay is drawn uniformly at random from a per-context range; jitter
//! is mandatory so the traffic never settles into a fixed, detectable
//! interval. The pacer holds no cross-call state: request volume here is
//! bounded by a human-driven batch, not a sustained service load, so a
//! token bucket would be machinery without a job.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::config::Config;

/// Which call site is about to touch the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaceContext {
    /// Between batch items.
    BatchItem,
    /// Before a structured-API lookup.
    ApiLookup,
    /// Before a browser page load.
    PageLoad,
    /// Between simulated scroll actions.
    Scroll,
}

/// Sleeping seam, injectable so tests never wait on the wall clock.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspends the caller for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Production sleeper backed by the tokio timer.
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Jittered per-context delay ranges.
#[derive(Debug, Clone)]
pub struct PacingConfig {
    /// Delay range between batch items.
    pub item_delay: (Duration, Duration),
    /// Delay range before a structured-API lookup.
    pub api_delay: (Duration, Duration),
    /// Delay range before a page load.
    pub page_load_delay: (Duration, Duration),
    /// Pause range between scrolls.
    pub scroll_pause: (Duration, Duration),
}

impl PacingConfig {
    /// Builds the pacing config from the library configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            item_delay: config.item_delay,
            api_delay: config.api_delay,
            page_load_delay: config.page_load_delay,
            scroll_pause: config.scroll_pause,
        }
    }

    fn range_for(&self, context: PaceContext) -> (Duration, Duration) {
        match context {
            PaceContext::BatchItem => self.item_delay,
            PaceContext::ApiLookup => self.api_delay,
            PaceContext::PageLoad => self.page_load_delay,
            PaceContext::Scroll => self.scroll_pause,
        }
    }
}

/// Pure scheduling policy: a blocking wait with jitter before each
/// network-touching operation.
pub struct Pacer {
    config: PacingConfig,
    sleeper: Arc<dyn Sleeper>,
}

impl Pacer {
    /// Creates a pacer over the tokio timer.
    pub fn new(config: PacingConfig) -> Self {
        Self::with_sleeper(config, Arc::new(TokioSleeper))
    }

    /// Creates a pacer with an injected sleeper (tests).
    pub fn with_sleeper(config: PacingConfig, sleeper: Arc<dyn Sleeper>) -> Self {
        Self { config, sleeper }
    }

    /// Samples a jittered delay for `context` without waiting.
    ///
    /// Used where the wait happens elsewhere, e.g. scroll pauses executed
    /// inside the browser session.
    pub fn sample_delay(&self, context: PaceContext) -> Duration {
        let (min, max) = self.config.range_for(context);
        if max <= min {
            return min;
        }
        let millis = rand::rng().random_range(min.as_millis() as u64..=max.as_millis() as u64);
        Duration::from_millis(millis)
    }

    /// Waits for a jittered delay appropriate to `context`.
    pub async fn await_slot(&self, context: PaceContext) {
        let delay = self.sample_delay(context);
        log::debug!("pacing {context:?}: waiting {}ms", delay.as_millis());
        self.sleeper.sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records requested sleeps instead of waiting.
    pub(crate) struct RecordingSleeper {
        pub slept: Mutex<Vec<Duration>>,
    }

    impl RecordingSleeper {
        pub(crate) fn new() -> Arc<Self> {
            Arc::new(Self {
                slept: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.slept.lock().unwrap().push(duration);
        }
    }

    fn test_config() -> PacingConfig {
        PacingConfig {
            item_delay: (Duration::from_millis(100), Duration::from_millis(200)),
            api_delay: (Duration::from_millis(10), Duration::from_millis(20)),
            page_load_delay: (Duration::from_millis(30), Duration::from_millis(40)),
            scroll_pause: (Duration::from_millis(5), Duration::from_millis(9)),
        }
    }

    #[test]
    fn test_sample_delay_within_range() {
        let pacer = Pacer::with_sleeper(test_config(), RecordingSleeper::new());
        for _ in 0..100 {
            let d = pacer.sample_delay(PaceContext::BatchItem);
            assert!(d >= Duration::from_millis(100) && d <= Duration::from_millis(200));
        }
    }

    #[test]
    fn test_sample_delay_jitters() {
        // Over enough draws a 100ms-wide range must produce more than one value.
        let pacer = Pacer::with_sleeper(test_config(), RecordingSleeper::new());
        let draws: std::collections::HashSet<u128> = (0..200)
            .map(|_| pacer.sample_delay(PaceContext::BatchItem).as_millis())
            .collect();
        assert!(draws.len() > 1, "jitter produced a fixed interval");
    }

    #[test]
    fn test_sample_delay_degenerate_range() {
        let mut config = test_config();
        config.scroll_pause = (Duration::from_millis(7), Duration::from_millis(7));
        let pacer = Pacer::with_sleeper(config, RecordingSleeper::new());
        assert_eq!(
            pacer.sample_delay(PaceContext::Scroll),
            Duration::from_millis(7)
        );
    }

    #[tokio::test]
    async fn test_await_slot_uses_injected_sleeper() {
        let sleeper = RecordingSleeper::new();
        let pacer = Pacer::with_sleeper(test_config(), Arc::clone(&sleeper) as Arc<dyn Sleeper>);

        pacer.await_slot(PaceContext::ApiLookup).await;
        pacer.await_slot(PaceContext::PageLoad).await;

        let slept = sleeper.slept.lock().unwrap();
        assert_eq!(slept.len(), 2);
        assert!(slept[0] >= Duration::from_millis(10) && slept[0] <= Duration::from_millis(20));
        assert!(slept[1] >= Duration::from_millis(30) && slept[1] <= Duration::from_millis(40));
    }

    #[test]
    fn test_context_ranges_are_distinct() {
        let config = test_config();
        assert_ne!(
            config.range_for(PaceContext::BatchItem),
            config.range_for(PaceContext::Scroll)
        );
    }
}
