//! Shared price state and the polling loop that refreshes it.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use arena_core::traits::QuoteProvider;
use arena_core::types::{Asset, PriceSample};

const SAMPLE_CHANNEL_CAPACITY: usize = 256;

/// Cumulative provider call counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedStats {
    pub calls: u64,
    pub successes: u64,
    pub errors: u64,
}

/// Polls a [`QuoteProvider`] on a fixed interval and keeps the last-known
/// price per tracked asset.
///
/// A failed or empty refresh leaves the previous prices in place. Each
/// successfully updated quote is also broadcast as a [`PriceSample`] to any
/// subscribers.
pub struct PriceFeed {
    provider: Arc<dyn QuoteProvider>,
    assets: Vec<Asset>,
    prices: RwLock<HashMap<Asset, f64>>,
    samples: broadcast::Sender<PriceSample>,
    calls: AtomicU64,
    successes: AtomicU64,
    errors: AtomicU64,
    poll: Mutex<Option<JoinHandle<()>>>,
}

impl PriceFeed {
    pub fn new(provider: Arc<dyn QuoteProvider>, assets: Vec<Asset>) -> Self {
        let (samples, _) = broadcast::channel(SAMPLE_CHANNEL_CAPACITY);
        Self {
            provider,
            assets,
            prices: RwLock::new(HashMap::new()),
            samples,
            calls: AtomicU64::new(0),
            successes: AtomicU64::new(0),
            errors: AtomicU64::new(0),
            poll: Mutex::new(None),
        }
    }

    /// Spawn the background polling task. The first fetch happens
    /// immediately; subsequent fetches follow the interval. Calling this
    /// twice replaces nothing: the second call is a no-op.
    pub fn start(self: &Arc<Self>, interval: Duration) {
        let mut poll = self.poll.lock().unwrap_or_else(|e| e.into_inner());
        if poll.is_some() {
            return;
        }

        let feed = Arc::clone(self);
        *poll = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                feed.refresh_once().await;
            }
        }));
    }

    /// One refresh cycle against the provider.
    pub async fn refresh_once(&self) {
        self.calls.fetch_add(1, Ordering::Relaxed);

        match self.provider.fetch_batch(&self.assets).await {
            Ok(quotes) if !quotes.is_empty() => {
                self.successes.fetch_add(1, Ordering::Relaxed);
                let timestamp = Utc::now();
                {
                    let mut prices = self.prices.write().unwrap_or_else(|e| e.into_inner());
                    prices.extend(quotes.iter().map(|(&asset, &price)| (asset, price)));
                }
                debug!(
                    provider = self.provider.name(),
                    updated = quotes.len(),
                    "Refreshed quotes"
                );
                for (&asset, &price) in &quotes {
                    // Lagging or absent subscribers are not the feed's problem.
                    let _ = self.samples.send(PriceSample {
                        asset,
                        price,
                        timestamp,
                    });
                }
            }
            Ok(_) => {
                self.errors.fetch_add(1, Ordering::Relaxed);
                warn!(
                    provider = self.provider.name(),
                    "Provider returned no tracked assets; keeping stale prices"
                );
            }
            Err(e) => {
                self.errors.fetch_add(1, Ordering::Relaxed);
                warn!(
                    provider = self.provider.name(),
                    error = %e,
                    "Quote refresh failed; keeping stale prices"
                );
            }
        }
    }

    /// Last-known price for an asset, if any refresh has delivered one.
    pub fn price(&self, asset: Asset) -> Option<f64> {
        self.prices
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&asset)
            .copied()
    }

    /// Snapshot of every last-known price.
    pub fn all_prices(&self) -> HashMap<Asset, f64> {
        self.prices
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Subscribe to per-quote updates.
    pub fn subscribe(&self) -> broadcast::Receiver<PriceSample> {
        self.samples.subscribe()
    }

    pub fn stats(&self) -> FeedStats {
        FeedStats {
            calls: self.calls.load(Ordering::Relaxed),
            successes: self.successes.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }

    /// Stop the polling task. Idempotent; last-known prices stay readable.
    pub fn close(&self) {
        let mut poll = self.poll.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = poll.take() {
            handle.abort();
        }
    }
}

impl Drop for PriceFeed {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::error::FeedError;
    use async_trait::async_trait;
    use std::collections::VecDeque;

    /// Provider that replays a scripted sequence of batch results.
    struct ScriptedProvider {
        script: Mutex<VecDeque<Result<HashMap<Asset, f64>, FeedError>>>,
    }

    impl ScriptedProvider {
        fn new(script: Vec<Result<HashMap<Asset, f64>, FeedError>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
            })
        }
    }

    #[async_trait]
    impl QuoteProvider for ScriptedProvider {
        async fn fetch_batch(
            &self,
            _assets: &[Asset],
        ) -> Result<HashMap<Asset, f64>, FeedError> {
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(HashMap::new()))
        }

        fn name(&self) -> &str {
            "Scripted"
        }
    }

    fn quotes(entries: &[(Asset, f64)]) -> Result<HashMap<Asset, f64>, FeedError> {
        Ok(entries.iter().copied().collect())
    }

    #[tokio::test]
    async fn test_refresh_updates_prices_and_counters() {
        let provider = ScriptedProvider::new(vec![quotes(&[
            (Asset::Btc, 50_000.0),
            (Asset::Eth, 3_000.0),
        ])]);
        let feed = PriceFeed::new(provider, vec![Asset::Btc, Asset::Eth]);

        feed.refresh_once().await;

        assert_eq!(feed.price(Asset::Btc), Some(50_000.0));
        assert_eq!(feed.price(Asset::Eth), Some(3_000.0));
        assert_eq!(
            feed.stats(),
            FeedStats {
                calls: 1,
                successes: 1,
                errors: 0
            }
        );
    }

    #[tokio::test]
    async fn test_partial_response_keeps_other_assets_stale() {
        let provider = ScriptedProvider::new(vec![
            quotes(&[(Asset::Btc, 50_000.0), (Asset::Eth, 3_000.0)]),
            quotes(&[(Asset::Btc, 51_000.0)]),
        ]);
        let feed = PriceFeed::new(provider, vec![Asset::Btc, Asset::Eth]);

        feed.refresh_once().await;
        feed.refresh_once().await;

        assert_eq!(feed.price(Asset::Btc), Some(51_000.0));
        // ETH was absent from the second batch and keeps its old quote.
        assert_eq!(feed.price(Asset::Eth), Some(3_000.0));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_stale_prices() {
        let provider = ScriptedProvider::new(vec![
            quotes(&[(Asset::Btc, 50_000.0)]),
            Err(FeedError::Timeout),
        ]);
        let feed = PriceFeed::new(provider, vec![Asset::Btc]);

        feed.refresh_once().await;
        feed.refresh_once().await;

        assert_eq!(feed.price(Asset::Btc), Some(50_000.0));
        assert_eq!(
            feed.stats(),
            FeedStats {
                calls: 2,
                successes: 1,
                errors: 1
            }
        );
    }

    #[tokio::test]
    async fn test_empty_response_counts_as_error() {
        let provider = ScriptedProvider::new(vec![quotes(&[])]);
        let feed = PriceFeed::new(provider, vec![Asset::Btc]);

        feed.refresh_once().await;

        assert_eq!(feed.price(Asset::Btc), None);
        assert_eq!(feed.stats().errors, 1);
    }

    #[tokio::test]
    async fn test_subscribers_receive_samples() {
        let provider = ScriptedProvider::new(vec![quotes(&[(Asset::Sol, 150.0)])]);
        let feed = PriceFeed::new(provider, vec![Asset::Sol]);
        let mut rx = feed.subscribe();

        feed.refresh_once().await;

        let sample = rx.recv().await.unwrap();
        assert_eq!(sample.asset, Asset::Sol);
        assert!((sample.price - 150.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_polling_task_fetches_immediately() {
        let provider = ScriptedProvider::new(vec![quotes(&[(Asset::Btc, 50_000.0)])]);
        let feed = Arc::new(PriceFeed::new(provider, vec![Asset::Btc]));

        feed.start(Duration::from_secs(60));
        tokio::time::timeout(Duration::from_secs(1), async {
            while feed.price(Asset::Btc).is_none() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();

        feed.close();
        feed.close(); // idempotent
        assert_eq!(feed.price(Asset::Btc), Some(50_000.0));
    }
}
