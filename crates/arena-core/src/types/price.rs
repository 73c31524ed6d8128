//! Price samples and per-model price history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Asset;

/// Default bound on the number of samples retained per asset.
pub const HISTORY_CAPACITY: usize = 100;

/// A single observed quote, append-only once produced by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    pub asset: Asset,
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}

/// Bounded per-asset price history.
///
/// Each model owns its own history even though all models observe the same
/// quote stream: a model only records the prices of the ticks it actually
/// evaluated, so histories are not shared or deduplicated across models.
/// Oldest samples are evicted first once an asset's series reaches capacity.
#[derive(Debug, Clone)]
pub struct PriceHistory {
    capacity: usize,
    series: HashMap<Asset, Vec<f64>>,
}

impl PriceHistory {
    /// Create a history with the default capacity of 100 samples per asset.
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// Create a history with a custom per-asset capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than 0");
        Self {
            capacity,
            series: HashMap::new(),
        }
    }

    /// Record one price per asset from a tick's price snapshot.
    pub fn record(&mut self, prices: &HashMap<Asset, f64>) {
        for (&asset, &price) in prices {
            let series = self.series.entry(asset).or_default();
            series.push(price);
            if series.len() > self.capacity {
                series.remove(0);
            }
        }
    }

    /// The recorded series for an asset, oldest first. Empty when the asset
    /// has never been observed.
    pub fn series(&self, asset: Asset) -> &[f64] {
        self.series.get(&asset).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of samples recorded for an asset.
    pub fn len(&self, asset: Asset) -> usize {
        self.series.get(&asset).map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl Default for PriceHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prices_of(price: f64) -> HashMap<Asset, f64> {
        HashMap::from([(Asset::Btc, price)])
    }

    #[test]
    fn test_record_appends_in_order() {
        let mut history = PriceHistory::new();
        history.record(&prices_of(1.0));
        history.record(&prices_of(2.0));
        history.record(&prices_of(3.0));

        assert_eq!(history.series(Asset::Btc), &[1.0, 2.0, 3.0]);
        assert_eq!(history.len(Asset::Eth), 0);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = PriceHistory::with_capacity(3);
        for i in 0..5 {
            history.record(&prices_of(i as f64));
        }

        assert_eq!(history.series(Asset::Btc), &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_unseen_asset_is_empty_slice() {
        let history = PriceHistory::new();
        assert!(history.series(Asset::Xrp).is_empty());
    }
}
