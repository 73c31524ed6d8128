//! CoinStats REST quote provider.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use arena_core::error::FeedError;
use arena_core::traits::QuoteProvider;
use arena_core::types::Asset;

/// Default public endpoint.
pub const DEFAULT_BASE_URL: &str = "https://openapiv1.coinstats.app";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// CoinStats `/coins` response envelope.
#[derive(Debug, Deserialize)]
struct CoinsResponse {
    result: Vec<CoinEntry>,
}

#[derive(Debug, Deserialize)]
struct CoinEntry {
    id: String,
    price: f64,
}

/// CoinStats coin identifier for a tracked asset.
fn coin_id(asset: Asset) -> &'static str {
    match asset {
        Asset::Btc => "bitcoin",
        Asset::Eth => "ethereum",
        Asset::Sol => "solana",
        Asset::Bnb => "binance-coin",
        Asset::Doge => "dogecoin",
        Asset::Xrp => "ripple",
    }
}

/// Quote provider backed by the CoinStats public API.
///
/// A single `/coins` request covers the whole tracked set; assets missing
/// from the response are simply absent from the returned map.
pub struct CoinStatsProvider {
    client: Client,
    base_url: String,
}

impl CoinStatsProvider {
    pub fn new(base_url: impl Into<String>, api_key: &str) -> Result<Self, FeedError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "X-API-KEY",
            header::HeaderValue::from_str(api_key)
                .map_err(|e| FeedError::Configuration(e.to_string()))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FeedError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl QuoteProvider for CoinStatsProvider {
    async fn fetch_batch(&self, assets: &[Asset]) -> Result<HashMap<Asset, f64>, FeedError> {
        let url = format!("{}/coins", self.base_url);

        let resp = self
            .client
            .get(&url)
            .query(&[("currency", "USD"), ("limit", "100")])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FeedError::Timeout
                } else {
                    FeedError::Network(e.to_string())
                }
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(FeedError::Network(format!("{}: {}", status, text)));
        }

        let data: CoinsResponse = resp
            .json()
            .await
            .map_err(|e| FeedError::MalformedResponse(e.to_string()))?;

        let by_id: HashMap<&str, f64> = data
            .result
            .iter()
            .map(|c| (c.id.as_str(), c.price))
            .collect();

        let mut prices = HashMap::new();
        for &asset in assets {
            if let Some(&price) = by_id.get(coin_id(asset)) {
                prices.insert(asset, price);
            } else {
                debug!(asset = %asset, "Asset missing from provider response");
            }
        }

        Ok(prices)
    }

    fn name(&self) -> &str {
        "CoinStats"
    }
}
