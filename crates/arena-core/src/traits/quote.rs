//! Quote provider contract.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::FeedError;
use crate::types::Asset;

/// External source of current prices.
///
/// One call covers the whole tracked set; the provider may return a subset
/// on partial success. The feed treats a missing asset as "not updated this
/// cycle", never as an error.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch current prices for the given assets in a single batched
    /// request.
    async fn fetch_batch(&self, assets: &[Asset]) -> Result<HashMap<Asset, f64>, FeedError>;

    /// Provider name for logs.
    fn name(&self) -> &str;
}
