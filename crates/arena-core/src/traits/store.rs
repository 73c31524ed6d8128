//! Persistence collaborator contract.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::{ModelState, PriceSample, Trade};

/// Durable storage for models, trades and price samples.
///
/// Every call is best-effort from the engine's perspective: failures are
/// logged and counted by the caller but never abort simulation progress.
#[async_trait]
pub trait ModelStore: Send + Sync {
    /// Insert or update a model's state snapshot.
    async fn upsert_model(&self, model: &ModelState) -> Result<(), StoreError>;

    /// Append an immutable trade record.
    async fn append_trade(&self, trade: &Trade) -> Result<(), StoreError>;

    /// Append an observed price sample.
    async fn append_price_sample(&self, sample: &PriceSample) -> Result<(), StoreError>;
}
