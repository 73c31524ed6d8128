//! In-process store and snapshot sink implementations.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::broadcast;
use uuid::Uuid;

use arena_core::error::StoreError;
use arena_core::traits::{ModelStore, SnapshotSink};
use arena_core::types::{ModelState, PriceSample, TickSnapshot, Trade};

const SNAPSHOT_CHANNEL_CAPACITY: usize = 64;

/// In-memory [`ModelStore`].
///
/// The default store for a run without external persistence; also the
/// assertion point for scheduler tests.
#[derive(Default)]
pub struct MemoryStore {
    models: Mutex<HashMap<Uuid, ModelState>>,
    trades: Mutex<Vec<Trade>>,
    samples: Mutex<Vec<PriceSample>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(&self, id: Uuid) -> Option<ModelState> {
        self.models
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id)
            .cloned()
    }

    pub fn trades(&self) -> Vec<Trade> {
        self.trades.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn samples(&self) -> Vec<PriceSample> {
        self.samples
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl ModelStore for MemoryStore {
    async fn upsert_model(&self, model: &ModelState) -> Result<(), StoreError> {
        self.models
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(model.id, model.clone());
        Ok(())
    }

    async fn append_trade(&self, trade: &Trade) -> Result<(), StoreError> {
        self.trades
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(trade.clone());
        Ok(())
    }

    async fn append_price_sample(&self, sample: &PriceSample) -> Result<(), StoreError> {
        self.samples
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(*sample);
        Ok(())
    }
}

/// [`SnapshotSink`] backed by a tokio broadcast channel.
///
/// `emit` never blocks; snapshots sent while no receiver is subscribed are
/// discarded, and lagging receivers skip ahead per broadcast semantics.
pub struct BroadcastSink {
    sender: broadcast::Sender<TickSnapshot>,
}

impl BroadcastSink {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TickSnapshot> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastSink {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotSink for BroadcastSink {
    fn emit(&self, snapshot: &TickSnapshot) {
        let _ = self.sender.send(snapshot.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::types::{Asset, StrategyKind};
    use chrono::Utc;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        let model = ModelState::new("alpha", StrategyKind::Swing, 10_000.0);

        store.upsert_model(&model).await.unwrap();
        assert_eq!(store.model(model.id), Some(model.clone()));

        let sample = PriceSample {
            asset: Asset::Btc,
            price: 50_000.0,
            timestamp: Utc::now(),
        };
        store.append_price_sample(&sample).await.unwrap();
        assert_eq!(store.samples(), vec![sample]);
    }

    #[tokio::test]
    async fn test_broadcast_sink_delivers_to_subscribers() {
        let sink = BroadcastSink::new();
        let mut rx = sink.subscribe();

        let snapshot = TickSnapshot {
            timestamp: Utc::now(),
            tick: 1,
            prices: HashMap::new(),
            models: Vec::new(),
        };
        sink.emit(&snapshot);

        assert_eq!(rx.recv().await.unwrap().tick, 1);
    }

    #[test]
    fn test_emit_without_subscribers_is_fine() {
        let sink = BroadcastSink::new();
        sink.emit(&TickSnapshot {
            timestamp: Utc::now(),
            tick: 0,
            prices: HashMap::new(),
            models: Vec::new(),
        });
    }
}
