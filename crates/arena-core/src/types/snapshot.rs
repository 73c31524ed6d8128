//! The aggregate per-tick snapshot.
//!
//! The snapshot's serialized shape is the only externally visible schema
//! the engine keeps stable; broadcast listeners and any query surface build
//! on it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Asset;

/// One model's line in the aggregate snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub name: String,
    pub equity: f64,
    pub pnl_percent: f64,
    pub trade_count: u64,
    pub win_rate_percent: f64,
}

/// Aggregate state emitted once per completed tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSnapshot {
    /// Serializes as an RFC 3339 timestamp string.
    pub timestamp: DateTime<Utc>,
    pub tick: u64,
    pub prices: HashMap<Asset, f64>,
    pub models: Vec<ModelSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_schema() {
        let snapshot = TickSnapshot {
            timestamp: "2024-01-01T00:00:05Z".parse().unwrap(),
            tick: 42,
            prices: HashMap::from([(Asset::Btc, 50_000.0)]),
            models: vec![ModelSummary {
                name: "alpha".to_string(),
                equity: 10_500.0,
                pnl_percent: 5.0,
                trade_count: 3,
                win_rate_percent: 66.7,
            }],
        };

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["timestamp"], "2024-01-01T00:00:05Z");
        assert_eq!(value["tick"], 42);
        assert_eq!(value["prices"]["BTC"], 50_000.0);
        assert_eq!(value["models"][0]["name"], "alpha");
        assert_eq!(value["models"][0]["pnl_percent"], 5.0);
        assert_eq!(value["models"][0]["trade_count"], 3);
        assert_eq!(value["models"][0]["win_rate_percent"], 66.7);
    }
}
