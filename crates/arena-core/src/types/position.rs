//! Open position bookkeeping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Asset;

/// Position direction. The simulator only ever opens long positions; the
/// variant exists so persisted rows carry an explicit side rather than an
/// implied one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    Long,
}

/// An open position held by a model. At most one per (model, asset).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub asset: Asset,
    /// Always positive.
    pub quantity: f64,
    pub entry_price: f64,
    pub entry_time: DateTime<Utc>,
    /// Display-only multiplier, drawn at entry. Has no effect on any PnL
    /// arithmetic; whether it should is an open product question.
    pub leverage: u32,
    pub side: PositionSide,
}

impl Position {
    /// Mark-to-market value at the given price.
    pub fn market_value(&self, price: f64) -> f64 {
        self.quantity * price
    }

    /// Unrealized PnL at the given price.
    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        self.quantity * (price - self.entry_price)
    }
}
