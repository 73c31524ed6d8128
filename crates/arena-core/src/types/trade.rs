//! Immutable records of executed signals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Asset;

/// An executed trade.
///
/// Open and closed trades are distinct variants with fixed fields rather
/// than one record with optional exit columns; the serialized form carries
/// a `status` tag of `open` or `closed`. Records are terminal: a position
/// close emits a new `Closed` record, it never mutates the `Open` one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Trade {
    Open {
        id: Uuid,
        model_id: Uuid,
        asset: Asset,
        quantity: f64,
        entry_price: f64,
        entry_time: DateTime<Utc>,
    },
    Closed {
        id: Uuid,
        model_id: Uuid,
        asset: Asset,
        quantity: f64,
        entry_price: f64,
        exit_price: f64,
        pnl: f64,
        pnl_percent: f64,
        exit_time: DateTime<Utc>,
    },
}

impl Trade {
    pub fn asset(&self) -> Asset {
        match self {
            Trade::Open { asset, .. } | Trade::Closed { asset, .. } => *asset,
        }
    }

    pub fn model_id(&self) -> Uuid {
        match self {
            Trade::Open { model_id, .. } | Trade::Closed { model_id, .. } => *model_id,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Trade::Closed { .. })
    }

    /// Realized PnL, present only on closed trades.
    pub fn pnl(&self) -> Option<f64> {
        match self {
            Trade::Open { .. } => None,
            Trade::Closed { pnl, .. } => Some(*pnl),
        }
    }
}
