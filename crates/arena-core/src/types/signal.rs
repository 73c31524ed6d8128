//! Trade intents produced by policies.

use serde::{Deserialize, Serialize};

use super::Asset;

/// Direction of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalAction {
    Buy,
    Sell,
}

/// A proposed, not-yet-applied trade.
///
/// Signals are transient: produced by a policy and consumed by the executor
/// within the same tick. Validation (cash, held quantity) happens at
/// execution time, not here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub asset: Asset,
    pub action: SignalAction,
    /// Always positive.
    pub quantity: f64,
    /// The price the policy observed when it decided.
    pub price: f64,
}

impl Signal {
    pub fn buy(asset: Asset, quantity: f64, price: f64) -> Self {
        Self {
            asset,
            action: SignalAction::Buy,
            quantity,
            price,
        }
    }

    pub fn sell(asset: Asset, quantity: f64, price: f64) -> Self {
        Self {
            asset,
            action: SignalAction::Sell,
            quantity,
            price,
        }
    }

    /// Notional value of the intent.
    pub fn notional(&self) -> f64 {
        self.quantity * self.price
    }
}
