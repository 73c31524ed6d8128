//! Strategy policy trait definitions.

use std::collections::HashMap;

use crate::types::{Asset, Position, PriceHistory, Signal, StrategyKind};

/// Read-only view of one model's world for a single tick.
///
/// Everything a policy may look at: the model's own price history, the
/// tick's immutable price snapshot, and the model's current holdings. A
/// policy never sees (or touches) other models' state.
#[derive(Debug)]
pub struct PolicyContext<'a> {
    pub history: &'a PriceHistory,
    pub prices: &'a HashMap<Asset, f64>,
    pub positions: &'a HashMap<Asset, Position>,
    pub cash: f64,
    /// Equity at the start of the tick, before any of this tick's signals
    /// are applied.
    pub equity: f64,
    /// Executed-trade counter (opened positions).
    pub trade_count: u64,
}

impl PolicyContext<'_> {
    pub fn has_position(&self, asset: Asset) -> bool {
        self.positions.contains_key(&asset)
    }
}

/// A model's decision rule.
///
/// Called once per tick per model. Implementations only produce intents;
/// all bookkeeping happens in the executor. `evaluate` takes `&mut self`
/// solely so randomized policies can advance their injected RNG; everything
/// else is expected to be a pure function of the context.
pub trait Policy: Send {
    /// Human-readable policy name.
    fn name(&self) -> &str;

    /// The kind this policy implements.
    fn kind(&self) -> StrategyKind;

    /// One-line description for listings.
    fn description(&self) -> &str {
        ""
    }

    /// Produce this tick's trade intents.
    fn evaluate(&mut self, ctx: &PolicyContext<'_>) -> Vec<Signal>;
}
