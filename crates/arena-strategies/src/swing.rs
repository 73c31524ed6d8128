//! Trend-following swing policy.

use serde::{Deserialize, Serialize};

use arena_core::{
    error::StrategyError,
    traits::{Policy, PolicyContext},
    types::{Asset, Signal, StrategyKind},
};
use arena_indicators::Ema;

/// Parameters for the swing policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwingParams {
    pub assets: Vec<Asset>,
    pub ema_period: usize,
    /// Entry requires price above `ema * entry_premium`.
    pub entry_premium: f64,
    /// Exit when price drops below `entry_price * stop_fraction`.
    pub stop_fraction: f64,
    pub cash_fraction: f64,
    pub min_notional: f64,
}

impl Default for SwingParams {
    fn default() -> Self {
        Self {
            assets: vec![Asset::Btc, Asset::Eth, Asset::Sol],
            ema_period: 20,
            entry_premium: 1.02,
            stop_fraction: 0.985,
            cash_fraction: 0.35,
            min_notional: 100.0,
        }
    }
}

impl SwingParams {
    pub fn validate(&self) -> Result<(), StrategyError> {
        if self.assets.is_empty() {
            return Err(StrategyError::InvalidParams(
                "at least one asset required".into(),
            ));
        }
        if self.stop_fraction >= 1.0 {
            return Err(StrategyError::InvalidParams(
                "stop fraction must be below 1".into(),
            ));
        }
        Ok(())
    }
}

/// Buys breakouts above the EMA and exits on a fixed stop below the entry
/// price. The stop is anchored to the entry price, not the post-entry peak,
/// so it never trails upward.
pub struct SwingPolicy {
    params: SwingParams,
}

impl SwingPolicy {
    pub fn new(params: SwingParams) -> Self {
        Self { params }
    }
}

impl Policy for SwingPolicy {
    fn name(&self) -> &str {
        "Swing"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Swing
    }

    fn description(&self) -> &str {
        "EMA breakout entries with an entry-anchored stop"
    }

    fn evaluate(&mut self, ctx: &PolicyContext<'_>) -> Vec<Signal> {
        let mut signals = Vec::new();

        for &asset in &self.params.assets {
            let series = ctx.history.series(asset);
            let Some(ema) = Ema::new(self.params.ema_period).value(series) else {
                continue;
            };
            let Some(&price) = ctx.prices.get(&asset) else {
                continue;
            };

            if price > ema * self.params.entry_premium && !ctx.has_position(asset) {
                let quantity = ctx.cash * self.params.cash_fraction / price;
                if quantity * price > self.params.min_notional {
                    signals.push(Signal::buy(asset, quantity, price));
                }
            }

            if let Some(position) = ctx.positions.get(&asset) {
                if price < position.entry_price * self.params.stop_fraction {
                    signals.push(Signal::sell(asset, position.quantity, price));
                }
            }
        }

        signals
    }
}
