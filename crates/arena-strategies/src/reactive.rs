//! Short-window reactive policy.

use serde::{Deserialize, Serialize};

use arena_core::{
    error::StrategyError,
    traits::{Policy, PolicyContext},
    types::{Asset, Signal, StrategyKind},
};

/// Parameters for the reactive policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactiveParams {
    pub assets: Vec<Asset>,
    /// Number of trailing samples averaged as the short-term reference.
    pub window: usize,
    /// Buy when the deviation from the window mean exceeds this fraction.
    pub buy_threshold: f64,
    /// Sell when the deviation falls below this (negative) fraction.
    pub sell_threshold: f64,
    pub cash_fraction: f64,
    pub min_notional: f64,
}

impl Default for ReactiveParams {
    fn default() -> Self {
        Self {
            assets: vec![Asset::Btc, Asset::Eth, Asset::Sol, Asset::Bnb],
            window: 5,
            buy_threshold: 0.005,
            sell_threshold: -0.003,
            cash_fraction: 0.20,
            min_notional: 50.0,
        }
    }
}

impl ReactiveParams {
    pub fn validate(&self) -> Result<(), StrategyError> {
        if self.assets.is_empty() {
            return Err(StrategyError::InvalidParams(
                "at least one asset required".into(),
            ));
        }
        if self.window == 0 {
            return Err(StrategyError::InvalidParams(
                "window must be greater than 0".into(),
            ));
        }
        if self.sell_threshold >= self.buy_threshold {
            return Err(StrategyError::InvalidParams(
                "sell threshold must be below buy threshold".into(),
            ));
        }
        Ok(())
    }
}

/// Chases short-term moves: buys when the current price runs ahead of the
/// recent mean, dumps the full position when it slips below it.
pub struct ReactivePolicy {
    params: ReactiveParams,
}

impl ReactivePolicy {
    pub fn new(params: ReactiveParams) -> Self {
        Self { params }
    }
}

impl Policy for ReactivePolicy {
    fn name(&self) -> &str {
        "Reactive"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Reactive
    }

    fn description(&self) -> &str {
        "Short-window deviation scalping"
    }

    fn evaluate(&mut self, ctx: &PolicyContext<'_>) -> Vec<Signal> {
        let mut signals = Vec::new();

        for &asset in &self.params.assets {
            let series = ctx.history.series(asset);
            if series.len() < self.params.window {
                continue;
            }
            let Some(&price) = ctx.prices.get(&asset) else {
                continue;
            };

            let recent = &series[series.len() - self.params.window..];
            let mean = recent.iter().sum::<f64>() / self.params.window as f64;
            if mean == 0.0 {
                continue;
            }
            let deviation = (price - mean) / mean;

            if deviation > self.params.buy_threshold && !ctx.has_position(asset) {
                let quantity = ctx.cash * self.params.cash_fraction / price;
                if quantity * price > self.params.min_notional {
                    signals.push(Signal::buy(asset, quantity, price));
                }
            } else if deviation < self.params.sell_threshold {
                if let Some(position) = ctx.positions.get(&asset) {
                    signals.push(Signal::sell(asset, position.quantity, price));
                }
            }
        }

        signals
    }
}
