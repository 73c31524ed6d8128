//! Periodic equal-weight rebalancing policy (the "balanced" kind).

use serde::{Deserialize, Serialize};

use arena_core::{
    error::StrategyError,
    traits::{Policy, PolicyContext},
    types::{Asset, Signal, StrategyKind},
};

/// Parameters for the rebalancing policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebalanceParams {
    /// The fixed subset held at equal weight.
    pub assets: Vec<Asset>,
    /// Rebalance whenever the executed-trade counter is a multiple of this.
    pub trade_interval: u64,
    /// Deviations below this fraction of total value are left alone.
    pub deviation_threshold: f64,
}

impl Default for RebalanceParams {
    fn default() -> Self {
        Self {
            assets: vec![Asset::Btc, Asset::Eth, Asset::Sol],
            trade_interval: 30,
            deviation_threshold: 0.05,
        }
    }
}

impl RebalanceParams {
    pub fn validate(&self) -> Result<(), StrategyError> {
        if self.assets.is_empty() {
            return Err(StrategyError::InvalidParams(
                "at least one asset required".into(),
            ));
        }
        if self.trade_interval == 0 {
            return Err(StrategyError::InvalidParams(
                "trade interval must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Every `trade_interval` executed trades, moves the portfolio toward an
/// equal split of total value across the asset subset. Only deviations
/// larger than the threshold are corrected; sell quantities are capped at
/// the held quantity.
///
/// A fresh model has a trade counter of zero, which is a multiple of the
/// interval, so the first evaluation may already rebalance.
pub struct RebalancePolicy {
    params: RebalanceParams,
}

impl RebalancePolicy {
    pub fn new(params: RebalanceParams) -> Self {
        Self { params }
    }
}

impl Policy for RebalancePolicy {
    fn name(&self) -> &str {
        "Rebalance"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Balanced
    }

    fn description(&self) -> &str {
        "Periodic equal-weight rebalancing across a fixed asset subset"
    }

    fn evaluate(&mut self, ctx: &PolicyContext<'_>) -> Vec<Signal> {
        if ctx.trade_count % self.params.trade_interval != 0 {
            return Vec::new();
        }

        let mut total_value = ctx.cash;
        for &asset in &self.params.assets {
            if let (Some(position), Some(&price)) =
                (ctx.positions.get(&asset), ctx.prices.get(&asset))
            {
                total_value += position.market_value(price);
            }
        }

        let target_value = total_value / self.params.assets.len() as f64;
        let mut signals = Vec::new();

        for &asset in &self.params.assets {
            let Some(&price) = ctx.prices.get(&asset) else {
                continue;
            };
            let current_value = ctx
                .positions
                .get(&asset)
                .map(|p| p.market_value(price))
                .unwrap_or(0.0);

            let diff = target_value - current_value;
            if diff.abs() <= total_value * self.params.deviation_threshold {
                continue;
            }

            if diff > 0.0 {
                signals.push(Signal::buy(asset, diff / price, price));
            } else if let Some(position) = ctx.positions.get(&asset) {
                let quantity = (diff.abs() / price).min(position.quantity);
                signals.push(Signal::sell(asset, quantity, price));
            }
        }

        signals
    }
}
