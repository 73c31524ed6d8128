//! EMA-crossover momentum policy with an ATR stop.

use serde::{Deserialize, Serialize};

use arena_core::{
    error::StrategyError,
    traits::{Policy, PolicyContext},
    types::{Asset, Signal, StrategyKind},
};
use arena_indicators::{Atr, Ema};

/// Parameters for the momentum policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MomentumParams {
    /// Assets this policy trades.
    pub assets: Vec<Asset>,
    /// Fast EMA period.
    pub fast_ema_period: usize,
    /// Slow EMA period.
    pub slow_ema_period: usize,
    /// ATR period for the stop level.
    pub atr_period: usize,
    /// Stop distance in ATR multiples below entry.
    pub atr_stop_multiple: f64,
    /// Fraction of cash committed per entry.
    pub cash_fraction: f64,
    /// Entries below this notional are skipped.
    pub min_notional: f64,
    /// Samples required before the policy acts on an asset.
    pub min_history: usize,
}

impl Default for MomentumParams {
    fn default() -> Self {
        Self {
            assets: vec![Asset::Btc, Asset::Eth, Asset::Sol],
            fast_ema_period: 12,
            slow_ema_period: 26,
            atr_period: 14,
            atr_stop_multiple: 1.5,
            cash_fraction: 0.30,
            min_notional: 100.0,
            min_history: 26,
        }
    }
}

impl MomentumParams {
    pub fn validate(&self) -> Result<(), StrategyError> {
        if self.assets.is_empty() {
            return Err(StrategyError::InvalidParams(
                "at least one asset required".into(),
            ));
        }
        if self.fast_ema_period >= self.slow_ema_period {
            return Err(StrategyError::InvalidParams(
                "fast EMA period must be less than slow EMA period".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.cash_fraction) {
            return Err(StrategyError::InvalidParams(
                "cash fraction must be between 0 and 1".into(),
            ));
        }
        Ok(())
    }
}

/// Buys when the fast EMA crosses above the slow EMA; closes the full
/// position when price falls below `entry - atr_stop_multiple * ATR` or the
/// fast EMA drops back below the slow one.
pub struct MomentumPolicy {
    params: MomentumParams,
}

impl MomentumPolicy {
    pub fn new(params: MomentumParams) -> Self {
        Self { params }
    }
}

impl Policy for MomentumPolicy {
    fn name(&self) -> &str {
        "Momentum"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Momentum
    }

    fn description(&self) -> &str {
        "EMA crossover entries with an ATR-based stop loss"
    }

    fn evaluate(&mut self, ctx: &PolicyContext<'_>) -> Vec<Signal> {
        let mut signals = Vec::new();

        for &asset in &self.params.assets {
            let series = ctx.history.series(asset);
            if series.len() < self.params.min_history {
                continue;
            }
            let Some(&price) = ctx.prices.get(&asset) else {
                continue;
            };

            let Some(fast) = Ema::new(self.params.fast_ema_period).value(series) else {
                continue;
            };
            let Some(slow) = Ema::new(self.params.slow_ema_period).value(series) else {
                continue;
            };
            // Close-only data: the same series stands in for highs and lows.
            let atr = Atr::new(self.params.atr_period).value(series, series, series);

            if fast > slow && !ctx.has_position(asset) {
                let quantity = ctx.cash * self.params.cash_fraction / price;
                if quantity * price > self.params.min_notional {
                    signals.push(Signal::buy(asset, quantity, price));
                }
            }

            if let Some(position) = ctx.positions.get(&asset) {
                let stop = position.entry_price - atr * self.params.atr_stop_multiple;
                if price < stop || fast < slow {
                    signals.push(Signal::sell(asset, position.quantity, price));
                }
            }
        }

        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{context, positions_with, prices_with, record_series};
    use arena_core::types::{PriceHistory, SignalAction};

    #[test]
    fn test_params_validation() {
        assert!(MomentumParams::default().validate().is_ok());

        let bad = MomentumParams {
            fast_ema_period: 26,
            slow_ema_period: 12,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_flat_history_with_price_jump_does_not_buy() {
        // 30 identical samples then a sharp +5% jump in the current quote:
        // both EMAs still sit exactly on the flat level, so there is no
        // crossover to act on yet.
        let mut history = PriceHistory::new();
        record_series(&mut history, Asset::Btc, &vec![50_000.0; 30]);
        let prices = prices_with(&[(Asset::Btc, 52_500.0)]);
        let positions = positions_with(&[]);
        let ctx = context(&history, &prices, &positions, 10_000.0, 10_000.0, 0);

        let mut policy = MomentumPolicy::new(MomentumParams::default());
        assert!(policy.evaluate(&ctx).is_empty());
    }

    #[test]
    fn test_uptrend_produces_buy_sized_from_cash() {
        let mut history = PriceHistory::new();
        let series: Vec<f64> = (0..40).map(|i| 100.0 + i as f64 * 2.0).collect();
        record_series(&mut history, Asset::Btc, &series);
        let price = 200.0;
        let prices = prices_with(&[(Asset::Btc, price)]);
        let positions = positions_with(&[]);
        let ctx = context(&history, &prices, &positions, 10_000.0, 10_000.0, 0);

        let mut policy = MomentumPolicy::new(MomentumParams::default());
        let signals = policy.evaluate(&ctx);

        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].action, SignalAction::Buy);
        assert!((signals[0].quantity - 10_000.0 * 0.30 / price).abs() < 1e-9);
    }

    #[test]
    fn test_stop_loss_closes_full_position() {
        let mut history = PriceHistory::new();
        // Rising trend keeps the fast EMA above the slow one so only the
        // ATR stop can trigger the exit.
        let series: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        record_series(&mut history, Asset::Btc, &series);
        let prices = prices_with(&[(Asset::Btc, 10.0)]);
        let positions = positions_with(&[(Asset::Btc, 2.0, 139.0)]);
        let ctx = context(&history, &prices, &positions, 1_000.0, 1_020.0, 1);

        let mut policy = MomentumPolicy::new(MomentumParams::default());
        let signals = policy.evaluate(&ctx);

        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].action, SignalAction::Sell);
        assert_eq!(signals[0].quantity, 2.0);
    }

    #[test]
    fn test_skips_assets_below_warmup() {
        let mut history = PriceHistory::new();
        record_series(&mut history, Asset::Btc, &vec![100.0; 10]);
        let prices = prices_with(&[(Asset::Btc, 100.0)]);
        let positions = positions_with(&[]);
        let ctx = context(&history, &prices, &positions, 10_000.0, 10_000.0, 0);

        let mut policy = MomentumPolicy::new(MomentumParams::default());
        assert!(policy.evaluate(&ctx).is_empty());
    }
}
