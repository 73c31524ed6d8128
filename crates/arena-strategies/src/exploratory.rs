//! Randomized exploratory policy (the "experimental" kind).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use arena_core::{
    error::StrategyError,
    traits::{Policy, PolicyContext},
    types::{Asset, Signal, StrategyKind},
};

/// Parameters for the exploratory policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExploratoryParams {
    pub assets: Vec<Asset>,
    /// Probability per asset per tick of opening a position.
    pub open_probability: f64,
    /// Probability per asset per tick of closing a held position.
    pub close_probability: f64,
    pub cash_fraction: f64,
    pub min_notional: f64,
    /// Opens are skipped unless cash exceeds this fraction of equity.
    pub cash_reserve_fraction: f64,
}

impl Default for ExploratoryParams {
    fn default() -> Self {
        Self {
            assets: vec![
                Asset::Btc,
                Asset::Eth,
                Asset::Sol,
                Asset::Doge,
                Asset::Xrp,
            ],
            open_probability: 0.02,
            close_probability: 0.02,
            cash_fraction: 0.15,
            min_notional: 50.0,
            cash_reserve_fraction: 0.3,
        }
    }
}

impl ExploratoryParams {
    pub fn validate(&self) -> Result<(), StrategyError> {
        if self.assets.is_empty() {
            return Err(StrategyError::InvalidParams(
                "at least one asset required".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.open_probability)
            || !(0.0..=1.0).contains(&self.close_probability)
        {
            return Err(StrategyError::InvalidParams(
                "probabilities must be within [0, 1]".into(),
            ));
        }
        Ok(())
    }
}

/// Opens and closes positions at random with small per-tick probabilities.
///
/// A single uniform draw per asset decides both branches: the low end of the
/// unit interval opens, the high end closes, so the two can never fire on the
/// same draw.
pub struct ExploratoryPolicy {
    params: ExploratoryParams,
    rng: StdRng,
}

impl ExploratoryPolicy {
    pub fn new(params: ExploratoryParams) -> Self {
        Self {
            params,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic variant for tests.
    pub fn seeded(params: ExploratoryParams, seed: u64) -> Self {
        Self {
            params,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for ExploratoryPolicy {
    fn name(&self) -> &str {
        "Exploratory"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Experimental
    }

    fn description(&self) -> &str {
        "Random entries and exits at small per-tick probabilities"
    }

    fn evaluate(&mut self, ctx: &PolicyContext<'_>) -> Vec<Signal> {
        let mut signals = Vec::new();

        for &asset in &self.params.assets {
            let Some(&price) = ctx.prices.get(&asset) else {
                continue;
            };

            let roll = self.rng.gen::<f64>();

            if roll < self.params.open_probability
                && !ctx.has_position(asset)
                && ctx.cash > ctx.equity * self.params.cash_reserve_fraction
            {
                let quantity = ctx.cash * self.params.cash_fraction / price;
                if quantity * price > self.params.min_notional {
                    signals.push(Signal::buy(asset, quantity, price));
                }
            } else if roll > 1.0 - self.params.close_probability {
                if let Some(position) = ctx.positions.get(&asset) {
                    signals.push(Signal::sell(asset, position.quantity, price));
                }
            }
        }

        signals
    }
}
