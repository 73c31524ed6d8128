//! Strategy catalogue and policy construction.

use serde_json::Value;

use arena_core::{error::StrategyError, traits::Policy, types::StrategyKind};

use crate::{
    ExploratoryParams, ExploratoryPolicy, MeanReversionParams, MeanReversionPolicy,
    MomentumParams, MomentumPolicy, ReactiveParams, ReactivePolicy, RebalanceParams,
    RebalancePolicy, SwingParams, SwingPolicy,
};

/// Catalogue entry describing one strategy kind.
#[derive(Debug, Clone)]
pub struct StrategyInfo {
    pub kind: StrategyKind,
    pub name: &'static str,
    pub description: &'static str,
    /// Default parameters as JSON, suitable for display or as an override base.
    pub default_params: Value,
}

/// Builds [`Policy`] instances from a [`StrategyKind`] and optional JSON
/// parameter overrides.
pub struct StrategyRegistry {
    /// Seed for policies that draw randomness. `None` seeds from entropy.
    seed: Option<u64>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Registry whose randomized policies are deterministic.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Catalogue of every available strategy kind.
    pub fn list(&self) -> Vec<StrategyInfo> {
        StrategyKind::ALL.iter().map(|&kind| self.get(kind)).collect()
    }

    pub fn get(&self, kind: StrategyKind) -> StrategyInfo {
        // Default params always serialize; the JSON values carry no NaNs or
        // map keys outside the asset enum.
        let default_params = match kind {
            StrategyKind::Momentum => serde_json::to_value(MomentumParams::default()),
            StrategyKind::Conservative => serde_json::to_value(MeanReversionParams::default()),
            StrategyKind::Balanced => serde_json::to_value(RebalanceParams::default()),
            StrategyKind::Reactive => serde_json::to_value(ReactiveParams::default()),
            StrategyKind::Swing => serde_json::to_value(SwingParams::default()),
            StrategyKind::Experimental => serde_json::to_value(ExploratoryParams::default()),
        }
        .unwrap_or(Value::Null);

        let (name, description) = match kind {
            StrategyKind::Momentum => ("Momentum", "EMA crossover entries with an ATR stop"),
            StrategyKind::Conservative => {
                ("Mean Reversion", "RSI oversold entries, overbought exits")
            }
            StrategyKind::Balanced => (
                "Rebalance",
                "Periodic equal-weight rebalancing across a fixed asset subset",
            ),
            StrategyKind::Reactive => ("Reactive", "Short-window deviation scalping"),
            StrategyKind::Swing => ("Swing", "EMA breakout entries with an entry-anchored stop"),
            StrategyKind::Experimental => (
                "Exploratory",
                "Random entries and exits at small per-tick probabilities",
            ),
        };

        StrategyInfo {
            kind,
            name,
            description,
            default_params,
        }
    }

    /// Builds a policy from explicit JSON parameters.
    pub fn create(&self, kind: StrategyKind, params: Value) -> Result<Box<dyn Policy>, StrategyError> {
        let invalid = |e: serde_json::Error| StrategyError::InvalidParams(e.to_string());

        let policy: Box<dyn Policy> = match kind {
            StrategyKind::Momentum => {
                let params: MomentumParams = serde_json::from_value(params).map_err(invalid)?;
                params.validate()?;
                Box::new(MomentumPolicy::new(params))
            }
            StrategyKind::Conservative => {
                let params: MeanReversionParams =
                    serde_json::from_value(params).map_err(invalid)?;
                params.validate()?;
                Box::new(MeanReversionPolicy::new(params))
            }
            StrategyKind::Balanced => {
                let params: RebalanceParams = serde_json::from_value(params).map_err(invalid)?;
                params.validate()?;
                Box::new(RebalancePolicy::new(params))
            }
            StrategyKind::Reactive => {
                let params: ReactiveParams = serde_json::from_value(params).map_err(invalid)?;
                params.validate()?;
                Box::new(ReactivePolicy::new(params))
            }
            StrategyKind::Swing => {
                let params: SwingParams = serde_json::from_value(params).map_err(invalid)?;
                params.validate()?;
                Box::new(SwingPolicy::new(params))
            }
            StrategyKind::Experimental => {
                let params: ExploratoryParams = serde_json::from_value(params).map_err(invalid)?;
                params.validate()?;
                match self.seed {
                    Some(seed) => Box::new(ExploratoryPolicy::seeded(params, seed)),
                    None => Box::new(ExploratoryPolicy::new(params)),
                }
            }
        };

        Ok(policy)
    }

    /// Builds a policy with its default parameters.
    pub fn create_default(&self, kind: StrategyKind) -> Box<dyn Policy> {
        let info = self.get(kind);
        self.create(kind, info.default_params)
            .expect("defaults are always valid")
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_covers_every_kind() {
        let registry = StrategyRegistry::new();
        let infos = registry.list();
        assert_eq!(infos.len(), StrategyKind::ALL.len());
        for info in &infos {
            assert!(!info.name.is_empty());
            assert!(info.default_params.is_object());
        }
    }

    #[test]
    fn test_create_default_for_every_kind() {
        let registry = StrategyRegistry::with_seed(42);
        for &kind in StrategyKind::ALL.iter() {
            let policy = registry.create_default(kind);
            assert_eq!(policy.kind(), kind);
        }
    }

    #[test]
    fn test_create_with_json_overrides() {
        let registry = StrategyRegistry::new();
        let params = json!({
            "assets": ["BTC"],
            "rsi_period": 7,
            "oversold": 25.0,
            "overbought": 75.0,
            "cash_fraction": 0.5,
            "min_notional": 10.0,
            "min_history": 10
        });
        let policy = registry
            .create(StrategyKind::Conservative, params)
            .unwrap();
        assert_eq!(policy.kind(), StrategyKind::Conservative);
    }

    #[test]
    fn test_invalid_params_are_rejected() {
        let registry = StrategyRegistry::new();
        let params = json!({
            "assets": [],
            "trade_interval": 30,
            "deviation_threshold": 0.05
        });
        assert!(registry.create(StrategyKind::Balanced, params).is_err());
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let registry = StrategyRegistry::new();
        let params = json!({ "assets": "not-a-list" });
        assert!(registry.create(StrategyKind::Momentum, params).is_err());
    }
}
