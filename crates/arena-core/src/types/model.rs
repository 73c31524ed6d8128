//! Per-model portfolio state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{Asset, Position};

/// The decision rule a model is bound to at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Momentum,
    Conservative,
    Balanced,
    Reactive,
    Swing,
    Experimental,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 6] = [
        StrategyKind::Momentum,
        StrategyKind::Conservative,
        StrategyKind::Balanced,
        StrategyKind::Reactive,
        StrategyKind::Swing,
        StrategyKind::Experimental,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Momentum => "momentum",
            StrategyKind::Conservative => "conservative",
            StrategyKind::Balanced => "balanced",
            StrategyKind::Reactive => "reactive",
            StrategyKind::Swing => "swing",
            StrategyKind::Experimental => "experimental",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "momentum" => Ok(StrategyKind::Momentum),
            "conservative" => Ok(StrategyKind::Conservative),
            "balanced" => Ok(StrategyKind::Balanced),
            "reactive" => Ok(StrategyKind::Reactive),
            "swing" => Ok(StrategyKind::Swing),
            "experimental" => Ok(StrategyKind::Experimental),
            other => Err(format!("unknown strategy kind: {other}")),
        }
    }
}

/// Portfolio state of one simulated model.
///
/// Created once at initialization, mutated every tick by the executor,
/// never deleted during a run. Equity is deliberately not a field: it is
/// recomputed from cash and positions at every observation point so it can
/// never drift from the ground truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelState {
    pub id: Uuid,
    pub name: String,
    pub strategy: StrategyKind,
    /// Never negative; buys that would overdraw are rejected whole.
    pub cash: f64,
    pub initial_capital: f64,
    pub positions: HashMap<Asset, Position>,
    /// Counts opened positions (buys).
    pub trade_count: u64,
    /// Counts closes with positive realized PnL.
    pub win_count: u64,
    pub last_trade_at: Option<DateTime<Utc>>,
}

impl ModelState {
    /// Create a fresh model with all capital in cash.
    pub fn new(name: impl Into<String>, strategy: StrategyKind, initial_capital: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            strategy,
            cash: initial_capital,
            initial_capital,
            positions: HashMap::new(),
            trade_count: 0,
            win_count: 0,
            last_trade_at: None,
        }
    }

    /// Cash plus the mark-to-market value of all open positions.
    ///
    /// Positions whose asset is missing from the snapshot are marked at
    /// their entry price; in practice the feed retains last-known prices,
    /// so this only matters before the first refresh completes.
    pub fn equity(&self, prices: &HashMap<Asset, f64>) -> f64 {
        let position_value: f64 = self
            .positions
            .values()
            .map(|p| p.market_value(*prices.get(&p.asset).unwrap_or(&p.entry_price)))
            .sum();
        self.cash + position_value
    }

    pub fn has_position(&self, asset: Asset) -> bool {
        self.positions.contains_key(&asset)
    }

    /// Total return relative to starting capital, in percent.
    pub fn pnl_percent(&self, prices: &HashMap<Asset, f64>) -> f64 {
        if self.initial_capital == 0.0 {
            return 0.0;
        }
        (self.equity(prices) - self.initial_capital) / self.initial_capital * 100.0
    }

    /// Winning closes as a percentage of opened trades.
    pub fn win_rate_percent(&self) -> f64 {
        if self.trade_count == 0 {
            return 0.0;
        }
        self.win_count as f64 / self.trade_count as f64 * 100.0
    }
}
