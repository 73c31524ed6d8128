//! Applies trade signals to a model's portfolio.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use uuid::Uuid;

use arena_core::types::{ModelState, Position, PositionSide, Signal, SignalAction, Trade};

/// Executes signals against model state.
///
/// All cash and position bookkeeping lives here; policies only produce
/// intents. Infeasible signals (overdrawing buys, sells with no position)
/// are dropped silently; the remaining signals in the batch still execute.
pub struct Executor {
    rng: StdRng,
}

impl Executor {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic variant for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Apply signals in order, returning one trade record per executed
    /// signal.
    pub fn execute(
        &mut self,
        model: &mut ModelState,
        signals: &[Signal],
        now: DateTime<Utc>,
    ) -> Vec<Trade> {
        let mut trades = Vec::new();

        for signal in signals {
            match signal.action {
                SignalAction::Buy => {
                    if let Some(trade) = self.execute_buy(model, signal, now) {
                        trades.push(trade);
                    }
                }
                SignalAction::Sell => {
                    if let Some(trade) = self.execute_sell(model, signal, now) {
                        trades.push(trade);
                    }
                }
            }
        }

        trades
    }

    fn execute_buy(
        &mut self,
        model: &mut ModelState,
        signal: &Signal,
        now: DateTime<Utc>,
    ) -> Option<Trade> {
        let cost = signal.quantity * signal.price;
        if cost > model.cash {
            debug!(
                model = %model.name,
                asset = %signal.asset,
                cost,
                cash = model.cash,
                "Buy rejected: insufficient cash"
            );
            return None;
        }

        model.cash -= cost;
        // A buy into an existing position replaces it wholesale; policies
        // gate entries on has_position, so this only matters for intents
        // that ignore that convention.
        model.positions.insert(
            signal.asset,
            Position {
                asset: signal.asset,
                quantity: signal.quantity,
                entry_price: signal.price,
                entry_time: now,
                leverage: self.rng.gen_range(5..=20),
                side: PositionSide::Long,
            },
        );
        model.trade_count += 1;
        model.last_trade_at = Some(now);

        Some(Trade::Open {
            id: Uuid::new_v4(),
            model_id: model.id,
            asset: signal.asset,
            quantity: signal.quantity,
            entry_price: signal.price,
            entry_time: now,
        })
    }

    fn execute_sell(
        &mut self,
        model: &mut ModelState,
        signal: &Signal,
        now: DateTime<Utc>,
    ) -> Option<Trade> {
        let Some(position) = model.positions.remove(&signal.asset) else {
            debug!(
                model = %model.name,
                asset = %signal.asset,
                "Sell dropped: no open position"
            );
            return None;
        };

        // PnL is computed over the signalled quantity, but the position is
        // always removed whole; partial exits do not exist here.
        let revenue = signal.quantity * signal.price;
        let cost = signal.quantity * position.entry_price;
        let pnl = revenue - cost;
        let pnl_percent = if cost == 0.0 { 0.0 } else { pnl / cost * 100.0 };

        model.cash += revenue;
        if pnl > 0.0 {
            model.win_count += 1;
        }
        model.last_trade_at = Some(now);

        Some(Trade::Closed {
            id: Uuid::new_v4(),
            model_id: model.id,
            asset: signal.asset,
            quantity: signal.quantity,
            entry_price: position.entry_price,
            exit_price: signal.price,
            pnl,
            pnl_percent,
            exit_time: now,
        })
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}
