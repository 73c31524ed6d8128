//! Shared fixtures for policy tests.

use chrono::Utc;
use std::collections::HashMap;

use arena_core::traits::PolicyContext;
use arena_core::types::{Asset, Position, PositionSide, PriceHistory};

pub fn record_series(history: &mut PriceHistory, asset: Asset, series: &[f64]) {
    for &price in series {
        history.record(&HashMap::from([(asset, price)]));
    }
}

pub fn prices_with(entries: &[(Asset, f64)]) -> HashMap<Asset, f64> {
    entries.iter().copied().collect()
}

pub fn positions_with(entries: &[(Asset, f64, f64)]) -> HashMap<Asset, Position> {
    entries
        .iter()
        .map(|&(asset, quantity, entry_price)| {
            (
                asset,
                Position {
                    asset,
                    quantity,
                    entry_price,
                    entry_time: Utc::now(),
                    leverage: 5,
                    side: PositionSide::Long,
                },
            )
        })
        .collect()
}

pub fn context<'a>(
    history: &'a PriceHistory,
    prices: &'a HashMap<Asset, f64>,
    positions: &'a HashMap<Asset, Position>,
    cash: f64,
    equity: f64,
    trade_count: u64,
) -> PolicyContext<'a> {
    PolicyContext {
        history,
        prices,
        positions,
        cash,
        equity,
        trade_count,
    }
}
