//! Core data types for the arena simulator.

mod asset;
mod model;
mod position;
mod price;
mod signal;
mod snapshot;
mod trade;

pub use asset::Asset;
pub use model::{ModelState, StrategyKind};
pub use position::{Position, PositionSide};
pub use price::{PriceHistory, PriceSample, HISTORY_CAPACITY};
pub use signal::{Signal, SignalAction};
pub use snapshot::{ModelSummary, TickSnapshot};
pub use trade::Trade;
