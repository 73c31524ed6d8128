//! Strategy policy implementations.
//!
//! Six decision rules, one per [`arena_core::StrategyKind`]. Each policy is
//! a function of its model's own price history, the tick's price snapshot
//! and the model's holdings; sizing thresholds live in serde-able `*Params`
//! structs so scenario tests can override them.

mod exploratory;
mod mean_reversion;
mod momentum;
mod reactive;
mod rebalance;
mod registry;
mod swing;

#[cfg(test)]
mod test_support;

pub use exploratory::{ExploratoryParams, ExploratoryPolicy};
pub use mean_reversion::{MeanReversionParams, MeanReversionPolicy};
pub use momentum::{MomentumParams, MomentumPolicy};
pub use reactive::{ReactiveParams, ReactivePolicy};
pub use rebalance::{RebalanceParams, RebalancePolicy};
pub use registry::{StrategyInfo, StrategyRegistry};
pub use swing::{SwingParams, SwingPolicy};
