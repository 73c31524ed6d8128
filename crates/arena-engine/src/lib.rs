//! Signal execution and the tick scheduler.
//!
//! [`Executor`] applies a policy's signals to its model's portfolio;
//! [`Simulation`] owns the model set and drives one evaluation pass per
//! tick, fanning the resulting [`TickSnapshot`](arena_core::types::TickSnapshot)
//! out to listeners and persisting mutated state best-effort.

mod execution;
mod scheduler;
mod store;

pub use execution::Executor;
pub use scheduler::{ModelRuntime, Simulation, SimulationStatus};
pub use store::{BroadcastSink, MemoryStore};
