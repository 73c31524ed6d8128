//! Trait seams between the engine and its collaborators.

mod policy;
mod quote;
mod sink;
mod store;

pub use policy::{Policy, PolicyContext};
pub use quote::QuoteProvider;
pub use sink::SnapshotSink;
pub use store::ModelStore;
