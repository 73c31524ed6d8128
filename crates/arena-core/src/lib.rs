//! Core types and traits for the arena simulator.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Asset, PriceSample, PriceHistory)
//! - Portfolio bookkeeping types (Position, ModelState, Trade)
//! - Trading signals and the aggregate tick snapshot
//! - Collaborator traits for policies, quote providers, persistence and broadcast

pub mod types;
pub mod traits;
pub mod error;

pub use error::{ArenaError, ArenaResult};
pub use types::*;
pub use traits::*;
