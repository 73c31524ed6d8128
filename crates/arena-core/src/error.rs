//! Error types for the arena simulator.

use thiserror::Error;

/// Top-level simulator error.
#[derive(Error, Debug)]
pub enum ArenaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Strategy error: {0}")]
    Strategy(#[from] StrategyError),

    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Strategy-specific errors.
#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Unknown strategy kind: {0}")]
    UnknownKind(String),
}

/// Quote feed errors.
///
/// All of these are non-fatal to the simulation: a failed refresh cycle
/// leaves the last-known prices in place and is retried on the next
/// scheduled interval.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Quote request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

/// Persistence collaborator errors.
///
/// The engine treats every store call as best-effort; these are logged
/// and never propagated into the tick loop.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Store error: {0}")]
    Internal(String),
}

/// Result type alias for simulator operations.
pub type ArenaResult<T> = Result<T, ArenaError>;
