//! Market quote polling.
//!
//! [`PriceFeed`] owns a background task that refreshes a shared price map
//! from a [`QuoteProvider`](arena_core::traits::QuoteProvider) on a fixed
//! interval and fans each updated quote out over a broadcast channel. The
//! bundled provider talks to the CoinStats REST API.

mod coinstats;
mod feed;

pub use coinstats::CoinStatsProvider;
pub use feed::{FeedStats, PriceFeed};
