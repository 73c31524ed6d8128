//! Technical indicators for the arena simulator.
//!
//! Pure, deterministic functions over ordered price series:
//! - Exponential moving average (EMA)
//! - Relative strength index (RSI)
//! - Average true range (ATR)
//!
//! The simulator has no OHLC data, only per-tick close prices. Callers
//! therefore pass the same close series as highs, lows and closes where an
//! indicator nominally wants a full bar; the degenerate arithmetic that
//! results is documented on each indicator.

mod momentum;
mod moving_average;
mod volatility;

pub use momentum::Rsi;
pub use moving_average::Ema;
pub use volatility::Atr;
