//! Augur - deterministic trading-signal engine over OHLCV candle history
//!
//! Turns a raw, possibly gappy candle sequence into a bounded indicator
//! series, classifies market conditions from it, scores the current and
//! previous bar, and resolves the scores into a trading action through a
//! tiered decision procedure. Every component is a pure function of its
//! inputs and an immutable [`Config`]; the engine performs no I/O and is
//! safe to invoke concurrently for different symbols.

pub mod config;
pub mod error;
pub mod services;
pub mod types;

pub use config::Config;
pub use error::{EngineError, Result};
pub use services::{evaluate, evaluate_all};
pub use types::*;
