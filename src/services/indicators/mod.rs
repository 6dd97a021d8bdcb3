//! Technical indicator calculations over a bar series.
//!
//! Every function is a pure computation addressed at a bar index so the
//! engine can evaluate both the current and the previous bar. Insufficient
//! history degrades to a defined neutral value rather than erroring.

pub mod atr;
pub mod rsi;
pub mod sma;
pub mod volume;

pub use atr::atr;
pub use rsi::rsi;
pub use sma::sma;
pub use volume::{global_avg_volume, median_volume, window_avg_volume};
