//! Signal-derivation services.
//!
//! The pipeline runs strictly top-down: series construction, indicator
//! calculation, condition classification, threshold/score calculation,
//! action resolution, and finally per-symbol assembly. No component
//! mutates shared state.

pub mod analyzer;
pub mod classify;
pub mod indicators;
pub mod resolve;
pub mod score;

pub use analyzer::{evaluate, evaluate_all};
