//! AI opponent - learns the player's move sequences and counters them.
//!
//! This module provides:
//! - PatternTable: counts of which move followed each run of recent moves
//! - Predictor: longest-match-first pattern lookup with uniform fallback
//! - PredictorConfig: tunable order, threshold, exploration and seed
//! - Opponent: the seam the round loop plays against
//! - Seed derivation so each session gets its own random stream

pub mod config;
mod opponent;
pub mod pattern_table;
mod predictor;
pub mod seed_derivation;

#[cfg(test)]
mod tests_predictor;
#[cfg(test)]
mod tests_props_predictor;

pub use config::PredictorConfig;
pub use opponent::Opponent;
pub use pattern_table::{OutcomeCounts, PatternKey, PatternTable, MAX_ORDER_CAP};
pub use predictor::{Forecast, Predictor};
pub use seed_derivation::derive_predictor_seed;
