//! Variable-order pattern predictor.
//!
//! The predictor learns which move the player tends to throw after each run
//! of their recent moves, for every run length up to `max_order`. When asked
//! for a move it looks for the longest trusted run matching the tail of the
//! history, backing off to shorter runs, and counters the expected throw.
//! With no trusted run it plays uniformly at random.

use rand::prelude::*;
use tracing::trace;

use super::config::PredictorConfig;
use super::pattern_table::{PatternKey, PatternTable};
use crate::domain::{DomainError, Move, MOVE_COUNT};

/// What the model expects the player to throw next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forecast {
    /// Length of the pattern that produced the forecast.
    pub order: usize,
    /// The player's most likely next move.
    pub expected: Move,
    /// The move that beats `expected`.
    pub counter: Move,
}

/// Session-scoped opponent model.
///
/// Owns its pattern table and RNG; nothing here is shared between sessions.
#[derive(Debug)]
pub struct Predictor {
    config: PredictorConfig,
    table: PatternTable,
    rng: StdRng,
}

impl Predictor {
    /// Build a fresh predictor.
    ///
    /// `config.seed` seeds the RNG for reproducible fallback play; without
    /// it the RNG draws from OS entropy.
    pub fn new(config: PredictorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            table: PatternTable::new(),
            rng,
        }
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    pub fn table(&self) -> &PatternTable {
        &self.table
    }

    /// Learn from the newest move in `history`.
    ///
    /// `history` must already contain the move just observed. For each order
    /// `o` with `history.len() > o`, the `o` moves preceding the newest one
    /// are credited with it. Call exactly once per observed move.
    pub fn update(&mut self, history: &[Move]) -> Result<(), DomainError> {
        let (&outcome, before) = history.split_last().ok_or(DomainError::EmptyHistory)?;
        let deepest = self.config.max_order.min(before.len());
        for order in 1..=deepest {
            if let Some(key) = PatternKey::from_moves(&before[before.len() - order..]) {
                self.table.record(key, outcome);
            }
        }
        Ok(())
    }

    /// Query the model without touching the RNG.
    ///
    /// Returns `None` when no pattern matching the tail of `history` has been
    /// observed more than `significance_threshold` times.
    pub fn forecast(&self, history: &[Move]) -> Option<Forecast> {
        let longest = self.config.max_order.min(history.len());
        (1..=longest).rev().find_map(|order| {
            let key = PatternKey::from_moves(&history[history.len() - order..])?;
            let counts = self.table.counts(&key)?;
            if counts.total() <= self.config.significance_threshold {
                return None;
            }
            let expected = counts.most_likely();
            Some(Forecast {
                order,
                expected,
                counter: expected.beaten_by(),
            })
        })
    }

    /// Choose the AI's move for the coming round.
    ///
    /// `history` holds the player's moves before this round and may be empty.
    pub fn predict(&mut self, history: &[Move]) -> Move {
        if self.config.exploration > 0.0 && self.rng.random_bool(self.config.exploration) {
            trace!(history_len = history.len(), "predictor exploring");
            return self.random_move();
        }
        match self.forecast(history) {
            Some(forecast) => {
                trace!(
                    order = forecast.order,
                    expected = %forecast.expected,
                    counter = %forecast.counter,
                    "predictor matched pattern"
                );
                forecast.counter
            }
            None => self.random_move(),
        }
    }

    fn random_move(&mut self) -> Move {
        Move::ALL[self.rng.random_range(0..MOVE_COUNT)]
    }
}
