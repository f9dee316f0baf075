//! Opponent trait definition.

use super::Predictor;
use crate::domain::{DomainError, Move};

/// Anything that can pick the AI's move from the player's history.
///
/// `choose` sees the history before the current round; `observe` is called
/// exactly once per scored round with the history including the new move.
pub trait Opponent: Send + Sync {
    fn choose(&mut self, history: &[Move]) -> Move;

    fn observe(&mut self, history: &[Move]) -> Result<(), DomainError>;
}

impl Opponent for Predictor {
    fn choose(&mut self, history: &[Move]) -> Move {
        self.predict(history)
    }

    fn observe(&mut self, history: &[Move]) -> Result<(), DomainError> {
        self.update(history)
    }
}
