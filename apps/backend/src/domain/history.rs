//! Append-only record of a player's moves within one game.

use std::ops::Deref;

use crate::domain::moves::Move;

/// Ordered, append-only sequence of the player's moves.
///
/// Grows by exactly one element per scored round and is never shared
/// between sessions. Derefs to a slice so predictors can read it directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    moves: Vec<Move>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    pub fn last(&self) -> Option<Move> {
        self.moves.last().copied()
    }
}

impl Deref for MoveHistory {
    type Target = [Move];

    fn deref(&self) -> &Self::Target {
        &self.moves
    }
}

impl From<Vec<Move>> for MoveHistory {
    fn from(moves: Vec<Move>) -> Self {
        Self { moves }
    }
}

impl FromIterator<Move> for MoveHistory {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        Self {
            moves: iter.into_iter().collect(),
        }
    }
}
