// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::{Move, MoveHistory};

/// Generate a random Move
pub fn any_move() -> impl Strategy<Value = Move> {
    prop_oneof![Just(Move::Rock), Just(Move::Paper), Just(Move::Scissors),]
}

/// Generate an ordered pair of moves
pub fn move_pair() -> impl Strategy<Value = (Move, Move)> {
    (any_move(), any_move())
}

/// Generate a history of up to `max_len` moves (possibly empty)
pub fn history(max_len: usize) -> impl Strategy<Value = MoveHistory> {
    prop::collection::vec(any_move(), 0..=max_len).prop_map(MoveHistory::from)
}

/// Generate a non-empty history of up to `max_len` moves
pub fn non_empty_history(max_len: usize) -> impl Strategy<Value = MoveHistory> {
    prop::collection::vec(any_move(), 1..=max_len.max(1)).prop_map(MoveHistory::from)
}
