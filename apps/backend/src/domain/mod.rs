//! Domain layer: moves, outcomes and move history.

pub mod errors;
pub mod history;
pub mod moves;

#[cfg(test)]
pub(crate) mod test_gens;

// Re-exports for ergonomics
pub use errors::DomainError;
pub use history::MoveHistory;
pub use moves::{Move, Outcome, MOVE_COUNT};
