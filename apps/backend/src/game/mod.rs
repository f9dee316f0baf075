//! Session orchestration: countdown, capture, scoring and the win condition.
//!
//! A [`Session`] owns at most one running [`RoundLoop`]. The loop reads the
//! latest frame from a [`FrameSlot`], asks a classifier what it shows, plays
//! the round against an [`crate::ai::Opponent`] and reports everything as
//! [`GameEvent`]s through an [`EventSink`].

pub mod events;
pub mod frame_slot;
pub mod round_loop;
pub mod session;
pub mod sink;
pub mod state;

#[cfg(test)]
mod tests_session;

pub use events::{
    GameEvent, Play, RoundError, RoundResult, Scores, Winner, NO_HAND_MESSAGE,
    PROCESSING_ERROR_MESSAGE,
};
pub use frame_slot::FrameSlot;
pub use round_loop::{cooldown_after, LoopExit, RoundLoop};
pub use session::{Session, SessionDeps, SessionStatus, StatusCell};
pub use sink::EventSink;
pub use state::GameState;
