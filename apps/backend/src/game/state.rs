//! Learned and scored state of one game.

use crate::ai::Opponent;
use crate::domain::{DomainError, Move, MoveHistory, Outcome};
use crate::game::events::{Play, Scores, Winner};

/// History, opponent model and scores for a single game.
///
/// Owned by exactly one round loop. Every method is synchronous, so a round
/// is scored and learned from without any suspension point in between.
pub struct GameState {
    history: MoveHistory,
    opponent: Box<dyn Opponent>,
    scores: Scores,
    rounds: u32,
    win_threshold: u32,
}

impl GameState {
    pub fn new(opponent: Box<dyn Opponent>, win_threshold: u32) -> Self {
        Self {
            history: MoveHistory::new(),
            opponent,
            scores: Scores::default(),
            rounds: 0,
            win_threshold,
        }
    }

    /// Score a recognised player move.
    ///
    /// The opponent picks from the history before `player` is appended and
    /// learns from it afterwards. Scores change only once both succeeded.
    pub fn play(&mut self, player: Move) -> Result<Play, DomainError> {
        let ai = self.opponent.choose(&self.history);
        let outcome = Outcome::resolve(player, ai);
        self.history.push(player);
        self.opponent.observe(&self.history)?;
        self.scores.record(outcome);
        Ok(Play {
            player,
            ai,
            outcome,
        })
    }

    /// Advance the round counter; returns the number of the round now being played.
    pub fn begin_round(&mut self) -> u32 {
        self.rounds += 1;
        self.rounds
    }

    pub fn is_over(&self) -> bool {
        self.scores.max() >= self.win_threshold
    }

    pub fn winner(&self) -> Winner {
        self.scores.winner()
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }
}
