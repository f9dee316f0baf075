//! Values the round loop produces: scores, round results and events.

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::domain::{Move, Outcome};
use crate::vision::{BoundingBox, Detection, Landmark};

pub const NO_HAND_MESSAGE: &str = "No hand detected";
pub const PROCESSING_ERROR_MESSAGE: &str = "A processing error occurred.";

/// Running score of one game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scores {
    pub ai: u32,
    pub player: u32,
}

impl Scores {
    pub fn max(&self) -> u32 {
        self.ai.max(self.player)
    }

    /// Credit the winner of a round. Ties change nothing.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::PlayerWins => self.player += 1,
            Outcome::AiWins => self.ai += 1,
            Outcome::Tie => {}
        }
    }

    /// Player wins only with a strictly higher score.
    pub fn winner(&self) -> Winner {
        if self.player > self.ai {
            Winner::Player
        } else {
            Winner::Ai
        }
    }
}

/// Serialized as `[ai, player]`.
impl Serialize for Scores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.ai, self.player].serialize(serializer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Winner {
    Player,
    #[serde(rename = "AI")]
    Ai,
}

/// Why a round produced no score change.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoundError {
    #[error("no frame received before the countdown ended")]
    NoFrame,
    #[error("no recognisable gesture in frame")]
    NoGesture,
    #[error("processing failed: {0}")]
    Processing(String),
}

impl RoundError {
    /// Text shown to the player.
    pub fn user_message(&self) -> &'static str {
        match self {
            RoundError::NoFrame | RoundError::NoGesture => NO_HAND_MESSAGE,
            RoundError::Processing(_) => PROCESSING_ERROR_MESSAGE,
        }
    }
}

/// A scored round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Play {
    pub player: Move,
    pub ai: Move,
    pub outcome: Outcome,
}

/// Everything reported about one finished round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundResult {
    /// 1-based round number within the game.
    pub round: u32,
    pub play: Result<Play, RoundError>,
    /// Scores after this round.
    pub scores: Scores,
    pub landmarks: Vec<Landmark>,
    pub bbox: Option<BoundingBox>,
}

impl RoundResult {
    pub fn scored(round: u32, play: Play, scores: Scores, detection: Detection) -> Self {
        Self {
            round,
            play: Ok(play),
            scores,
            landmarks: detection.landmarks,
            bbox: detection.bbox,
        }
    }

    pub fn void(round: u32, error: RoundError, scores: Scores, detection: Option<Detection>) -> Self {
        let detection = detection.unwrap_or_default();
        Self {
            round,
            play: Err(error),
            scores,
            landmarks: detection.landmarks,
            bbox: detection.bbox,
        }
    }

    pub fn error(&self) -> Option<&RoundError> {
        self.play.as_ref().err()
    }
}

/// Outbound events of one session, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Countdown { value: u32 },
    Round(RoundResult),
    GameOver { winner: Winner, scores: Scores },
}
