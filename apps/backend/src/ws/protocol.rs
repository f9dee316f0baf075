use serde::{Deserialize, Serialize};

use crate::domain::Move;
use crate::game::{GameEvent, RoundResult, Scores, Winner};
use crate::vision::{BoundingBox, Landmark};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    StartGame,
    Frame { image: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    Countdown {
        value: u32,
    },

    GameUpdate {
        error: Option<&'static str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        player_move: Option<Move>,
        #[serde(skip_serializing_if = "Option::is_none")]
        ai_move: Option<Move>,
        scores: Scores,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        landmarks: Vec<Landmark>,
        #[serde(skip_serializing_if = "Option::is_none")]
        bbox: Option<BoundingBox>,
    },

    GameOver {
        winner: Winner,
    },

    Error {
        code: ErrorCode,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadRequest,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "bad_request",
        }
    }
}

impl From<RoundResult> for ServerMsg {
    fn from(result: RoundResult) -> Self {
        let (error, player_move, ai_move) = match &result.play {
            Ok(play) => (None, Some(play.player), Some(play.ai)),
            Err(err) => (Some(err.user_message()), None, None),
        };
        ServerMsg::GameUpdate {
            error,
            player_move,
            ai_move,
            scores: result.scores,
            landmarks: result.landmarks,
            bbox: result.bbox,
        }
    }
}

impl From<GameEvent> for ServerMsg {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::Countdown { value } => ServerMsg::Countdown { value },
            GameEvent::Round(result) => result.into(),
            GameEvent::GameOver { winner, .. } => ServerMsg::GameOver { winner },
        }
    }
}
