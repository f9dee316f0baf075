//! Core move types: Move, Outcome and the cyclic beats-relation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Number of distinct moves. Pattern-table count vectors are indexed by ordinal.
pub const MOVE_COUNT: usize = 3;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub const ALL: [Move; MOVE_COUNT] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Index in `[0, MOVE_COUNT)`. Rock < Paper < Scissors.
    pub const fn ordinal(self) -> usize {
        match self {
            Move::Rock => 0,
            Move::Paper => 1,
            Move::Scissors => 2,
        }
    }

    pub fn from_ordinal(ordinal: usize) -> Result<Self, DomainError> {
        Self::ALL
            .get(ordinal)
            .copied()
            .ok_or(DomainError::InvalidOrdinal(ordinal))
    }

    /// The move this one defeats.
    pub const fn beats(self) -> Move {
        match self {
            Move::Rock => Move::Scissors,
            Move::Scissors => Move::Paper,
            Move::Paper => Move::Rock,
        }
    }

    /// The move that defeats this one.
    pub const fn beaten_by(self) -> Move {
        match self {
            Move::Rock => Move::Paper,
            Move::Paper => Move::Scissors,
            Move::Scissors => Move::Rock,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Move {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" | "r" => Ok(Move::Rock),
            "paper" | "p" => Ok(Move::Paper),
            "scissors" | "s" => Ok(Move::Scissors),
            other => Err(DomainError::InvalidMove(other.to_string())),
        }
    }
}

/// Result of a single round, from the player's point of view.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    PlayerWins,
    AiWins,
    Tie,
}

impl Outcome {
    /// Resolve a round between the player's and the AI's move.
    pub fn resolve(player: Move, ai: Move) -> Self {
        if player == ai {
            Outcome::Tie
        } else if player.beats() == ai {
            Outcome::PlayerWins
        } else {
            Outcome::AiWins
        }
    }

    /// The same round seen from the other side of the table.
    pub fn flipped(self) -> Self {
        match self {
            Outcome::PlayerWins => Outcome::AiWins,
            Outcome::AiWins => Outcome::PlayerWins,
            Outcome::Tie => Outcome::Tie,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::PlayerWins => "player",
            Outcome::AiWins => "ai",
            Outcome::Tie => "tie",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
