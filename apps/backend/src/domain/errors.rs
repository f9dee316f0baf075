use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A pattern update was requested before any move was observed.
    EmptyHistory,
    InvalidMove(String),
    InvalidOrdinal(usize),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::EmptyHistory => write!(f, "move history is empty"),
            DomainError::InvalidMove(s) => write!(f, "invalid move: {s}"),
            DomainError::InvalidOrdinal(n) => write!(f, "move ordinal out of range: {n}"),
        }
    }
}

impl Error for DomainError {}
