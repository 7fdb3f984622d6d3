//! Errors raised when parsing record fields from user input.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("Unknown tournament kind: {0} (expected veteran or beginner)")]
    UnknownTournamentKind(String),

    #[error("Unknown penalty type: {0} (expected regular or beginner)")]
    UnknownPenaltyType(String),

    #[error("Unknown scope: {0} (expected all, veteran or beginner)")]
    UnknownScope(String),

    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Player name must not be empty")]
    EmptyName,
}
