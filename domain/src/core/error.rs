//! Domain error types

use thiserror::Error;

/// Lowest accepted score value.
pub const SCORE_MIN: i64 = 1;
/// Highest accepted score value.
pub const SCORE_MAX: i64 = 10;
/// Lowest accepted confidence value.
pub const CONFIDENCE_MIN: i64 = 1;
/// Highest accepted confidence value.
pub const CONFIDENCE_MAX: i64 = 5;

/// Malformed input, always rejected before anything is written
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("An evaluation must contain at least one score")]
    EmptySubmission,

    #[error("Score {0} is outside the allowed range {SCORE_MIN}-{SCORE_MAX}")]
    ScoreOutOfRange(i64),

    #[error("Confidence {0} is outside the allowed range {CONFIDENCE_MIN}-{CONFIDENCE_MAX}")]
    ConfidenceOutOfRange(i64),

    #[error("Option {option} was scored more than once on criterion {criterion}")]
    DuplicateScore { option: String, criterion: String },

    #[error("Criterion weight must be a positive number, got {0}")]
    InvalidWeight(f64),

    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid {kind} id: {value}")]
    InvalidId { kind: &'static str, value: String },

    #[error("Unknown decision status: {0}")]
    UnknownStatus(String),
}

impl DomainError {
    /// Check if this error represents rejected user input
    pub fn is_validation(&self) -> bool {
        matches!(self, DomainError::Validation(_))
    }
}
