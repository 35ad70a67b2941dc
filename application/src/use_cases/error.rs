//! Errors shared by the evaluation use cases

use crate::ports::evaluation_store::StoreError;
use tally_domain::{DomainError, ValidationError};
use thiserror::Error;

/// Errors that can occur while submitting or reading evaluations
#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error("Invalid evaluation: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Persistence failed: {0}")]
    Persistence(#[from] StoreError),
}

impl EvaluationError {
    pub(crate) fn decision_not_found(id: impl std::fmt::Display) -> Self {
        EvaluationError::NotFound(format!("Decision {}", id))
    }

    /// Check if this error means the caller sent bad input
    pub fn is_validation(&self) -> bool {
        matches!(self, EvaluationError::Validation(_))
    }

    /// Check if this error means something does not exist or is hidden
    pub fn is_not_found(&self) -> bool {
        matches!(self, EvaluationError::NotFound(_))
    }
}

impl From<DomainError> for EvaluationError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::Validation(e) => EvaluationError::Validation(e),
            other => EvaluationError::NotFound(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(EvaluationError::from(ValidationError::EmptySubmission).is_validation());
        assert!(EvaluationError::decision_not_found("abc").is_not_found());
        assert!(!EvaluationError::Persistence(StoreError::Database("locked".into())).is_not_found());
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            EvaluationError::decision_not_found("abc").to_string(),
            "Decision abc not found"
        );
    }
}
