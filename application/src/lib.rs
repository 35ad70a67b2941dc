//! Application layer for tally
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    access_policy::{AccessPolicy, AllowAll},
    evaluation_store::{BallotStats, EvaluationStore, StoreError},
    team_directory::TeamDirectory,
};
pub use use_cases::error::EvaluationError;
pub use use_cases::export_results::{ExportResultsUseCase, PRIVACY_NOTICE, ResultsExport};
pub use use_cases::get_results::GetResultsUseCase;
pub use use_cases::participation::{CallerParticipation, GetParticipationUseCase};
pub use use_cases::submit_evaluation::{
    SubmitEvaluationInput, SubmitEvaluationOutput, SubmitEvaluationUseCase,
};
