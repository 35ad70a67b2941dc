//! Domain layer for tally
//!
//! This crate contains the entities, value objects and the scoring policy.
//! It has no dependencies on storage or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Anonymous evaluation
//!
//! Every team member scores each response option of a decision against
//! weighted criteria. Scores are stored with the evaluator's identity for
//! participation tracking, but the scoring functions only ever see
//! [`AnonymousScore`] rows.
//!
//! ## Consensus and conflict
//!
//! - **Weighted score**: Σ(value × weight) / Σ(weight) per option
//! - **Dispersion**: population variance of the option's score values
//! - **Conflict level**: none / low / medium / high, from fixed thresholds

pub mod core;
pub mod decision;
pub mod evaluation;
pub mod scoring;

// Re-export commonly used types
pub use core::{
    error::{DomainError, ValidationError},
    ids::{CriterionId, DecisionId, EvaluationId, EvaluatorId, OptionId, TeamId},
};
pub use decision::{Criterion, Decision, DecisionStatus, ResponseOption, TeamMember};
pub use evaluation::{AnonymousScore, Confidence, EvaluationDraft, Score, ScoreInput, ScoreValue};
pub use scoring::{
    ConflictLevel, EvaluationResults, OptionScore, ParticipationStatus, aggregate, recommend,
};
