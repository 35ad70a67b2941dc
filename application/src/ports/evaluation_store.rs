//! Evaluation store port
//!
//! Defines the interface to the durable store of decisions and evaluations.
//!
//! The store exposes two read paths that must never be merged:
//! - [`EvaluationStore::anonymous_scores`] returns score values with the
//!   evaluator stripped off.
//! - [`EvaluationStore::evaluators`] returns who has evaluated, without
//!   any score values.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tally_domain::{
    AnonymousScore, Criterion, Decision, DecisionId, EvaluationDraft, EvaluationId, EvaluatorId,
    ResponseOption,
};
use thiserror::Error;

/// Errors raised by a store adapter
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Stored data is corrupt: {0}")]
    Corrupt(String),

    #[error("Store task failed: {0}")]
    TaskFailed(String),
}

/// Anonymous counters over the evaluations of a decision
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BallotStats {
    pub total_evaluations: usize,
    /// Mean confidence across every stored score, if any exist
    pub average_confidence: Option<f64>,
}

/// Durable store of decisions, their catalogue and their evaluations
///
/// Implementations live in the infrastructure layer.
#[async_trait]
pub trait EvaluationStore: Send + Sync {
    /// Look up a decision
    async fn decision(&self, id: DecisionId) -> Result<Option<Decision>, StoreError>;

    /// Current criteria of a decision, in creation order
    async fn criteria(&self, id: DecisionId) -> Result<Vec<Criterion>, StoreError>;

    /// Current options of a decision, in creation order
    async fn options(&self, id: DecisionId) -> Result<Vec<ResponseOption>, StoreError>;

    /// Atomically replace the evaluator's evaluation for the decision.
    ///
    /// Any existing evaluation is deleted and the draft's scores inserted in
    /// one transaction. Readers see either the old or the new evaluation,
    /// never a mix or neither.
    async fn replace_evaluation(&self, draft: &EvaluationDraft)
    -> Result<EvaluationId, StoreError>;

    /// Every stored score for the decision, without evaluator identity
    async fn anonymous_scores(&self, id: DecisionId) -> Result<Vec<AnonymousScore>, StoreError>;

    /// Distinct evaluators with an evaluation on file for the decision
    async fn evaluators(&self, id: DecisionId) -> Result<Vec<EvaluatorId>, StoreError>;

    /// Whether the evaluator has an evaluation on file for the decision
    async fn has_evaluated(
        &self,
        id: DecisionId,
        evaluator: EvaluatorId,
    ) -> Result<bool, StoreError>;

    /// Anonymous evaluation counters for the decision
    async fn ballot_stats(&self, id: DecisionId) -> Result<BallotStats, StoreError>;
}
