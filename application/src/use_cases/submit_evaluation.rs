//! Submit Evaluation use case
//!
//! Validates a full set of scores and hands it to the store as a single
//! atomic replacement of the evaluator's previous evaluation.

use crate::ports::access_policy::AccessPolicy;
use crate::ports::evaluation_store::EvaluationStore;
use crate::use_cases::error::EvaluationError;
use crate::use_cases::shared::visible_decision;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tally_domain::{DecisionId, EvaluationDraft, EvaluationId, EvaluatorId, ScoreInput};
use tracing::{debug, info};

/// Input for the SubmitEvaluation use case
#[derive(Debug, Clone)]
pub struct SubmitEvaluationInput {
    pub decision_id: DecisionId,
    pub evaluator_id: EvaluatorId,
    pub scores: Vec<ScoreInput>,
}

impl SubmitEvaluationInput {
    pub fn new(decision_id: DecisionId, evaluator_id: EvaluatorId, scores: Vec<ScoreInput>) -> Self {
        Self {
            decision_id,
            evaluator_id,
            scores,
        }
    }
}

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitEvaluationOutput {
    pub evaluation_id: EvaluationId,
    pub score_count: usize,
    /// Whether an earlier evaluation by the same evaluator was replaced
    pub replaced: bool,
}

/// Use case for submitting (or re-submitting) an evaluation
pub struct SubmitEvaluationUseCase<S: EvaluationStore + ?Sized, A: AccessPolicy + ?Sized> {
    store: Arc<S>,
    access: Arc<A>,
}

impl<S: EvaluationStore + ?Sized, A: AccessPolicy + ?Sized> SubmitEvaluationUseCase<S, A> {
    pub fn new(store: Arc<S>, access: Arc<A>) -> Self {
        Self { store, access }
    }

    /// Execute the use case.
    ///
    /// Every check runs before the store is written to, so a failed
    /// submission never leaves a partial evaluation behind.
    pub async fn execute(
        &self,
        input: SubmitEvaluationInput,
    ) -> Result<SubmitEvaluationOutput, EvaluationError> {
        let decision = visible_decision(
            self.store.as_ref(),
            self.access.as_ref(),
            input.decision_id,
            input.evaluator_id,
        )
        .await?;

        let draft = EvaluationDraft::new(decision.id, input.evaluator_id, input.scores)?;
        self.check_references(&draft).await?;

        let replaced = self
            .store
            .has_evaluated(decision.id, input.evaluator_id)
            .await?;
        let evaluation_id = self.store.replace_evaluation(&draft).await?;

        info!(
            "Evaluation {} stored for decision {} ({} scores{})",
            evaluation_id,
            decision.id,
            draft.scores.len(),
            if replaced { ", replaced previous" } else { "" }
        );

        Ok(SubmitEvaluationOutput {
            evaluation_id,
            score_count: draft.scores.len(),
            replaced,
        })
    }

    /// Every scored option and criterion must belong to the decision's
    /// current catalogue.
    async fn check_references(&self, draft: &EvaluationDraft) -> Result<(), EvaluationError> {
        let options: HashSet<_> = self
            .store
            .options(draft.decision_id)
            .await?
            .into_iter()
            .map(|o| o.id)
            .collect();
        let criteria: HashSet<_> = self
            .store
            .criteria(draft.decision_id)
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect();

        for score in &draft.scores {
            if !options.contains(&score.option_id) {
                debug!("Rejecting score for unknown option {}", score.option_id);
                return Err(EvaluationError::NotFound(format!(
                    "Option {}",
                    score.option_id
                )));
            }
            if !criteria.contains(&score.criterion_id) {
                debug!("Rejecting score for unknown criterion {}", score.criterion_id);
                return Err(EvaluationError::NotFound(format!(
                    "Criterion {}",
                    score.criterion_id
                )));
            }
        }
        Ok(())
    }
}
