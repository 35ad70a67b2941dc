//! Export Results use case
//!
//! Produces an anonymous, aggregate-only snapshot of a decision suitable
//! for handing to compliance or reporting. Individual scores and evaluator
//! identities are never part of it.

use crate::ports::access_policy::AccessPolicy;
use crate::ports::evaluation_store::{BallotStats, EvaluationStore};
use crate::use_cases::error::EvaluationError;
use crate::use_cases::get_results::aggregate_decision;
use crate::use_cases::shared::visible_decision;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tally_domain::{DecisionId, DecisionStatus, EvaluatorId, OptionId, OptionScore};
use tracing::info;

/// Notice attached to every export
pub const PRIVACY_NOTICE: &str =
    "Individual evaluation scores are anonymized and not included in this export";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionSummary {
    pub id: DecisionId,
    pub title: String,
    pub status: DecisionStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionSummary {
    pub name: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSummary {
    pub id: OptionId,
    pub title: String,
}

/// Anonymous aggregate export of a decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsExport {
    pub decision: DecisionSummary,
    /// Heaviest criterion first
    pub criteria: Vec<CriterionSummary>,
    pub options: Vec<OptionSummary>,
    pub aggregate_results: Vec<OptionScore>,
    pub statistics: BallotStats,
    pub privacy_notice: String,
    pub exported_at: DateTime<Utc>,
}

/// Use case for exporting anonymous aggregate results
pub struct ExportResultsUseCase<S: EvaluationStore + ?Sized, A: AccessPolicy + ?Sized> {
    store: Arc<S>,
    access: Arc<A>,
}

impl<S: EvaluationStore + ?Sized, A: AccessPolicy + ?Sized> ExportResultsUseCase<S, A> {
    pub fn new(store: Arc<S>, access: Arc<A>) -> Self {
        Self { store, access }
    }

    pub async fn execute(
        &self,
        decision_id: DecisionId,
        caller: EvaluatorId,
    ) -> Result<ResultsExport, EvaluationError> {
        let decision = visible_decision(
            self.store.as_ref(),
            self.access.as_ref(),
            decision_id,
            caller,
        )
        .await?;

        let mut criteria = self.store.criteria(decision.id).await?;
        criteria.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        let options = self.store.options(decision.id).await?;
        let aggregate_results = aggregate_decision(self.store.as_ref(), &decision).await?;
        let statistics = self.store.ballot_stats(decision.id).await?;

        info!(
            "Exported aggregate results for decision {} ({} evaluations)",
            decision.id, statistics.total_evaluations
        );

        Ok(ResultsExport {
            decision: DecisionSummary {
                id: decision.id,
                title: decision.title,
                status: decision.status,
                created_at: decision.created_at,
            },
            criteria: criteria
                .into_iter()
                .map(|c| CriterionSummary {
                    name: c.name,
                    weight: c.weight,
                })
                .collect(),
            options: options
                .into_iter()
                .map(|o| OptionSummary {
                    id: o.id,
                    title: o.title,
                })
                .collect(),
            aggregate_results,
            statistics,
            privacy_notice: PRIVACY_NOTICE.to_string(),
            exported_at: Utc::now(),
        })
    }
}
