//! Participation status use case
//!
//! Reports how many eligible members have evaluated a decision, naming
//! roles rather than people.

use crate::ports::access_policy::AccessPolicy;
use crate::ports::evaluation_store::EvaluationStore;
use crate::ports::team_directory::TeamDirectory;
use crate::use_cases::error::EvaluationError;
use crate::use_cases::shared::{existing_decision, participation, visible_decision};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tally_domain::{DecisionId, EvaluatorId, ParticipationStatus};

/// Participation as seen by one team member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallerParticipation {
    #[serde(flatten)]
    pub status: ParticipationStatus,
    pub caller_has_evaluated: bool,
    /// Results become meaningful once anyone has evaluated
    pub can_view_results: bool,
}

/// Use case for participation queries
pub struct GetParticipationUseCase<S, D, A>
where
    S: EvaluationStore + ?Sized,
    D: TeamDirectory + ?Sized,
    A: AccessPolicy + ?Sized,
{
    store: Arc<S>,
    directory: Arc<D>,
    access: Arc<A>,
}

impl<S, D, A> GetParticipationUseCase<S, D, A>
where
    S: EvaluationStore + ?Sized,
    D: TeamDirectory + ?Sized,
    A: AccessPolicy + ?Sized,
{
    pub fn new(store: Arc<S>, directory: Arc<D>, access: Arc<A>) -> Self {
        Self {
            store,
            directory,
            access,
        }
    }

    /// Role-level participation for a decision.
    ///
    /// Trusted entry point: no caller, no access check.
    pub async fn status(&self, decision_id: DecisionId) -> Result<ParticipationStatus, EvaluationError> {
        let decision = existing_decision(self.store.as_ref(), decision_id).await?;
        participation(self.store.as_ref(), self.directory.as_ref(), &decision).await
    }

    /// Participation for a decision from the caller's point of view.
    pub async fn status_for(
        &self,
        decision_id: DecisionId,
        caller: EvaluatorId,
    ) -> Result<CallerParticipation, EvaluationError> {
        let decision = visible_decision(
            self.store.as_ref(),
            self.access.as_ref(),
            decision_id,
            caller,
        )
        .await?;
        let status = participation(self.store.as_ref(), self.directory.as_ref(), &decision).await?;
        let caller_has_evaluated = self.store.has_evaluated(decision.id, caller).await?;

        Ok(CallerParticipation {
            can_view_results: status.has_results(),
            status,
            caller_has_evaluated,
        })
    }
}
