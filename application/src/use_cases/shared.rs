//! Shared helpers for the evaluation use cases.
//!
//! Decision lookup with access control, and the participation query both
//! the status and results use cases need.

use crate::ports::access_policy::AccessPolicy;
use crate::ports::evaluation_store::EvaluationStore;
use crate::ports::team_directory::TeamDirectory;
use crate::use_cases::error::EvaluationError;
use tally_domain::{Decision, DecisionId, EvaluatorId, ParticipationStatus};
use tracing::debug;

/// Load a decision, failing with `NotFound` if it does not exist.
pub(crate) async fn existing_decision<S>(
    store: &S,
    id: DecisionId,
) -> Result<Decision, EvaluationError>
where
    S: EvaluationStore + ?Sized,
{
    store
        .decision(id)
        .await?
        .ok_or_else(|| EvaluationError::decision_not_found(id))
}

/// Load a decision the caller is allowed to see.
///
/// A denied decision is indistinguishable from a missing one.
pub(crate) async fn visible_decision<S, A>(
    store: &S,
    access: &A,
    id: DecisionId,
    caller: EvaluatorId,
) -> Result<Decision, EvaluationError>
where
    S: EvaluationStore + ?Sized,
    A: AccessPolicy + ?Sized,
{
    let decision = existing_decision(store, id).await?;
    if !access.can_access(&decision, caller).await? {
        debug!("Access to decision {} denied", id);
        return Err(EvaluationError::decision_not_found(id));
    }
    Ok(decision)
}

/// Role-level participation summary for a decision.
pub(crate) async fn participation<S, D>(
    store: &S,
    directory: &D,
    decision: &Decision,
) -> Result<ParticipationStatus, EvaluationError>
where
    S: EvaluationStore + ?Sized,
    D: TeamDirectory + ?Sized,
{
    let members = directory.active_members(decision.team_id).await?;
    let evaluators = store.evaluators(decision.id).await?;
    Ok(ParticipationStatus::from_roster(&members, &evaluators))
}
