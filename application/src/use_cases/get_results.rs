//! Get Results use case
//!
//! Recomputes the full evaluation summary of a decision from the store on
//! every call. Nothing is cached and nothing is written.

use crate::ports::access_policy::AccessPolicy;
use crate::ports::evaluation_store::EvaluationStore;
use crate::ports::team_directory::TeamDirectory;
use crate::use_cases::error::EvaluationError;
use crate::use_cases::shared::{participation, visible_decision};
use std::sync::Arc;
use tally_domain::{Decision, DecisionId, EvaluationResults, EvaluatorId, OptionScore, aggregate};
use tracing::{debug, info, warn};

/// Use case for building evaluation results
pub struct GetResultsUseCase<S, D, A>
where
    S: EvaluationStore + ?Sized,
    D: TeamDirectory + ?Sized,
    A: AccessPolicy + ?Sized,
{
    store: Arc<S>,
    directory: Arc<D>,
    access: Arc<A>,
}

impl<S, D, A> GetResultsUseCase<S, D, A>
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

    /// Build the results for a decision the caller can see.
    ///
    /// Sparse data is never an error: no evaluations yields an empty
    /// option list, zero team consensus and no recommendation.
    pub async fn execute(
        &self,
        decision_id: DecisionId,
        caller: EvaluatorId,
    ) -> Result<EvaluationResults, EvaluationError> {
        let decision = visible_decision(
            self.store.as_ref(),
            self.access.as_ref(),
            decision_id,
            caller,
        )
        .await?;

        let participation =
            participation(self.store.as_ref(), self.directory.as_ref(), &decision).await?;
        let option_scores = aggregate_decision(self.store.as_ref(), &decision).await?;

        let results = EvaluationResults::assemble(decision.id, option_scores, participation);
        info!(
            "Results for decision {}: {} options scored, team consensus {:.2}, {} in conflict",
            decision.id,
            results.option_scores.len(),
            results.team_consensus,
            results.conflicts().count()
        );
        Ok(results)
    }
}

/// Aggregate a decision's stored scores against its current catalogue.
pub(crate) async fn aggregate_decision<S>(
    store: &S,
    decision: &Decision,
) -> Result<Vec<OptionScore>, EvaluationError>
where
    S: EvaluationStore + ?Sized,
{
    let options = store.options(decision.id).await?;
    let criteria = store.criteria(decision.id).await?;
    let scores = store.anonymous_scores(decision.id).await?;
    debug!(
        "Aggregating {} scores over {} options x {} criteria",
        scores.len(),
        options.len(),
        criteria.len()
    );

    let stale = scores
        .iter()
        .filter(|s| {
            !options.iter().any(|o| o.id == s.option_id)
                || !criteria.iter().any(|c| c.id == s.criterion_id)
        })
        .count();
    if stale > 0 {
        warn!(
            "Ignoring {} stale scores on decision {} (option or criterion replaced)",
            stale, decision.id
        );
    }

    Ok(aggregate(&options, &criteria, &scores))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::submit_evaluation::{SubmitEvaluationInput, SubmitEvaluationUseCase};
    use crate::use_cases::test_support::{InMemoryStore, Seeded};
    use tally_domain::{ConflictLevel, ScoreInput, TeamId};

    struct Harness {
        store: Arc<InMemoryStore>,
        team: TeamId,
        seeded: Seeded,
    }

    impl Harness {
        fn new(weights: &[f64], options: &[&str]) -> Self {
            let store = Arc::new(InMemoryStore::new());
            let team = TeamId::generate();
            let seeded = store.seed_decision(team, weights, options);
            Self { store, team, seeded }
        }

        fn member(&self, role: &str) -> EvaluatorId {
            self.store.add_member(self.team, role)
        }

        /// `values[option][criterion]`
        async fn submit(&self, evaluator: EvaluatorId, values: &[&[i64]]) {
            let options = &self.seeded.options;
            let criteria = &self.seeded.criteria;
            let scores = values
                .iter()
                .enumerate()
                .flat_map(move |(o, row)| {
                    row.iter()
                        .enumerate()
                        .map(move |(c, v)| ScoreInput::new(options[o].id, criteria[c].id, *v, 3))
                })
                .collect();
            SubmitEvaluationUseCase::new(Arc::clone(&self.store), Arc::clone(&self.store))
                .execute(SubmitEvaluationInput::new(
                    self.seeded.decision.id,
                    evaluator,
                    scores,
                ))
                .await
                .unwrap();
        }

        async fn results(&self, caller: EvaluatorId) -> EvaluationResults {
            GetResultsUseCase::new(
                Arc::clone(&self.store),
                Arc::clone(&self.store),
                Arc::clone(&self.store),
            )
            .execute(self.seeded.decision.id, caller)
            .await
            .unwrap()
        }
    }

    #[tokio::test]
    async fn test_no_data() {
        let h = Harness::new(&[1.0, 2.0], &["Refund", "Credit"]);
        let caller = h.member("ops");

        let results = h.results(caller).await;
        assert!(results.option_scores.is_empty());
        assert_eq!(results.team_consensus, 0.0);
        assert_eq!(results.recommended_option, None);
        assert_eq!(results.participation_rate, 0.0);
        assert_eq!(results.pending_from, vec!["ops"]);
    }

    #[tokio::test]
    async fn test_unanimous_team() {
        let h = Harness::new(&[1.0, 3.0], &["Refund"]);
        let members = [h.member("ops"), h.member("finance"), h.member("legal")];
        for member in members {
            h.submit(member, &[&[6, 6]]).await;
        }

        let results = h.results(members[0]).await;
        let option = &results.option_scores[0];
        assert_eq!(option.weighted_score, 6.0);
        assert_eq!(option.dispersion, 0.0);
        assert_eq!(option.consensus, 1.0);
        assert_eq!(option.conflict_level, ConflictLevel::None);
        assert_eq!(option.evaluator_count, 3);
        assert_eq!(results.team_consensus, 1.0);
        assert_eq!(results.participation_rate, 1.0);
        assert!(!results.needs_discussion());
    }

    #[tokio::test]
    async fn test_resubmission_is_not_double_counted() {
        let h = Harness::new(&[1.0], &["Refund"]);
        let ops = h.member("ops");
        h.submit(ops, &[&[2]]).await;
        h.submit(ops, &[&[9]]).await;

        let results = h.results(ops).await;
        let option = &results.option_scores[0];
        assert_eq!(option.evaluator_count, 1);
        assert_eq!(option.weighted_score, 9.0);
        assert_eq!(option.average_score, 9.0);
    }

    #[tokio::test]
    async fn test_disagreement_is_flagged() {
        let h = Harness::new(&[1.0], &["Refund", "Credit"]);
        let a = h.member("ops");
        let b = h.member("finance");
        h.submit(a, &[&[1], &[6]]).await;
        h.submit(b, &[&[9], &[6]]).await;

        let results = h.results(a).await;
        // Refund: mean 5, variance 16. Credit: mean 6, variance 0.
        let credit = h.seeded.options[1].id;
        assert_eq!(results.option_scores[0].option_id, credit);
        assert_eq!(results.recommended_option, Some(credit));
        assert_eq!(results.option_scores[1].conflict_level, ConflictLevel::High);
        assert_eq!(results.option_scores[1].consensus, 0.0);
        assert_eq!(results.team_consensus, 0.5);
        assert!(results.needs_discussion());
    }

    #[tokio::test]
    async fn test_recommendation_tie_break_follows_creation_order() {
        let h = Harness::new(&[1.0], &["Refund", "Credit"]);
        let ops = h.member("ops");
        h.submit(ops, &[&[7], &[7]]).await;

        let results = h.results(ops).await;
        assert_eq!(results.recommended_option, Some(h.seeded.options[0].id));
        assert_eq!(results.option_scores[0].rank, 1);
    }

    #[tokio::test]
    async fn test_replaced_options_orphan_old_scores() {
        let h = Harness::new(&[1.0], &["Refund"]);
        let ops = h.member("ops");
        h.submit(ops, &[&[8]]).await;

        h.store.replace_options(h.seeded.decision.id, &["Replacement"]);

        let results = h.results(ops).await;
        assert!(results.option_scores.is_empty());
        assert_eq!(results.recommended_option, None);
        assert_eq!(results.completed_by, vec!["ops"]);
    }

    #[tokio::test]
    async fn test_outsider_cannot_read_results() {
        let h = Harness::new(&[1.0], &["Refund"]);
        let outsider = h.store.add_member(TeamId::generate(), "ops");

        let err = GetResultsUseCase::new(
            Arc::clone(&h.store),
            Arc::clone(&h.store),
            Arc::clone(&h.store),
        )
        .execute(h.seeded.decision.id, outsider)
        .await
        .unwrap_err();
        assert!(err.is_not_found());
    }
}
