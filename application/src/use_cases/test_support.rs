//! In-memory port implementations for use case tests.

use crate::ports::access_policy::AccessPolicy;
use crate::ports::evaluation_store::{BallotStats, EvaluationStore, StoreError};
use crate::ports::team_directory::TeamDirectory;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tally_domain::{
    AnonymousScore, Criterion, Decision, DecisionId, EvaluationDraft, EvaluationId, EvaluatorId,
    ResponseOption, Score, TeamId, TeamMember,
};

struct StoredEvaluation {
    id: EvaluationId,
    decision_id: DecisionId,
    evaluator_id: EvaluatorId,
    scores: Vec<Score>,
}

#[derive(Default)]
struct State {
    decisions: HashMap<DecisionId, Decision>,
    criteria: HashMap<DecisionId, Vec<Criterion>>,
    options: HashMap<DecisionId, Vec<ResponseOption>>,
    members: Vec<TeamMember>,
    evaluations: Vec<StoredEvaluation>,
    fail_writes: bool,
}

/// A seeded decision and its catalogue
pub(crate) struct Seeded {
    pub decision: Decision,
    pub criteria: Vec<Criterion>,
    pub options: Vec<ResponseOption>,
}

/// Evaluation store, team directory and membership policy in one
#[derive(Default)]
pub(crate) struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_decision(&self, team: TeamId, weights: &[f64], options: &[&str]) -> Seeded {
        let decision = Decision::new(team, "Customer escalation").unwrap();
        let criteria: Vec<_> = weights
            .iter()
            .enumerate()
            .map(|(i, w)| Criterion::new(decision.id, format!("Criterion {}", i + 1), *w, i).unwrap())
            .collect();
        let options: Vec<_> = options
            .iter()
            .enumerate()
            .map(|(i, t)| ResponseOption::new(decision.id, *t, i).unwrap())
            .collect();

        let mut state = self.state.lock().unwrap();
        state.decisions.insert(decision.id, decision.clone());
        state.criteria.insert(decision.id, criteria.clone());
        state.options.insert(decision.id, options.clone());

        Seeded {
            decision,
            criteria,
            options,
        }
    }

    pub fn replace_options(&self, decision: DecisionId, titles: &[&str]) -> Vec<ResponseOption> {
        let options: Vec<_> = titles
            .iter()
            .enumerate()
            .map(|(i, t)| ResponseOption::new(decision, *t, i).unwrap())
            .collect();
        self.state
            .lock()
            .unwrap()
            .options
            .insert(decision, options.clone());
        options
    }

    pub fn add_member(&self, team: TeamId, role: &str) -> EvaluatorId {
        let id = EvaluatorId::generate();
        self.state.lock().unwrap().members.push(TeamMember {
            id,
            team_id: team,
            role: role.to_string(),
            active: true,
        });
        id
    }

    pub fn fail_writes(&self) {
        self.state.lock().unwrap().fail_writes = true;
    }

    pub fn stored_score_count(&self, decision: DecisionId) -> usize {
        self.state
            .lock()
            .unwrap()
            .evaluations
            .iter()
            .filter(|e| e.decision_id == decision)
            .map(|e| e.scores.len())
            .sum()
    }
}

#[async_trait]
impl EvaluationStore for InMemoryStore {
    async fn decision(&self, id: DecisionId) -> Result<Option<Decision>, StoreError> {
        Ok(self.state.lock().unwrap().decisions.get(&id).cloned())
    }

    async fn criteria(&self, id: DecisionId) -> Result<Vec<Criterion>, StoreError> {
        Ok(self.state.lock().unwrap().criteria.get(&id).cloned().unwrap_or_default())
    }

    async fn options(&self, id: DecisionId) -> Result<Vec<ResponseOption>, StoreError> {
        Ok(self.state.lock().unwrap().options.get(&id).cloned().unwrap_or_default())
    }

    async fn replace_evaluation(
        &self,
        draft: &EvaluationDraft,
    ) -> Result<EvaluationId, StoreError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_writes {
            return Err(StoreError::Database("disk I/O error".to_string()));
        }
        state
            .evaluations
            .retain(|e| !(e.decision_id == draft.decision_id && e.evaluator_id == draft.evaluator_id));
        let id = EvaluationId::generate();
        state.evaluations.push(StoredEvaluation {
            id,
            decision_id: draft.decision_id,
            evaluator_id: draft.evaluator_id,
            scores: draft.scores.clone(),
        });
        Ok(id)
    }

    async fn anonymous_scores(&self, id: DecisionId) -> Result<Vec<AnonymousScore>, StoreError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .evaluations
            .iter()
            .filter(|e| e.decision_id == id)
            .flat_map(|e| {
                e.scores.iter().map(|s| AnonymousScore {
                    ballot: e.id,
                    option_id: s.option_id,
                    criterion_id: s.criterion_id,
                    value: s.value,
                    confidence: s.confidence,
                })
            })
            .collect())
    }

    async fn evaluators(&self, id: DecisionId) -> Result<Vec<EvaluatorId>, StoreError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .evaluations
            .iter()
            .filter(|e| e.decision_id == id)
            .map(|e| e.evaluator_id)
            .collect())
    }

    async fn has_evaluated(
        &self,
        id: DecisionId,
        evaluator: EvaluatorId,
    ) -> Result<bool, StoreError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .evaluations
            .iter()
            .any(|e| e.decision_id == id && e.evaluator_id == evaluator))
    }

    async fn ballot_stats(&self, id: DecisionId) -> Result<BallotStats, StoreError> {
        let state = self.state.lock().unwrap();
        let evaluations: Vec<_> = state.evaluations.iter().filter(|e| e.decision_id == id).collect();
        let confidences: Vec<f64> = evaluations
            .iter()
            .flat_map(|e| e.scores.iter().map(|s| f64::from(s.confidence.get())))
            .collect();
        Ok(BallotStats {
            total_evaluations: evaluations.len(),
            average_confidence: (!confidences.is_empty())
                .then(|| confidences.iter().sum::<f64>() / confidences.len() as f64),
        })
    }
}

#[async_trait]
impl TeamDirectory for InMemoryStore {
    async fn active_members(&self, team: TeamId) -> Result<Vec<TeamMember>, StoreError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .members
            .iter()
            .filter(|m| m.team_id == team && m.active)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AccessPolicy for InMemoryStore {
    async fn can_access(
        &self,
        decision: &Decision,
        caller: EvaluatorId,
    ) -> Result<bool, StoreError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .members
            .iter()
            .any(|m| m.id == caller && m.team_id == decision.team_id && m.active))
    }
}
