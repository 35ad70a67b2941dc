//! Participation tracking
//!
//! Evaluator identities go in; only roles come out. [`ParticipationStatus`]
//! is the caller-visible summary and never names an individual.

use crate::core::ids::EvaluatorId;
use crate::decision::TeamMember;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Role-level summary of who has and hasn't evaluated a decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipationStatus {
    /// Active team members eligible to evaluate
    pub total_members: usize,
    /// Distinct evaluators with an evaluation on file
    pub completed_count: usize,
    /// Roles of members who have evaluated (sorted, distinct)
    pub completed_by: Vec<String>,
    /// Roles of active members who have not evaluated yet (sorted, distinct)
    pub pending_from: Vec<String>,
    pub participation_rate: f64,
}

impl ParticipationStatus {
    /// Build the summary from the active roster and the evaluators on file.
    pub fn from_roster(active_members: &[TeamMember], evaluators: &[EvaluatorId]) -> Self {
        let evaluated: HashSet<EvaluatorId> = evaluators.iter().copied().collect();

        let mut completed_by = BTreeSet::new();
        let mut pending_from = BTreeSet::new();
        for member in active_members {
            if evaluated.contains(&member.id) {
                completed_by.insert(member.role.clone());
            } else {
                pending_from.insert(member.role.clone());
            }
        }

        let total_members = active_members.len();
        let completed_count = evaluated.len();

        Self {
            total_members,
            completed_count,
            completed_by: completed_by.into_iter().collect(),
            pending_from: pending_from.into_iter().collect(),
            participation_rate: participation_rate(completed_count, total_members),
        }
    }

    /// Whether anyone has evaluated yet
    pub fn has_results(&self) -> bool {
        self.completed_count > 0
    }
}

/// `completed / total`, or 0 when there is nobody to ask
pub fn participation_rate(completed: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64
    }
}
