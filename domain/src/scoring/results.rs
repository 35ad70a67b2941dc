//! Assembled evaluation results

use super::aggregate::OptionScore;
use super::participation::ParticipationStatus;
use super::recommend::recommend;
use crate::core::ids::{DecisionId, OptionId};
use serde::{Deserialize, Serialize};

/// Full per-decision summary handed to reporting and drafting
///
/// Contains no evaluator identities and no individual score rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResults {
    pub decision_id: DecisionId,
    /// Ordered by weighted score, highest first
    pub option_scores: Vec<OptionScore>,
    pub participation_rate: f64,
    pub completed_by: Vec<String>,
    pub pending_from: Vec<String>,
    pub recommended_option: Option<OptionId>,
    /// Mean consensus across scored options, 0 when nothing was scored
    pub team_consensus: f64,
}

impl EvaluationResults {
    /// Combine aggregated option scores with the participation summary.
    pub fn assemble(
        decision_id: DecisionId,
        option_scores: Vec<OptionScore>,
        participation: ParticipationStatus,
    ) -> Self {
        let team_consensus = if option_scores.is_empty() {
            0.0
        } else {
            option_scores.iter().map(|s| s.consensus).sum::<f64>() / option_scores.len() as f64
        };
        let recommended_option = recommend(&option_scores);

        Self {
            decision_id,
            option_scores,
            participation_rate: participation.participation_rate,
            completed_by: participation.completed_by,
            pending_from: participation.pending_from,
            recommended_option,
            team_consensus,
        }
    }

    /// Options whose disagreement is high enough to talk about first
    pub fn conflicts(&self) -> impl Iterator<Item = &OptionScore> {
        self.option_scores
            .iter()
            .filter(|s| s.conflict_level.requires_discussion())
    }

    /// Whether any option needs discussion before the decision proceeds
    pub fn needs_discussion(&self) -> bool {
        self.conflicts().next().is_some()
    }

    /// The recommended option's aggregate, if there is one
    pub fn recommended(&self) -> Option<&OptionScore> {
        let id = self.recommended_option?;
        self.option_scores.iter().find(|s| s.option_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ConflictLevel;

    fn option_score(weighted_score: f64, consensus: f64, conflict_level: ConflictLevel) -> OptionScore {
        OptionScore {
            option_id: OptionId::generate(),
            option_title: "Option".to_string(),
            rank: 1,
            average_score: weighted_score,
            weighted_score,
            evaluator_count: 2,
            dispersion: 0.0,
            consensus,
            conflict_level,
        }
    }

    #[test]
    fn test_empty_results() {
        let results = EvaluationResults::assemble(
            DecisionId::generate(),
            vec![],
            ParticipationStatus::from_roster(&[], &[]),
        );
        assert_eq!(results.team_consensus, 0.0);
        assert_eq!(results.recommended_option, None);
        assert!(results.recommended().is_none());
        assert!(!results.needs_discussion());
    }

    #[test]
    fn test_team_consensus_is_mean_of_options() {
        let scores = vec![
            option_score(8.0, 1.0, ConflictLevel::None),
            option_score(5.0, 0.5, ConflictLevel::High),
        ];
        let first = scores[0].option_id;
        let results = EvaluationResults::assemble(
            DecisionId::generate(),
            scores,
            ParticipationStatus::from_roster(&[], &[]),
        );

        assert_eq!(results.team_consensus, 0.75);
        assert_eq!(results.recommended_option, Some(first));
        assert_eq!(results.recommended().map(|s| s.weighted_score), Some(8.0));
        assert!(results.needs_discussion());
        assert_eq!(results.conflicts().count(), 1);
    }
}
