//! JSON output formatter

use crate::output::formatter::OutputFormatter;
use serde::Serialize;
use tally_application::{CallerParticipation, ResultsExport, SubmitEvaluationOutput};
use tally_domain::{EvaluationResults, ParticipationStatus};

/// Formats command results as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    fn render<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_results(&self, results: &EvaluationResults) -> String {
        Self::render(results)
    }

    fn format_participation(&self, status: &ParticipationStatus) -> String {
        Self::render(status)
    }

    fn format_caller_participation(&self, view: &CallerParticipation) -> String {
        Self::render(view)
    }

    fn format_export(&self, export: &ResultsExport) -> String {
        Self::render(export)
    }

    fn format_submission(&self, output: &SubmitEvaluationOutput) -> String {
        Self::render(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_domain::{DecisionId, EvaluationId};

    #[test]
    fn test_results_json_has_stable_field_names() {
        let status = ParticipationStatus::from_roster(&[], &[]);
        let results = EvaluationResults::assemble(DecisionId::generate(), vec![], status);
        let value: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format_results(&results)).unwrap();

        for key in [
            "decision_id",
            "option_scores",
            "participation_rate",
            "completed_by",
            "pending_from",
            "recommended_option",
            "team_consensus",
        ] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert!(value["recommended_option"].is_null());
    }

    #[test]
    fn test_caller_participation_is_flattened() {
        let view = CallerParticipation {
            status: ParticipationStatus::from_roster(&[], &[]),
            caller_has_evaluated: true,
            can_view_results: false,
        };
        let value: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format_caller_participation(&view)).unwrap();
        assert_eq!(value["total_members"], 0);
        assert_eq!(value["caller_has_evaluated"], true);
    }

    #[test]
    fn test_submission_json() {
        let output = SubmitEvaluationOutput {
            evaluation_id: EvaluationId::generate(),
            score_count: 4,
            replaced: false,
        };
        let value: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format_submission(&output)).unwrap();
        assert_eq!(value["score_count"], 4);
        assert_eq!(value["replaced"], false);
    }
}
