//! Output formatter trait

use tally_application::{CallerParticipation, ResultsExport, SubmitEvaluationOutput};
use tally_domain::{EvaluationResults, ParticipationStatus};

/// Renders command results for the terminal
pub trait OutputFormatter {
    /// Ranked results of a decision
    fn format_results(&self, results: &EvaluationResults) -> String;

    /// Role-level participation summary
    fn format_participation(&self, status: &ParticipationStatus) -> String;

    /// Participation from one member's point of view
    fn format_caller_participation(&self, view: &CallerParticipation) -> String;

    /// Anonymous aggregate export
    fn format_export(&self, export: &ResultsExport) -> String;

    /// Acknowledgement of a stored evaluation
    fn format_submission(&self, output: &SubmitEvaluationOutput) -> String;
}
