//! Console output formatter for scoring results

use crate::output::formatter::OutputFormatter;
use colored::{ColoredString, Colorize};
use tally_application::{CallerParticipation, ResultsExport, SubmitEvaluationOutput};
use tally_domain::{
    ConflictLevel, EvaluationResults, OptionId, OptionScore, ParticipationStatus, recommend,
};

/// Formats results as coloured tables
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn percent(rate: f64) -> String {
        format!("{:.0}%", rate * 100.0)
    }

    fn conflict(level: ConflictLevel) -> ColoredString {
        let cell = format!("{:<8}", level.as_str());
        match level {
            ConflictLevel::None => cell.green(),
            ConflictLevel::Low => cell.normal(),
            ConflictLevel::Medium => cell.yellow(),
            ConflictLevel::High => cell.red().bold(),
        }
    }

    fn roles(roles: &[String]) -> String {
        if roles.is_empty() {
            "-".to_string()
        } else {
            roles.join(", ")
        }
    }

    fn ranking(scores: &[OptionScore], recommended: Option<OptionId>) -> String {
        let mut output = format!(
            "{:<5} {:<24} {:>8} {:>8} {:>6} {:>10} {:>9}  {}\n",
            "Rank", "Option", "Weighted", "Average", "Votes", "Dispersion", "Consensus", "Conflict"
        )
        .bold()
        .to_string();

        for score in scores {
            let mut title: String = score.option_title.chars().take(22).collect();
            if Some(score.option_id) == recommended {
                title.push_str(" *");
            }
            output.push_str(&format!(
                "{:<5} {:<24} {:>8.2} {:>8.2} {:>6} {:>10.2} {:>9.2}  {}\n",
                score.rank,
                title,
                score.weighted_score,
                score.average_score,
                score.evaluator_count,
                score.dispersion,
                score.consensus,
                Self::conflict(score.conflict_level)
            ));
        }
        output
    }

    fn status_lines(status: &ParticipationStatus) -> String {
        format!(
            "{} {} ({} of {})\n{} {}\n{} {}\n",
            "Participation:".cyan().bold(),
            Self::percent(status.participation_rate),
            status.completed_count,
            status.total_members,
            "Completed:".green().bold(),
            Self::roles(&status.completed_by),
            "Pending:".yellow().bold(),
            Self::roles(&status.pending_from)
        )
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_results(&self, results: &EvaluationResults) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Evaluation Results"));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            "Decision:".cyan().bold(),
            results.decision_id
        ));
        output.push_str(&format!(
            "{} {}\n{} {}\n{} {}\n{} {:.2}\n",
            "Participation:".cyan().bold(),
            Self::percent(results.participation_rate),
            "Completed:".green().bold(),
            Self::roles(&results.completed_by),
            "Pending:".yellow().bold(),
            Self::roles(&results.pending_from),
            "Team consensus:".cyan().bold(),
            results.team_consensus
        ));

        if results.option_scores.is_empty() {
            output.push_str(&format!("\n{}\n", "No evaluations yet.".dimmed()));
            return output;
        }

        output.push_str(&Self::section_header("Ranking"));
        output.push_str(&Self::ranking(
            &results.option_scores,
            results.recommended_option,
        ));

        if let Some(best) = results.recommended() {
            output.push_str(&format!(
                "\n{} {} ({:.2})\n",
                "Recommended:".green().bold(),
                best.option_title,
                best.weighted_score
            ));
        }

        if results.needs_discussion() {
            output.push_str(&format!("\n{}\n", "Needs discussion:".yellow().bold()));
            for option in results.conflicts() {
                output.push_str(&format!(
                    "  * {} ({} disagreement, dispersion {:.2})\n",
                    option.option_title, option.conflict_level, option.dispersion
                ));
            }
        }

        output
    }

    fn format_participation(&self, status: &ParticipationStatus) -> String {
        let mut output = Self::section_header("Participation");
        output.push_str(&Self::status_lines(status));
        output
    }

    fn format_caller_participation(&self, view: &CallerParticipation) -> String {
        let mut output = self.format_participation(&view.status);
        let evaluated = if view.caller_has_evaluated {
            "yes".green()
        } else {
            "no".yellow()
        };
        let viewable = if view.can_view_results {
            "yes".green()
        } else {
            "not yet".dimmed()
        };
        output.push_str(&format!(
            "{} {}\n{} {}\n",
            "You have evaluated:".cyan().bold(),
            evaluated,
            "Results available:".cyan().bold(),
            viewable
        ));
        output
    }

    fn format_export(&self, export: &ResultsExport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("Export: {}", export.decision.title)));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n{} {}\n{} {}\n",
            "Decision:".cyan().bold(),
            export.decision.id,
            "Status:".cyan().bold(),
            export.decision.status,
            "Exported:".cyan().bold(),
            export.exported_at.to_rfc3339()
        ));

        output.push_str(&Self::section_header("Criteria"));
        for criterion in &export.criteria {
            output.push_str(&format!("  {:<30} {:>6.2}\n", criterion.name, criterion.weight));
        }

        output.push_str(&Self::section_header("Ranking"));
        if export.aggregate_results.is_empty() {
            output.push_str(&format!("{}\n", "No evaluations yet.".dimmed()));
        } else {
            output.push_str(&Self::ranking(
                &export.aggregate_results,
                recommend(&export.aggregate_results),
            ));
        }

        let confidence = export
            .statistics
            .average_confidence
            .map(|c| format!("{:.2}", c))
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&Self::section_header("Statistics"));
        output.push_str(&format!(
            "{} {}\n{} {}\n",
            "Evaluations:".cyan().bold(),
            export.statistics.total_evaluations,
            "Average confidence:".cyan().bold(),
            confidence
        ));

        output.push_str(&format!("\n{}\n", export.privacy_notice.dimmed()));
        output
    }

    fn format_submission(&self, output: &SubmitEvaluationOutput) -> String {
        let verb = if output.replaced { "replaced" } else { "recorded" };
        format!(
            "{} Evaluation {} {} ({} scores)\n",
            "✓".green().bold(),
            output.evaluation_id,
            verb,
            output.score_count
        )
    }
}
