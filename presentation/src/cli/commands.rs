//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tally_domain::{DecisionId, DecisionStatus, EvaluatorId, TeamId};

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    Text,
    /// Pretty-printed JSON
    Json,
}

/// CLI arguments for tally
#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(author, version, about = "Anonymous team scoring with consensus and conflict detection")]
#[command(long_about = r#"
Tally collects anonymous scores from a team on a decision's options and
criteria, then reports weighted rankings, consensus and disagreement.

Individual scores are never shown. Results report only aggregates and
which roles have or have not taken part.

Configuration files are loaded from (lowest to highest priority):
1. ~/.config/tally/config.toml   Global config
2. ./tally.toml                  Project-level config
3. --config <path>               Explicit config file
4. TALLY_* environment variables (e.g. TALLY_DATABASE__PATH)

Example:
  tally team create "Platform"
  tally decision create --team <TEAM> "Queue backend"
  tally submit --decision <DECISION> --evaluator <MEMBER> --scores scores.json
  tally results --decision <DECISION> --as <MEMBER>
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Database file (overrides the config file)
    #[arg(long, value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage teams and their members
    #[command(subcommand)]
    Team(TeamCommand),

    /// Manage decisions, their criteria and options
    #[command(subcommand)]
    Decision(DecisionCommand),

    /// Submit (or replace) an evaluation from a JSON file of scores
    Submit(SubmitArgs),

    /// Show who has and has not evaluated, by role
    Status(StatusArgs),

    /// Show aggregated results
    Results(CallerArgs),

    /// Export anonymous aggregate results
    Export(CallerArgs),

    /// Show configuration file locations and the effective configuration
    ShowConfig,
}

#[derive(Subcommand, Debug)]
pub enum TeamCommand {
    /// Create a team
    Create {
        /// Team name
        name: String,
    },
    /// Add an active member to a team
    AddMember {
        #[arg(long)]
        team: TeamId,
        /// Role shown in participation reports
        #[arg(long)]
        role: String,
    },
    /// Deactivate a member; their evaluations stay on file
    Deactivate {
        #[arg(long)]
        member: EvaluatorId,
    },
}

#[derive(Subcommand, Debug)]
pub enum DecisionCommand {
    /// Create a decision in draft status
    Create {
        #[arg(long)]
        team: TeamId,
        /// Decision title
        title: String,
    },
    /// Change a decision's status
    Status {
        #[arg(long)]
        decision: DecisionId,
        /// draft, active or completed
        status: DecisionStatus,
    },
    /// Replace the criteria, given as NAME=WEIGHT
    Criteria {
        #[arg(long)]
        decision: DecisionId,
        #[arg(required = true, value_parser = parse_criterion)]
        criteria: Vec<(String, f64)>,
    },
    /// Replace the options
    Options {
        #[arg(long)]
        decision: DecisionId,
        #[arg(required = true)]
        titles: Vec<String>,
    },
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    #[arg(long)]
    pub decision: DecisionId,
    #[arg(long)]
    pub evaluator: EvaluatorId,
    /// JSON array of {option_id, criterion_id, value, confidence, comment?}
    #[arg(long, value_name = "FILE")]
    pub scores: PathBuf,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    #[arg(long)]
    pub decision: DecisionId,
    /// View as this member (adds whether they have evaluated)
    #[arg(long = "as", value_name = "MEMBER")]
    pub caller: Option<EvaluatorId>,
}

#[derive(Args, Debug)]
pub struct CallerArgs {
    #[arg(long)]
    pub decision: DecisionId,
    /// Member making the request; must belong to the decision's team
    #[arg(long = "as", value_name = "MEMBER")]
    pub caller: EvaluatorId,
}

fn parse_criterion(raw: &str) -> Result<(String, f64), String> {
    let (name, weight) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=WEIGHT, got '{}'", raw))?;
    let weight = weight
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid weight '{}': {}", weight, e))?;
    Ok((name.trim().to_string(), weight))
}
