//! CLI entrypoint for tally
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tally_application::{
    ExportResultsUseCase, GetParticipationUseCase, GetResultsUseCase, SubmitEvaluationInput,
    SubmitEvaluationUseCase,
};
use tally_domain::ScoreInput;
use tally_infrastructure::{ConfigLoader, FileConfig, FileOutputFormat, SqliteStore};
use tally_presentation::{
    Cli, Command, DecisionCommand, OutputFormat, TeamCommand, formatter,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match (cli.quiet, cli.verbose) {
        (true, _) => EnvFilter::new("error"),
        (false, 0) => EnvFilter::new("warn"),
        (false, 1) => EnvFilter::new("info"),
        (false, 2) => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    for issue in config.validate() {
        warn!("{}", issue);
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    let format = cli.output.unwrap_or(match config.output.format {
        Some(FileOutputFormat::Json) => OutputFormat::Json,
        Some(FileOutputFormat::Text) | None => OutputFormat::Text,
    });

    if let Command::ShowConfig = cli.command {
        return show_config(&cli, &config);
    }

    // === Dependency Injection ===
    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| config.database.resolved_path());
    let store = Arc::new(
        SqliteStore::open(&db_path)
            .with_context(|| format!("Could not open database {}", db_path.display()))?,
    );
    info!("Using database {}", db_path.display());

    let out = formatter(format);

    match cli.command {
        Command::Team(command) => run_team(&store, command, format).await?,
        Command::Decision(command) => run_decision(&store, command, format).await?,
        Command::Submit(args) => {
            let scores = read_scores(&args.scores)?;
            let use_case = SubmitEvaluationUseCase::new(store.clone(), store.clone());
            let output = use_case
                .execute(SubmitEvaluationInput::new(args.decision, args.evaluator, scores))
                .await?;
            print!("{}", terminate(out.format_submission(&output)));
        }
        Command::Status(args) => {
            let use_case = GetParticipationUseCase::new(store.clone(), store.clone(), store.clone());
            let text = match args.caller {
                Some(caller) => {
                    out.format_caller_participation(&use_case.status_for(args.decision, caller).await?)
                }
                None => out.format_participation(&use_case.status(args.decision).await?),
            };
            print!("{}", terminate(text));
        }
        Command::Results(args) => {
            let use_case = GetResultsUseCase::new(store.clone(), store.clone(), store.clone());
            let results = use_case.execute(args.decision, args.caller).await?;
            print!("{}", terminate(out.format_results(&results)));
        }
        Command::Export(args) => {
            let use_case = ExportResultsUseCase::new(store.clone(), store.clone());
            let export = use_case.execute(args.decision, args.caller).await?;
            print!("{}", terminate(out.format_export(&export)));
        }
        Command::ShowConfig => {}
    }

    Ok(())
}

async fn run_team(store: &SqliteStore, command: TeamCommand, format: OutputFormat) -> Result<()> {
    match command {
        TeamCommand::Create { name } => {
            let id = store.create_team(&name).await?;
            report(format, &format!("Created team {}", id), json!({ "team_id": id }));
        }
        TeamCommand::AddMember { team, role } => {
            let id = store.add_member(team, &role).await?;
            report(
                format,
                &format!("Added {} member {}", role, id),
                json!({ "member_id": id, "team_id": team, "role": role }),
            );
        }
        TeamCommand::Deactivate { member } => {
            store.deactivate_member(member).await?;
            report(
                format,
                &format!("Deactivated member {}", member),
                json!({ "member_id": member, "active": false }),
            );
        }
    }
    Ok(())
}

async fn run_decision(
    store: &SqliteStore,
    command: DecisionCommand,
    format: OutputFormat,
) -> Result<()> {
    match command {
        DecisionCommand::Create { team, title } => {
            let decision = store.create_decision(team, &title).await?;
            report(
                format,
                &format!("Created decision {} ({})", decision.id, decision.status),
                json!(decision),
            );
        }
        DecisionCommand::Status { decision, status } => {
            store.set_status(decision, status).await?;
            report(
                format,
                &format!("Decision {} is now {}", decision, status),
                json!({ "decision_id": decision, "status": status }),
            );
        }
        DecisionCommand::Criteria { decision, criteria } => {
            let criteria = store.replace_criteria(decision, criteria).await?;
            let lines: Vec<String> = criteria
                .iter()
                .map(|c| format!("  {} {} (weight {})", c.id, c.name, c.weight))
                .collect();
            report(
                format,
                &format!("Criteria of {}:\n{}", decision, lines.join("\n")),
                json!(criteria),
            );
        }
        DecisionCommand::Options { decision, titles } => {
            let options = store.replace_options(decision, titles).await?;
            let lines: Vec<String> = options
                .iter()
                .map(|o| format!("  {} {}", o.id, o.title))
                .collect();
            report(
                format,
                &format!("Options of {}:\n{}", decision, lines.join("\n")),
                json!(options),
            );
        }
    }
    Ok(())
}

fn read_scores(path: &Path) -> Result<Vec<ScoreInput>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read scores file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Scores file {} is not a JSON array of scores", path.display()))
}

fn report(format: OutputFormat, text: &str, value: serde_json::Value) {
    match format {
        OutputFormat::Text => println!("{}", text),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
        ),
    }
}

fn terminate(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

fn show_config(cli: &Cli, config: &FileConfig) -> Result<()> {
    if cli.no_config {
        println!("Configuration files disabled (--no-config)");
    } else {
        ConfigLoader::print_config_sources(cli.config.as_deref());
    }

    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| config.database.resolved_path());
    println!("\nDatabase: {}", db_path.display());
    println!(
        "\nEffective configuration:\n{}",
        toml::to_string_pretty(config).context("Could not render configuration")?
    );
    Ok(())
}
