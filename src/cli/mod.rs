//! Top-level CLI parsing and command execution.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::entities::trial_match::DetailedTrialMatch;
use crate::error::TrialMatchError;
use crate::sources::matchminer::{MATCHES_PATH_ENV, MatchMinerExport, TRIALS_PATH_ENV};
use crate::transform::trial_match::group_trial_matches_by_id;

#[derive(Parser, Debug)]
#[command(
    name = "trialmatch",
    about = "Group MatchMiner trial matches by trial, arm, age, and genomic alteration",
    version,
    after_help = "Alterations and cancer types containing '!' are exclusion criteria and are reported as NOT matches."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON instead of Markdown
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Verbosity (-v info, -vv debug); without it RUST_LOG applies, default warn
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the prioritized trial → arm → age → alteration tree
    #[command(after_help = "\
EXAMPLES:
  trialmatch group --trials trials.json --matches matches.json
  trialmatch group --trials trials.json --matches matches.json --json --limit 5")]
    Group(InputArgs),
    /// Show only the trial display order and priority scores
    Priority(InputArgs),
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// JSON array of trial definitions
    #[arg(long, env = TRIALS_PATH_ENV)]
    pub trials: PathBuf,

    /// JSON array of match records
    #[arg(long, env = MATCHES_PATH_ENV)]
    pub matches: PathBuf,

    /// Only show the first N trials after sorting
    #[arg(short, long)]
    pub limit: Option<usize>,
}

fn validate_limit(limit: Option<usize>) -> Result<Option<usize>, TrialMatchError> {
    match limit {
        Some(0) => Err(TrialMatchError::InvalidArgument(
            "--limit must be greater than 0".into(),
        )),
        other => Ok(other),
    }
}

async fn load_and_group(args: &InputArgs) -> Result<Vec<DetailedTrialMatch>, TrialMatchError> {
    let limit = validate_limit(args.limit)?;
    let export = MatchMinerExport::load(&args.trials, &args.matches).await?;
    let mut trials = group_trial_matches_by_id(&export.trials, &export.matches)?;
    if let Some(limit) = limit {
        trials.truncate(limit);
    }
    debug!(trials = trials.len(), "grouped trial matches");
    Ok(trials)
}

/// Executes one parsed CLI command and returns rendered output.
///
/// # Errors
///
/// Returns an error if argument validation fails, input files cannot be read or
/// parsed, a match references an unknown trial, or rendering fails.
pub async fn run(cli: Cli) -> anyhow::Result<String> {
    match cli.command {
        Commands::Group(args) => {
            let trials = load_and_group(&args).await?;
            if cli.json {
                Ok(crate::render::json::to_pretty(&trials)?)
            } else {
                Ok(crate::render::markdown::trial_matches(&trials)?)
            }
        }
        Commands::Priority(args) => {
            let trials = load_and_group(&args).await?;
            if cli.json {
                let rows = trials
                    .iter()
                    .map(|trial| PriorityRow {
                        id: &trial.id,
                        nct_id: &trial.nct_id,
                        priority: trial.priority,
                    })
                    .collect::<Vec<_>>();
                Ok(crate::render::json::to_pretty(&rows)?)
            } else {
                Ok(crate::render::markdown::priority_table(&trials))
            }
        }
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct PriorityRow<'a> {
    id: &'a str,
    nct_id: &'a str,
    priority: u32,
}
