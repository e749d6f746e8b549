//! Update and reset commands
//!
//! Usage:
//!   herdview update --feed <FILE> [--state <FILE>] [--pastures <FILE>] [--format json|markdown]
//!   herdview reset [--state <FILE>]

use clap::Args;
use herdview_core::report::render_human_summary;
use herdview_core::{ReconcileSession, UpdateOutcome};
use herdview_store::{HerdviewConfig, SnapshotFile};
use std::path::PathBuf;

use super::ingest::capture;
use super::{print_json, OutputFormat};

#[derive(Debug, Args)]
pub struct UpdateArgs {
    #[arg(long)]
    pub feed: PathBuf,

    /// Last-snapshot slot (overrides `state_path` from config)
    #[arg(long)]
    pub state: Option<PathBuf>,

    #[arg(long)]
    pub pastures: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct ResetArgs {
    #[arg(long)]
    pub state: Option<PathBuf>,
}

fn slot(state: Option<PathBuf>, config: &HerdviewConfig) -> SnapshotFile {
    SnapshotFile::new(state.unwrap_or_else(|| config.state_path()))
}

/// One reconcile cycle: compare the feed against the stored snapshot, then
/// store the feed's snapshot.
///
/// A failed comparison is reported on stderr and leaves the slot untouched;
/// it is not an error exit.
pub fn execute(args: UpdateArgs, config: &HerdviewConfig) -> Result<(), Box<dyn std::error::Error>> {
    let file = slot(args.state, config);
    let snapshot = capture(&args.feed, args.pastures.as_deref(), config)?;

    let mut session = ReconcileSession::resume(file.load()?);
    match session.update(snapshot) {
        UpdateOutcome::Baseline => println!("✓ Baseline captured"),
        UpdateOutcome::Report(change_report) => match args.format {
            OutputFormat::Json => print_json(&change_report)?,
            OutputFormat::Markdown => print!("{}", render_human_summary(&change_report)),
        },
        UpdateOutcome::ComparisonUnavailable(err) => {
            eprintln!("No comparison available: {}", err);
            return Ok(());
        }
    }

    if let Some(last) = session.last() {
        file.save(last)?;
    }
    Ok(())
}

pub fn reset(args: ResetArgs, config: &HerdviewConfig) -> Result<(), Box<dyn std::error::Error>> {
    let file = slot(args.state, config);
    file.clear()?;
    println!("✓ Cleared {}", file.path().display());
    Ok(())
}
