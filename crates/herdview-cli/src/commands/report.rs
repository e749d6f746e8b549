//! Report command
//!
//! Usage: herdview report --old <FILE> --new <FILE> [--format json|markdown]

use clap::Args;
use herdview_core::report::{render_human_summary, report};
use herdview_store::HerdviewConfig;
use std::path::PathBuf;

use super::{load_snapshot, print_json, OutputFormat};

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Earlier snapshot
    #[arg(long)]
    pub old: PathBuf,

    /// Later snapshot
    #[arg(long)]
    pub new: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

pub fn execute(args: ReportArgs, _config: &HerdviewConfig) -> Result<(), Box<dyn std::error::Error>> {
    let old = load_snapshot(&args.old)?;
    let new = load_snapshot(&args.new)?;
    let change_report = report(&old, &new)?;

    match args.format {
        OutputFormat::Json => print_json(&change_report)?,
        OutputFormat::Markdown => print!("{}", render_human_summary(&change_report)),
    }
    Ok(())
}
