//! HerdView CLI
//!
//! Command-line interface for snapshot reconciliation

use clap::{Parser, Subcommand};
use herdview_core::logging_facility;
use herdview_store::HerdviewConfig;
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "herdview")]
#[command(about = "HerdView - livestock snapshot reconciliation", long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two stored snapshots
    Report(commands::report::ReportArgs),
    /// Pasture warnings and birth forecast for one snapshot
    Warnings(commands::warnings::WarningsArgs),
    /// Market value of a herd or a single animal
    Value(commands::value::ValueArgs),
    /// Turn an upstream document into a snapshot file
    Ingest(commands::ingest::IngestArgs),
    /// Run one reconcile cycle against the stored last snapshot
    Update(commands::update::UpdateArgs),
    /// Drop the stored last snapshot
    Reset(commands::update::ResetArgs),
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = HerdviewConfig::load_or_default(cli.config.as_deref())?;
    logging_facility::init(config.log_profile);

    match cli.command {
        Commands::Report(args) => commands::report::execute(args, &config),
        Commands::Warnings(args) => commands::warnings::execute(args, &config),
        Commands::Value(args) => commands::value::execute(args, &config),
        Commands::Ingest(args) => commands::ingest::execute(args, &config),
        Commands::Update(args) => commands::update::execute(args, &config),
        Commands::Reset(args) => commands::update::reset(args, &config),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
