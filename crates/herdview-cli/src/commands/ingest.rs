//! Ingest command
//!
//! Usage: herdview ingest --feed <FILE> --out <FILE> [--pastures <FILE>]

use clap::Args;
use herdview_core::model::PastureSpec;
use herdview_core::Snapshot;
use herdview_store::ingest::{ingest_file, load_pasture_specs, Completion};
use herdview_store::{HerdviewConfig, SnapshotFile};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Live feed document or array of animal records
    #[arg(long)]
    pub feed: PathBuf,

    /// Snapshot file to write
    #[arg(long)]
    pub out: PathBuf,

    /// JSON array of pasture descriptions
    #[arg(long)]
    pub pastures: Option<PathBuf>,
}

/// Ingest a feed into a snapshot with the configured engine.
pub fn capture(
    feed: &Path,
    pastures: Option<&Path>,
    config: &HerdviewConfig,
) -> Result<Snapshot, Box<dyn std::error::Error>> {
    let specs: Vec<PastureSpec> = match pastures {
        Some(path) => load_pasture_specs(path)?,
        None => Vec::new(),
    };
    let mut engine = config.engine();
    let ingested = ingest_file(feed, Completion::new(config.synthetic_seed, engine.tables()))?;
    Ok(ingested.into_snapshot(&mut engine, &specs))
}

pub fn execute(args: IngestArgs, config: &HerdviewConfig) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = capture(&args.feed, args.pastures.as_deref(), config)?;
    SnapshotFile::new(&args.out).save(&snapshot)?;

    println!(
        "✓ Captured {} animals in {} pastures to {}",
        snapshot.animals.len(),
        snapshot.pastures.len(),
        args.out.display()
    );
    Ok(())
}
