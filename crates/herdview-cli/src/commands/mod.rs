//! Sub-command implementations

pub mod ingest;
pub mod report;
pub mod update;
pub mod value;
pub mod warnings;

use clap::ValueEnum;
use herdview_core::Snapshot;
use serde::Serialize;
use std::path::Path;

/// Output rendering for commands that print a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Markdown,
}

/// Read a snapshot file written by `ingest` or `update`.
pub fn load_snapshot(path: &Path) -> Result<Snapshot, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    Ok(Snapshot::from_json(&text)?)
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
