//! Upstream ingestion adapters.
//!
//! Each upstream shape gets its own adapter that rewrites records into the
//! canonical attribute map read by [`Animal::from_record`]. Shape detection
//! happens per record, so a live feed may mix vanilla, enhanced and
//! aggregate entries. The core never sees anything but canonical animals.

pub mod enhanced;
pub mod live_feed;
pub mod synthetic;
pub mod vanilla;

use herdview_core::model::{Animal, Farm, GameTime, PastureSpec, RawRecord, Snapshot};
use herdview_core::{log_op_end, log_op_error, log_op_start, HerdEngine};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::errors::{feed_error, io_error, Result};
pub use synthetic::Completion;
use synthetic::HerdAggregate;

/// Upstream document or record shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// Save-export attribute maps
    Vanilla,
    /// Enhanced-mod records with genetics, lineage and pregnancy detail
    Enhanced,
    /// Live-feed document wrapping animals, game time and farm info
    LiveFeed,
}

/// Keys only the enhanced-mod export writes.
const ENHANCED_MARKERS: &[&str] = &[
    "uniqueId",
    "genetics",
    "pregnancy",
    "motherId",
    "fatherId",
    "riding",
    "fitness",
    "dirt",
];

/// Choose the adapter for a document or record.
pub fn detect_format(value: &Value) -> SourceFormat {
    match value.as_object() {
        Some(obj) if obj.get("animals").is_some_and(Value::is_array) => SourceFormat::LiveFeed,
        Some(obj) if ENHANCED_MARKERS.iter().any(|k| obj.contains_key(*k)) => {
            SourceFormat::Enhanced
        }
        _ => SourceFormat::Vanilla,
    }
}

/// Everything an upstream document contributes to a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingested {
    pub format: SourceFormat,
    pub game_time: GameTime,
    pub farms: Vec<Farm>,
    pub animals: Vec<Animal>,
    /// Records dropped for lack of identity or shape
    pub skipped: usize,
    /// Animals fabricated from aggregate counts
    pub synthetic: usize,
}

impl Ingested {
    fn new(format: SourceFormat) -> Self {
        Self {
            format,
            game_time: GameTime::default(),
            farms: Vec::new(),
            animals: Vec::new(),
            skipped: 0,
            synthetic: 0,
        }
    }

    /// Derive pastures and warnings through `engine` and capture a snapshot.
    pub fn into_snapshot(self, engine: &mut HerdEngine, specs: &[PastureSpec]) -> Snapshot {
        engine.capture(self.game_time, self.animals, specs, self.farms)
    }
}

/// Rewrite one record into canonical keys for its detected shape.
pub fn canonical_record(record: &RawRecord) -> RawRecord {
    if ENHANCED_MARKERS.iter().any(|k| record.contains_key(*k)) {
        enhanced::canonicalize(record)
    } else {
        vanilla::canonicalize(record)
    }
}

/// Ingest a list of animal entries.
///
/// Aggregate entries are completed synthetically; individual entries
/// without identity are skipped.
pub fn ingest_records(values: &[Value], completion: Completion<'_>) -> Ingested {
    let format = if values.iter().any(|v| detect_format(v) == SourceFormat::Enhanced) {
        SourceFormat::Enhanced
    } else {
        SourceFormat::Vanilla
    };
    let mut out = Ingested::new(format);

    for value in values {
        let Some(record) = value.as_object() else {
            out.skipped += 1;
            continue;
        };
        if let Some(aggregate) = HerdAggregate::from_record(record) {
            let herd = synthetic::complete_population(&aggregate, completion);
            out.synthetic += herd.len();
            out.animals.extend(herd);
            continue;
        }
        match Animal::from_record(&canonical_record(record)) {
            Some(animal) => out.animals.push(animal),
            None => out.skipped += 1,
        }
    }

    if out.skipped > 0 {
        tracing::debug!(skipped = out.skipped, "records without identity omitted");
    }
    out
}

/// Parse an upstream JSON document: a live feed or a bare record array.
///
/// # Errors
///
/// `InvalidFeed` when the text is not JSON or has neither shape.
pub fn ingest_document(text: &str, completion: Completion<'_>) -> Result<Ingested> {
    let start = Instant::now();
    log_op_start!("ingest_document", bytes = text.len());

    let result = serde_json::from_str::<Value>(text)
        .map_err(|e| feed_error(&format!("JSON parse error: {}", e)))
        .and_then(|doc| match &doc {
            Value::Array(values) => Ok(ingest_records(values, completion)),
            Value::Object(obj) if detect_format(&doc) == SourceFormat::LiveFeed => {
                live_feed::ingest(obj, completion)
            }
            _ => Err(feed_error(
                "expected a live feed document or an array of animal records",
            )),
        });

    match result {
        Ok(ingested) => {
            log_op_end!(
                "ingest_document",
                start,
                animal_count = ingested.animals.len(),
                synthetic = ingested.synthetic
            );
            Ok(ingested)
        }
        Err(err) => {
            log_op_error!("ingest_document", err.clone(), start);
            Err(err)
        }
    }
}

/// Read and ingest a document from disk.
///
/// # Errors
///
/// `Io` when the file cannot be read, otherwise as [`ingest_document`].
pub fn ingest_file(path: &Path, completion: Completion<'_>) -> Result<Ingested> {
    let text = fs::read_to_string(path).map_err(|e| io_error("read_feed", e))?;
    ingest_document(&text, completion)
}

/// Read pasture descriptions (a JSON array of specs) from disk.
///
/// Pasture ids must be unique: capacities are cached per id.
///
/// # Errors
///
/// `Io` when the file cannot be read, `InvalidFeed` when it does not hold
/// pasture specs or repeats an id.
pub fn load_pasture_specs(path: &Path) -> Result<Vec<PastureSpec>> {
    let text = fs::read_to_string(path).map_err(|e| io_error("read_pastures", e))?;
    let specs: Vec<PastureSpec> = serde_json::from_str(&text)
        .map_err(|e| feed_error(&format!("Invalid pasture list: {}", e)))?;

    let mut seen = BTreeSet::new();
    for spec in &specs {
        if !seen.insert(spec.id.trim()) {
            return Err(feed_error("duplicate pasture id in pasture list")
                .with_op("read_pastures")
                .with_pasture_id(spec.id.trim()));
        }
    }
    Ok(specs)
}
