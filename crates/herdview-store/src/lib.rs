//! HerdView Store - everything around the core that touches bytes
//!
//! Provides:
//! - Upstream ingestion adapters (vanilla export, enhanced-mod export, live feed)
//! - Synthetic completion of aggregate-only herds
//! - YAML configuration loading
//! - A file-backed "last snapshot" slot with atomic writes

pub mod config;
pub mod errors;
pub mod ingest;
pub mod snapshot;

// Re-export key types
pub use config::HerdviewConfig;
pub use errors::Result;
pub use ingest::{ingest_document, Completion, Ingested, SourceFormat};
pub use snapshot::SnapshotFile;
