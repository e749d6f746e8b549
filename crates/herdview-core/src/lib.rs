//! HerdView Core - snapshot reconciliation for farm dashboards
//!
//! This crate turns raw livestock records into canonical snapshots and
//! compares snapshots across refreshes, including:
//! - Normalization of heterogeneous raw values
//! - Identity-keyed snapshot diffing with noise filters
//! - Pasture warning derivation (capacity, food, health, breeding, age, dairy)
//! - Heuristic market valuation
//! - Change reports composed from the above
//!
//! The core performs no I/O. Parsing upstream formats and persisting
//! snapshots live in `herdview-store`.

pub mod capacity;
pub mod diff;
pub mod engine;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod normalize;
pub mod pasture;
pub mod report;
pub mod session;
pub mod valuation;
pub mod warnings;

#[doc(hidden)]
pub use herdview_core_types as __schema;

// Re-export commonly used types
pub use engine::{animals_from_records, HerdEngine};
pub use errors::{ExError, ExErrorKind, HerdError, Result};
pub use model::{Animal, Pasture, PastureSpec, Snapshot, Warning};
pub use report::{report, ChangeReport};
pub use session::{ReconcileSession, UpdateOutcome};
pub use valuation::{value, Valuation, ValuationTables};
