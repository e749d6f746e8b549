//! Snapshot differ.
//!
//! Compares two snapshots by stable identity and produces entity-level and
//! warning-level deltas. Neither input is mutated.
//!
//! ## Entry points
//!
//! ```ignore
//! use herdview_core::diff::{diff_animals, diff_warnings};
//!
//! let livestock = diff_animals(&old.animals, &new.animals);
//! let warnings = diff_warnings(&old.pastures, &new.pastures);
//! ```
//!
//! ## Guarantees
//!
//! - **Noise suppression**: health changes of 15 points or less, age changes
//!   outside `(0.05, 0.5]` months, and changes to unlisted fields are never
//!   reported.
//! - **Malformed records**: records without an id are excluded from
//!   comparison, not reported.
//! - **No-op symmetry**: diffing a snapshot against itself is empty.

pub mod engine;
pub mod model;

pub use engine::{
    diff_animals, diff_animals_counted, diff_statistics, diff_warnings, field_changes, settle,
};
pub use model::{
    AnimalFieldChanges, AnimalUpdate, CountChange, FieldChange, LivestockChanges, StatisticsDiff,
    WarningChange, WarningChanges, WarningKey,
};
