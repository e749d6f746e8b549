//! Enhanced-mod export adapter.
//!
//! Enhanced records carry a `uniqueId`, genetics, lineage, weight, horse
//! condition and a `pregnancy` block whose mere presence means pregnant.

use herdview_core::model::RawRecord;
use herdview_core::normalize::{normalize_number, normalize_string};
use serde_json::Value;

use super::vanilla::{self, fraction};

const EXTRA: &[&str] = &["genetics", "motherId", "fatherId", "riding", "fitness", "dirt"];

/// Rewrite an enhanced-mod record into canonical keys.
pub fn canonicalize(record: &RawRecord) -> RawRecord {
    let mut out = vanilla::canonicalize(record);

    if let Some(unique) = record.get("uniqueId") {
        if !normalize_string(unique).is_empty() {
            out.insert("id".to_string(), unique.clone());
        }
    }
    for key in EXTRA {
        if let Some(value) = record.get(*key) {
            out.insert((*key).to_string(), value.clone());
        }
    }

    if let Some(pregnancy) = record.get("pregnancy").filter(|v| !v.is_null()) {
        out.insert("isPregnant".to_string(), Value::Bool(true));
        if !out.contains_key("reproduction") {
            if let Some(progress) = pregnancy.get("progress") {
                let progress = normalize_number(progress);
                let progress = if progress > 1.0 { progress / 100.0 } else { progress };
                out.insert("reproduction".to_string(), fraction(progress));
            }
        }
    }
    out
}
