//! Vanilla save-export adapter.

use herdview_core::model::RawRecord;
use herdview_core::normalize::normalize_number;
use serde_json::Value;

/// Attributes copied through unchanged; the normalizer coerces them later.
pub(crate) const PASSTHROUGH: &[&str] = &[
    "id",
    "name",
    "subType",
    "type",
    "age",
    "health",
    "weight",
    "gender",
    "isLactating",
    "isPregnant",
    "isParent",
    "farmId",
    "location",
    "locationType",
    "pastureId",
];

/// Rewrite a vanilla record into canonical keys.
///
/// The export states `reproduction` as a 0–100 percentage; the canonical
/// form is a 0–1 fraction.
pub fn canonicalize(record: &RawRecord) -> RawRecord {
    let mut out = RawRecord::new();
    for key in PASSTHROUGH {
        if let Some(value) = record.get(*key) {
            out.insert((*key).to_string(), value.clone());
        }
    }
    if let Some(raw) = record.get("reproduction").filter(|v| !v.is_null()) {
        out.insert("reproduction".to_string(), fraction(normalize_number(raw) / 100.0));
    }
    out
}

pub(crate) fn fraction(n: f64) -> Value {
    Value::from(n.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reproduction_percent_becomes_fraction() {
        let record = json!({"id": "7", "reproduction": "85", "unknownKey": 1});
        let out = canonicalize(record.as_object().unwrap());
        assert_eq!(out["reproduction"], json!(0.85));
        assert!(!out.contains_key("unknownKey"));
    }

    #[test]
    fn test_out_of_range_reproduction_clamped() {
        let record = json!({"id": "7", "reproduction": 250});
        let out = canonicalize(record.as_object().unwrap());
        assert_eq!(out["reproduction"], json!(1.0));
    }
}
