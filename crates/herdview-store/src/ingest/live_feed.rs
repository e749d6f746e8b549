//! Live feed adapter.
//!
//! The feed document is `{animals, vehicles, fields, production, finance,
//! weather, economy, gameTime, farmInfo}`; only `animals`, `gameTime` and
//! `farmInfo` matter here.

use herdview_core::errors::{ExError, HerdError};
use herdview_core::model::{Farm, GameTime, RawRecord};
use herdview_core::normalize::{normalize_number, normalize_string};
use serde_json::Value;

use super::{ingest_records, Completion, Ingested, SourceFormat};
use crate::errors::{feed_error, Result};

/// Ingest a decoded live feed document.
///
/// # Errors
///
/// `MissingField` without `animals`, `InvalidFeed` when it is not a list.
pub fn ingest(doc: &RawRecord, completion: Completion<'_>) -> Result<Ingested> {
    let animals = doc.get("animals").ok_or_else(|| {
        ExError::from(HerdError::MissingField {
            field: "animals".to_string(),
        })
    })?;
    let animals = animals
        .as_array()
        .ok_or_else(|| feed_error("`animals` must be an array"))?;

    let mut ingested = ingest_records(animals, completion);
    ingested.format = SourceFormat::LiveFeed;
    ingested.game_time = doc.get("gameTime").map(game_time).unwrap_or_default();
    ingested.farms = doc.get("farmInfo").map(farms).unwrap_or_default();
    Ok(ingested)
}

fn game_time(raw: &Value) -> GameTime {
    let field = |key: &str| raw.get(key).map(normalize_number).unwrap_or(0.0);
    GameTime::new(field("currentDay") as i64, field("dayTime"))
}

/// `farmInfo` is either one farm object or a list of them.
fn farms(raw: &Value) -> Vec<Farm> {
    let entries: Vec<&Value> = match raw {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![raw],
        _ => Vec::new(),
    };
    entries
        .into_iter()
        .filter_map(|entry| {
            let id = entry
                .get("farmId")
                .or_else(|| entry.get("id"))
                .map(normalize_string)
                .unwrap_or_default();
            let name = entry.get("name").map(normalize_string).unwrap_or_default();
            (!id.is_empty()).then_some(Farm { id, name })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use herdview_core::errors::ExErrorKind;
    use herdview_core::ValuationTables;
    use serde_json::json;

    fn doc(v: Value) -> RawRecord {
        v.as_object().cloned().unwrap()
    }

    fn ingest_doc(feed: &RawRecord) -> Result<Ingested> {
        ingest(feed, Completion::new(0, &ValuationTables::default()))
    }

    #[test]
    fn test_reads_animals_time_and_farms() {
        let feed = doc(json!({
            "animals": [{"id": "1", "subType": "COW_ANGUS", "location": "North"}],
            "vehicles": [{"name": "tractor"}],
            "weather": {"rain": true},
            "gameTime": {"currentDay": "12", "dayTime": 630.5},
            "farmInfo": {"farmId": 1, "name": "Hillside"}
        }));
        let ingested = ingest_doc(&feed).unwrap();
        assert_eq!(ingested.format, SourceFormat::LiveFeed);
        assert_eq!(ingested.animals.len(), 1);
        assert_eq!(ingested.game_time, GameTime::new(12, 630.5));
        assert_eq!(
            ingested.farms,
            vec![Farm {
                id: "1".to_string(),
                name: "Hillside".to_string()
            }]
        );
    }

    #[test]
    fn test_farm_list_skips_entries_without_id() {
        let feed = doc(json!({
            "animals": [],
            "farmInfo": [{"id": "1", "name": "A"}, {"name": "nameless"}]
        }));
        let ingested = ingest_doc(&feed).unwrap();
        assert_eq!(ingested.farms.len(), 1);
        assert_eq!(ingested.game_time, GameTime::default());
    }

    #[test]
    fn test_missing_animals_is_missing_field() {
        let err = ingest_doc(&doc(json!({"gameTime": {}}))).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::MissingField);

        let err = ingest_doc(&doc(json!({"animals": {}}))).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidFeed);
    }
}
