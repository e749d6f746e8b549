use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::{normalize_bool, normalize_number, normalize_string};

/// A raw attribute map as supplied by an upstream adapter.
pub type RawRecord = serde_json::Map<String, Value>;

/// Lineage marker for an unknown parent.
pub const UNKNOWN_PARENT: &str = "-1";

/// Display label for an animal that is not inside any pasture.
pub const FREE_ROAMING: &str = "Free roaming";

static NULL: Value = Value::Null;

/// Animal gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    /// Parse a gender tag case-insensitively; anything unrecognised is `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Gender::Male,
            "female" | "f" => Gender::Female,
            _ => Gender::Unknown,
        }
    }
}

/// Genetic multipliers, each in the 0–2 range (1.0 = average).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Genetics {
    pub metabolism: f64,
    pub quality: f64,
    pub health: f64,
    pub fertility: f64,
    pub productivity: f64,
}

impl Default for Genetics {
    fn default() -> Self {
        Self {
            metabolism: 1.0,
            quality: 1.0,
            health: 1.0,
            fertility: 1.0,
            productivity: 1.0,
        }
    }
}

impl Genetics {
    /// Build genetics from a raw object. Missing multipliers default to 1.0.
    ///
    /// Returns `None` when the value is not an object.
    pub fn from_value(raw: &Value) -> Option<Self> {
        let obj = raw.as_object()?;
        let field = |key: &str| match obj.get(key) {
            Some(v) if !v.is_null() => normalize_number(v),
            _ => 1.0,
        };
        Some(Self {
            metabolism: field("metabolism"),
            quality: field("quality"),
            health: field("health"),
            fertility: field("fertility"),
            productivity: field("productivity"),
        })
    }
}

/// A single livestock unit in canonical form.
///
/// Created once per parse from a raw record and never mutated in place;
/// `id` is the only field guaranteed stable across snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Animal {
    pub id: String,
    pub name: String,
    /// Age in months
    pub age: f64,
    /// Health on a 0–100 scale
    pub health: f64,
    /// Weight in kg (0 when the upstream format does not track it)
    pub weight: f64,
    pub gender: Gender,
    /// Breed-qualified type tag, e.g. `COW_HEREFORD`
    pub sub_type: String,
    /// Base type derived from `sub_type`, e.g. `COW`
    #[serde(rename = "type")]
    pub animal_type: String,
    /// Pregnancy progress proxy in 0.0–1.0
    pub reproduction: f64,
    pub is_pregnant: bool,
    pub is_lactating: bool,
    pub is_parent: bool,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pasture_id: Option<String>,
    pub location_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genetics: Option<Genetics>,
    pub mother_id: String,
    pub father_id: String,
    pub farm_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub riding: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dirt: Option<f64>,
    /// Fabricated by the data-completion adapter rather than read from a save
    pub synthetic: bool,
}

impl Default for Animal {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            age: 0.0,
            health: 0.0,
            weight: 0.0,
            gender: Gender::Unknown,
            sub_type: String::new(),
            animal_type: String::new(),
            reproduction: 0.0,
            is_pregnant: false,
            is_lactating: false,
            is_parent: false,
            location: String::new(),
            pasture_id: None,
            location_type: String::new(),
            genetics: None,
            mother_id: UNKNOWN_PARENT.to_string(),
            father_id: UNKNOWN_PARENT.to_string(),
            farm_id: String::new(),
            riding: None,
            fitness: None,
            dirt: None,
            synthetic: false,
        }
    }
}

impl Animal {
    /// Create an animal with the given identity and sub-type; all other
    /// attributes take their defaults.
    pub fn new(id: impl Into<String>, sub_type: impl Into<String>) -> Self {
        let sub_type = sub_type.into();
        Self {
            id: id.into(),
            animal_type: derive_type(&sub_type),
            sub_type,
            ..Self::default()
        }
    }

    /// Build a canonical animal from a raw attribute map.
    ///
    /// Every attribute goes through the normalizer. Returns `None` when the
    /// record has no usable identity; such records are omitted from all
    /// comparisons rather than reported.
    pub fn from_record(record: &RawRecord) -> Option<Self> {
        let get = |key: &str| record.get(key).unwrap_or(&NULL);

        let id = normalize_string(get("id"));
        if id.is_empty() {
            return None;
        }

        let sub_type = normalize_string(get("subType"));
        let animal_type = if sub_type.is_empty() {
            normalize_string(get("type")).to_ascii_uppercase()
        } else {
            derive_type(&sub_type)
        };

        let optional_number = |key: &str| match record.get(key) {
            Some(v) if !v.is_null() => Some(normalize_number(v)),
            _ => None,
        };
        let optional_string = |key: &str| {
            let s = normalize_string(get(key));
            (!s.is_empty()).then_some(s)
        };
        let parent =
            |key: &str| optional_string(key).unwrap_or_else(|| UNKNOWN_PARENT.to_string());

        Some(Self {
            id,
            name: normalize_string(get("name")),
            age: normalize_number(get("age")).max(0.0),
            health: normalize_number(get("health")),
            weight: normalize_number(get("weight")),
            gender: Gender::parse(&normalize_string(get("gender"))),
            sub_type,
            animal_type,
            reproduction: normalize_number(get("reproduction")),
            is_pregnant: normalize_bool(get("isPregnant")),
            is_lactating: normalize_bool(get("isLactating")),
            is_parent: normalize_bool(get("isParent")),
            location: normalize_string(get("location")),
            pasture_id: optional_string("pastureId"),
            location_type: normalize_string(get("locationType")),
            genetics: record.get("genetics").and_then(Genetics::from_value),
            mother_id: parent("motherId"),
            father_id: parent("fatherId"),
            farm_id: normalize_string(get("farmId")),
            riding: optional_number("riding"),
            fitness: optional_number("fitness"),
            dirt: optional_number("dirt"),
            synthetic: normalize_bool(get("synthetic")),
        })
    }

    pub fn is_male(&self) -> bool {
        self.gender == Gender::Male
    }

    pub fn is_female(&self) -> bool {
        self.gender == Gender::Female
    }

    /// Key of the containing group: `pasture_id` when set, else `location`.
    pub fn container_key(&self) -> &str {
        match self.pasture_id.as_deref() {
            Some(id) if !id.trim().is_empty() => id.trim(),
            _ => self.location.trim(),
        }
    }

    /// Location label for display; empty locations read as free roaming.
    pub fn display_location(&self) -> &str {
        let key = self.container_key();
        if key.is_empty() {
            FREE_ROAMING
        } else {
            key
        }
    }

    /// Genetic meat quality, 1.0 when genetics are absent.
    pub fn meat_factor(&self) -> f64 {
        self.genetics.map(|g| g.quality).unwrap_or(1.0)
    }
}

/// Base type of a sub-type tag: the upper-cased prefix before the first `_`.
pub fn derive_type(sub_type: &str) -> String {
    sub_type
        .trim()
        .split('_')
        .next()
        .unwrap_or_default()
        .to_ascii_uppercase()
}
