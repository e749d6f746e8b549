use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::warning::Warning;

/// Where a pasture's capacity figure came from, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacitySource {
    Explicit,
    FencedArea,
    BuildingType,
    #[default]
    Default,
}

impl CapacitySource {
    pub fn tag(&self) -> &'static str {
        match self {
            CapacitySource::Explicit => "explicit",
            CapacitySource::FencedArea => "fenced_area",
            CapacitySource::BuildingType => "building_type",
            CapacitySource::Default => "default",
        }
    }
}

/// A resolved capacity figure with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityEstimate {
    pub capacity: u32,
    pub source: CapacitySource,
    /// Human description of how the figure was computed
    pub method: String,
}

/// Food categories tracked per pasture
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FoodType {
    MixedRation,
    Hay,
    Silage,
    Grass,
}

impl FoodType {
    pub const ALL: [FoodType; 4] = [
        FoodType::MixedRation,
        FoodType::Hay,
        FoodType::Silage,
        FoodType::Grass,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FoodType::MixedRation => "Mixed ration",
            FoodType::Hay => "Hay",
            FoodType::Silage => "Silage",
            FoodType::Grass => "Grass",
        }
    }
}

/// Food storage figures for a pasture.
///
/// A food type without a level is unknown and never raises a warning.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FoodReport {
    pub total_capacity: f64,
    pub levels: BTreeMap<FoodType, f64>,
}

impl FoodReport {
    /// Placeholder report used when the upstream data has no trough levels:
    /// capacity scales with the herd and every level is unknown.
    pub fn stub(member_count: usize) -> Self {
        Self {
            total_capacity: member_count as f64 * 100.0,
            levels: BTreeMap::new(),
        }
    }

    pub fn with_level(mut self, food: FoodType, amount: f64) -> Self {
        self.levels.insert(food, amount);
        self
    }
}

/// Productivity and output estimates for a pasture.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConditionReport {
    /// 0–100
    pub productivity: f64,
    /// Litres per day
    pub milk: f64,
    pub straw: f64,
    pub manure: f64,
}

/// A corner of a fenced pasture in world coordinates (metres).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FencePoint {
    pub x: f64,
    pub z: f64,
}

/// Upstream description of a pasture before derivation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PastureSpec {
    pub id: String,
    pub name: String,
    /// Capacity stated by the placeable itself, if any
    pub capacity: Option<u32>,
    pub fence: Vec<FencePoint>,
    pub building_type: String,
    pub location_type: String,
    pub farm_id: String,
    pub food: Option<FoodReport>,
    pub condition: Option<ConditionReport>,
}

impl PastureSpec {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Spec for a group seen only through its members' location.
    pub fn implicit(location: &str) -> Self {
        Self::new(location, location)
    }

    /// Whether an animal container key refers to this pasture
    pub fn matches(&self, key: &str) -> bool {
        !key.is_empty() && (key == self.id || key == self.name)
    }
}

/// A derived pasture: a named group of co-located animals with its
/// aggregates and warnings.
///
/// `animal_count == member_ids.len()` and `avg_health` is 0 for an empty
/// pasture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pasture {
    pub id: String,
    pub name: String,
    pub capacity: u32,
    pub capacity_source: CapacitySource,
    pub capacity_method: String,
    #[serde(default)]
    pub location_type: String,
    #[serde(default)]
    pub farm_id: String,
    pub member_ids: Vec<String>,
    pub animal_count: usize,
    pub avg_health: f64,
    pub total_value: i64,
    pub condition_report: ConditionReport,
    pub food_report: FoodReport,
    pub all_warnings: Vec<Warning>,
}

impl Pasture {
    pub fn capacity_estimate(&self) -> CapacityEstimate {
        CapacityEstimate {
            capacity: self.capacity,
            source: self.capacity_source,
            method: self.capacity_method.clone(),
        }
    }
}
