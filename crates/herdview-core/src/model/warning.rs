use serde::{Deserialize, Serialize};

use super::pasture::{CapacitySource, FoodType};

/// Warning category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningType {
    Capacity,
    Food,
    Health,
    Production,
    Maintenance,
    Breeding,
    Age,
    DairyOptimization,
}

impl WarningType {
    /// Stable tag used in composite warning keys and summaries
    pub fn tag(&self) -> &'static str {
        match self {
            WarningType::Capacity => "capacity",
            WarningType::Food => "food",
            WarningType::Health => "health",
            WarningType::Production => "production",
            WarningType::Maintenance => "maintenance",
            WarningType::Breeding => "breeding",
            WarningType::Age => "age",
            WarningType::DairyOptimization => "dairy_optimization",
        }
    }
}

/// Warning severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

/// One lactating mother and the young animals sharing her pasture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotherOffspringPair {
    pub mother_id: String,
    pub mother_type: String,
    pub offspring_ids: Vec<String>,
}

/// Type-specific structured payload carried inline by a warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum WarningDetails {
    Capacity {
        current_count: usize,
        capacity: u32,
        utilization_percent: f64,
        available_space: u32,
        capacity_source: CapacitySource,
        calculation_method: String,
        total_value: i64,
    },
    Food {
        food_type: FoodType,
        amount: f64,
        total_capacity: f64,
        percent: f64,
    },
    Health {
        critical: usize,
        warning: usize,
        total_sick: usize,
    },
    Production {
        lactating_cows: usize,
        estimated_daily_milk: f64,
    },
    Maintenance {
        manure: f64,
        threshold: f64,
    },
    Breeding {
        males: usize,
        females: usize,
        ratio: f64,
    },
    Age {
        aging_count: usize,
        total: usize,
        percentage: i64,
    },
    DairyOptimization {
        pairs: Vec<MotherOffspringPair>,
        total_mothers: usize,
        total_offspring: usize,
        potential_milk_gain: f64,
    },
}

/// A derived operational condition about a pasture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    #[serde(rename = "type")]
    pub warning_type: WarningType,
    pub severity: Severity,
    pub message: String,
    /// Ids of the animals the warning is about
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affected_animals: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<WarningDetails>,
}

impl Warning {
    pub fn new(warning_type: WarningType, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            warning_type,
            severity,
            message: message.into(),
            affected_animals: Vec::new(),
            details: None,
        }
    }

    pub fn with_affected(mut self, ids: Vec<String>) -> Self {
        self.affected_animals = ids;
        self
    }

    pub fn with_details(mut self, details: WarningDetails) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Danger > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }

    #[test]
    fn test_warning_serializes_type_tag() {
        let w = Warning::new(WarningType::DairyOptimization, Severity::Info, "x").with_details(
            WarningDetails::Health {
                critical: 1,
                warning: 2,
                total_sick: 3,
            },
        );
        let v = serde_json::to_value(&w).unwrap();
        assert_eq!(v["type"], "dairy_optimization");
        assert_eq!(v["severity"], "info");
        assert_eq!(v["details"]["kind"], "health");
        assert_eq!(v["details"]["totalSick"], 3);
        assert!(v.get("affectedAnimals").is_none());
    }

    #[test]
    fn test_tag_matches_serde_name() {
        for t in [WarningType::Capacity, WarningType::DairyOptimization] {
            let v = serde_json::to_value(t).unwrap();
            assert_eq!(v, t.tag());
        }
    }
}
