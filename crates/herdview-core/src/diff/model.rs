//! Snapshot diff output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq` so a
//! diff can be round-tripped through JSON by the change reporter. Optional
//! field changes are omitted from JSON when they did not survive filtering.

use serde::{Deserialize, Serialize};

use crate::model::{Animal, Warning, WarningType};

/// Old and new value of one reported field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldChange<T> {
    pub old: T,
    pub new: T,
}

impl<T> FieldChange<T> {
    pub fn new(old: T, new: T) -> Self {
        Self { old, new }
    }
}

/// Field changes of one animal that survived the significance filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnimalFieldChanges {
    /// Rounded to whole points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<FieldChange<i64>>,
    /// Months, rounded to two decimals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<FieldChange<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_pregnant: Option<FieldChange<bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_lactating: Option<FieldChange<bool>>,
    /// Display labels; an empty location reads as free roaming
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<FieldChange<String>>,
}

impl AnimalFieldChanges {
    pub fn is_empty(&self) -> bool {
        self.health.is_none()
            && self.age.is_none()
            && self.is_pregnant.is_none()
            && self.is_lactating.is_none()
            && self.location.is_none()
    }

    /// Number of fields that changed
    pub fn len(&self) -> usize {
        [
            self.health.is_some(),
            self.age.is_some(),
            self.is_pregnant.is_some(),
            self.is_lactating.is_some(),
            self.location.is_some(),
        ]
        .iter()
        .filter(|b| **b)
        .count()
    }
}

/// An animal present in both snapshots with at least one reported change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnimalUpdate {
    pub id: String,
    pub name: String,
    pub sub_type: String,
    pub changes: AnimalFieldChanges,
}

/// Entity-level delta between two animal collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LivestockChanges {
    /// Present in new, absent from old
    pub added: Vec<Animal>,
    /// Present in old, absent from new
    pub removed: Vec<Animal>,
    pub updated: Vec<AnimalUpdate>,
}

impl LivestockChanges {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}

/// Composite identity of a warning across snapshots.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarningKey {
    pub pasture_id: String,
    pub warning_type: WarningType,
    pub message: String,
}

/// A warning that appeared or disappeared, with the pasture it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WarningChange {
    pub pasture_id: String,
    pub pasture_name: String,
    pub warning: Warning,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WarningChanges {
    pub new: Vec<WarningChange>,
    pub resolved: Vec<WarningChange>,
    /// Distinct warnings in the new snapshot
    pub total: usize,
}

impl WarningChanges {
    pub fn is_empty(&self) -> bool {
        self.new.is_empty() && self.resolved.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountChange {
    pub old: usize,
    pub new: usize,
    pub changed: bool,
}

impl CountChange {
    pub fn new(old: usize, new: usize) -> Self {
        Self {
            old,
            new,
            changed: old != new,
        }
    }
}

/// Population counts before and after.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatisticsDiff {
    pub animals: CountChange,
    pub pastures: CountChange,
    pub farms: CountChange,
}

impl StatisticsDiff {
    pub fn changed(&self) -> bool {
        self.animals.changed || self.pastures.changed || self.farms.changed
    }
}
