//! Snapshot diff computation.
//!
//! [`diff_animals`] produces identity-keyed added/removed/updated sets with
//! per-field significance filters; [`diff_warnings`] is a symmetric
//! difference over composite warning keys; [`diff_statistics`] compares
//! counts.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::diff::model::{
    AnimalFieldChanges, AnimalUpdate, CountChange, FieldChange, LivestockChanges, StatisticsDiff,
    WarningChange, WarningChanges, WarningKey,
};
use crate::model::{Animal, Pasture, Snapshot};
use crate::normalize::{finite_or_zero, normalize_string};

/// Health changes of this many points or fewer are noise.
pub const HEALTH_THRESHOLD: f64 = 15.0;
/// Age increases at or below this are noise.
pub const AGE_MIN_DELTA: f64 = 0.05;
/// Age increases above this are treated as parse artifacts.
pub const AGE_MAX_DELTA: f64 = 0.5;

/// Round a delta to 1e-6 so that float representation error cannot push a
/// boundary value across a threshold.
pub fn settle(delta: f64) -> f64 {
    (delta * 1e6).round() / 1e6
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Reported field changes between two versions of the same animal.
///
/// Only health, age, pregnancy, lactation and location are compared; every
/// other attribute is excluded from change detection.
pub fn field_changes(old: &Animal, new: &Animal) -> AnimalFieldChanges {
    let mut changes = AnimalFieldChanges::default();

    let (old_health, new_health) = (finite_or_zero(old.health), finite_or_zero(new.health));
    if settle((old_health - new_health).abs()) > HEALTH_THRESHOLD {
        changes.health = Some(FieldChange::new(
            old_health.round() as i64,
            new_health.round() as i64,
        ));
    }

    let (old_age, new_age) = (finite_or_zero(old.age), finite_or_zero(new.age));
    let age_delta = settle(new_age - old_age);
    if age_delta > AGE_MIN_DELTA && age_delta <= AGE_MAX_DELTA {
        changes.age = Some(FieldChange::new(round2(old_age), round2(new_age)));
    }

    if old.is_pregnant != new.is_pregnant {
        changes.is_pregnant = Some(FieldChange::new(old.is_pregnant, new.is_pregnant));
    }
    if old.is_lactating != new.is_lactating {
        changes.is_lactating = Some(FieldChange::new(old.is_lactating, new.is_lactating));
    }

    let (old_loc, new_loc) = (old.container_key(), new.container_key());
    if old_loc != new_loc && (!old_loc.is_empty() || !new_loc.is_empty()) {
        changes.location = Some(FieldChange::new(
            old.display_location().to_string(),
            new.display_location().to_string(),
        ));
    }

    changes
}

/// Identity map over well-formed animals; the first occurrence of an id wins
/// and animals without an id are left out.
fn index(animals: &[Animal]) -> (Vec<&Animal>, BTreeMap<&str, &Animal>) {
    let mut order = Vec::with_capacity(animals.len());
    let mut by_id = BTreeMap::new();
    for animal in animals {
        let id = animal.id.trim();
        if id.is_empty() || by_id.contains_key(id) {
            continue;
        }
        by_id.insert(id, animal);
        order.push(animal);
    }
    (order, by_id)
}

/// Livestock delta and the number of animals whose raw values differed but
/// whose changes were all filtered out as noise.
pub fn diff_animals_counted(old: &[Animal], new: &[Animal]) -> (LivestockChanges, usize) {
    let (old_order, old_by_id) = index(old);
    let (new_order, new_by_id) = index(new);

    let mut changes = LivestockChanges::default();
    let mut suppressed = 0;

    for animal in &new_order {
        match old_by_id.get(animal.id.trim()) {
            None => changes.added.push((*animal).clone()),
            Some(previous) => {
                let fields = field_changes(previous, animal);
                if !fields.is_empty() {
                    changes.updated.push(AnimalUpdate {
                        id: animal.id.trim().to_string(),
                        name: animal.name.clone(),
                        sub_type: animal.sub_type.clone(),
                        changes: fields,
                    });
                } else if previous != animal {
                    suppressed += 1;
                }
            }
        }
    }
    for animal in &old_order {
        if !new_by_id.contains_key(animal.id.trim()) {
            changes.removed.push((*animal).clone());
        }
    }

    (changes, suppressed)
}

/// Added, removed and significantly updated animals.
pub fn diff_animals(old: &[Animal], new: &[Animal]) -> LivestockChanges {
    diff_animals_counted(old, new).0
}

fn flatten(pastures: &[Pasture]) -> BTreeMap<WarningKey, WarningChange> {
    let mut keyed = BTreeMap::new();
    for pasture in pastures {
        for warning in &pasture.all_warnings {
            let key = WarningKey {
                pasture_id: pasture.id.clone(),
                warning_type: warning.warning_type,
                message: normalize_string(&Value::String(warning.message.clone())),
            };
            keyed.entry(key).or_insert_with(|| WarningChange {
                pasture_id: pasture.id.clone(),
                pasture_name: pasture.name.clone(),
                warning: warning.clone(),
            });
        }
    }
    keyed
}

/// New and resolved warnings across all pastures.
///
/// Keys are `(pasture id, warning type, trimmed message)`, so the same
/// warning type in two pastures is two distinct warnings, and a warning
/// whose text changes (a level dropping, a count rising) resolves and
/// reappears.
pub fn diff_warnings(old: &[Pasture], new: &[Pasture]) -> WarningChanges {
    let old_keyed = flatten(old);
    let new_keyed = flatten(new);
    let old_keys: BTreeSet<&WarningKey> = old_keyed.keys().collect();
    let new_keys: BTreeSet<&WarningKey> = new_keyed.keys().collect();

    WarningChanges {
        new: new_keyed
            .iter()
            .filter(|(k, _)| !old_keys.contains(k))
            .map(|(_, v)| v.clone())
            .collect(),
        resolved: old_keyed
            .iter()
            .filter(|(k, _)| !new_keys.contains(k))
            .map(|(_, v)| v.clone())
            .collect(),
        total: new_keyed.len(),
    }
}

/// Count comparison for animals, pastures and farms.
pub fn diff_statistics(old: &Snapshot, new: &Snapshot) -> StatisticsDiff {
    StatisticsDiff {
        animals: CountChange::new(old.animals.len(), new.animals.len()),
        pastures: CountChange::new(old.pastures.len(), new.pastures.len()),
        farms: CountChange::new(old.farms.len(), new.farms.len()),
    }
}
