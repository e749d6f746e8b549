//! Pasture derivation: grouping animals by location and computing each
//! group's aggregates, capacity, reports and warnings.

use std::collections::BTreeMap;
use std::time::Instant;

use crate::capacity::{CapacityCache, CapacityRules};
use crate::model::{Animal, ConditionReport, FoodReport, Pasture, PastureSpec};
use crate::valuation::{value_group, ValuationTables};
use crate::warnings::{derive_warnings, WarningInput};
use crate::{log_op_end, log_op_start};

const MILK_PER_LACTATING: &[(&str, f64)] = &[("COW", 20.0), ("GOAT", 4.0), ("SHEEP", 2.0)];
const STRAW_TYPES: &[&str] = &["COW", "HORSE", "PIG"];
const STRAW_PER_ANIMAL: f64 = 1.0;
const MANURE_PER_ANIMAL: &[(&str, f64)] = &[
    ("COW", 1.5),
    ("HORSE", 1.8),
    ("PIG", 0.8),
    ("SHEEP", 0.5),
    ("GOAT", 0.5),
    ("CHICKEN", 0.05),
];
const DEFAULT_MANURE: f64 = 1.0;

fn rate(table: &[(&str, f64)], animal_type: &str) -> Option<f64> {
    table
        .iter()
        .find(|(t, _)| *t == animal_type)
        .map(|(_, v)| *v)
}

/// Group animals by container key (`pastureId`, else `location`).
///
/// Free-roaming animals (no key) are left out. Members keep snapshot order.
pub fn group_by_location(animals: &[Animal]) -> BTreeMap<String, Vec<&Animal>> {
    let mut groups: BTreeMap<String, Vec<&Animal>> = BTreeMap::new();
    for animal in animals {
        let key = animal.container_key();
        if key.is_empty() {
            continue;
        }
        groups.entry(key.to_string()).or_default().push(animal);
    }
    groups
}

/// Arithmetic mean of member health; 0 for an empty group.
pub fn average_health(members: &[&Animal]) -> f64 {
    if members.is_empty() {
        return 0.0;
    }
    members.iter().map(|a| a.health).sum::<f64>() / members.len() as f64
}

/// Estimate productivity and daily output from the members alone.
pub fn estimate_condition(members: &[&Animal]) -> ConditionReport {
    let mut report = ConditionReport {
        productivity: average_health(members),
        ..ConditionReport::default()
    };
    for animal in members {
        let t = animal.animal_type.as_str();
        if animal.is_lactating {
            report.milk += rate(MILK_PER_LACTATING, t).unwrap_or(0.0);
        }
        if STRAW_TYPES.contains(&t) {
            report.straw += STRAW_PER_ANIMAL;
        }
        report.manure += rate(MANURE_PER_ANIMAL, t).unwrap_or(DEFAULT_MANURE);
    }
    report
}

/// Shared lookup context for pasture derivation.
#[derive(Debug, Clone, Copy)]
pub struct DeriveContext<'a> {
    pub rules: &'a CapacityRules,
    pub tables: &'a ValuationTables,
}

/// Derive one pasture from its upstream description and members.
///
/// Supplied condition and food reports are used as-is; missing ones are
/// estimated or stubbed.
pub fn derive_pasture(
    spec: &PastureSpec,
    members: &[&Animal],
    cache: &mut CapacityCache,
    ctx: DeriveContext<'_>,
) -> Pasture {
    let start = Instant::now();
    log_op_start!("derive_pasture", pasture = spec.id);

    let capacity = cache.resolve(ctx.rules, spec, members);
    let condition = spec
        .condition
        .clone()
        .unwrap_or_else(|| estimate_condition(members));
    let food = spec
        .food
        .clone()
        .unwrap_or_else(|| FoodReport::stub(members.len()));

    let name = if spec.name.trim().is_empty() {
        spec.id.as_str()
    } else {
        spec.name.as_str()
    };
    let warnings = derive_warnings(
        &WarningInput {
            pasture_name: name,
            capacity: &capacity,
            members,
            condition: &condition,
            food: &food,
        },
        ctx.tables,
    );

    let pasture = Pasture {
        id: spec.id.clone(),
        name: name.to_string(),
        capacity: capacity.capacity,
        capacity_source: capacity.source,
        capacity_method: capacity.method,
        location_type: spec.location_type.clone(),
        farm_id: spec.farm_id.clone(),
        member_ids: members.iter().map(|a| a.id.clone()).collect(),
        animal_count: members.len(),
        avg_health: average_health(members),
        total_value: value_group(members.iter().copied(), ctx.tables),
        condition_report: condition,
        food_report: food,
        all_warnings: warnings,
    };

    log_op_end!(
        "derive_pasture",
        start,
        pasture = spec.id,
        animal_count = pasture.animal_count,
        warning_count = pasture.all_warnings.len()
    );
    pasture
}

/// Derive every pasture for a herd.
///
/// Each spec collects the animals whose container key matches its id or
/// name. Groups of animals that no spec claims become implicit pastures
/// named after their location. Output is ordered by pasture id.
pub fn derive_pastures(
    animals: &[Animal],
    specs: &[PastureSpec],
    cache: &mut CapacityCache,
    ctx: DeriveContext<'_>,
) -> Vec<Pasture> {
    let groups = group_by_location(animals);
    let mut claimed: Vec<&str> = Vec::new();
    let mut pastures = Vec::with_capacity(specs.len() + groups.len());

    for spec in specs {
        let members: Vec<&Animal> = groups
            .iter()
            .filter(|(key, _)| spec.matches(key))
            .flat_map(|(key, members)| {
                claimed.push(key.as_str());
                members.iter().copied()
            })
            .collect();
        pastures.push(derive_pasture(spec, &members, cache, ctx));
    }

    for (key, members) in &groups {
        if claimed.contains(&key.as_str()) {
            continue;
        }
        let spec = PastureSpec::implicit(key);
        pastures.push(derive_pasture(&spec, members, cache, ctx));
    }

    pastures.sort_by(|a, b| a.id.cmp(&b.id));
    pastures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CapacitySource, WarningType};

    fn animal(id: &str, sub_type: &str, location: &str, health: f64) -> Animal {
        let mut a = Animal::new(id, sub_type);
        a.location = location.to_string();
        a.health = health;
        a
    }

    #[test]
    fn test_group_by_location_skips_free_roaming() {
        let animals = vec![
            animal("1", "COW_ANGUS", "Barn", 90.0),
            animal("2", "COW_ANGUS", "", 90.0),
            animal("3", "PIG_LANDRACE", "Sty", 90.0),
            animal("4", "COW_ANGUS", "Barn", 90.0),
        ];
        let groups = group_by_location(&animals);
        assert_eq!(groups.len(), 2);
        let barn: Vec<&str> = groups["Barn"].iter().map(|a| a.id.as_str()).collect();
        assert_eq!(barn, vec!["1", "4"]);
    }

    #[test]
    fn test_estimate_condition() {
        let mut cow = animal("1", "COW_HOLSTEIN", "Barn", 80.0);
        cow.is_lactating = true;
        let mut goat = animal("2", "GOAT", "Barn", 60.0);
        goat.is_lactating = true;
        let hen = animal("3", "CHICKEN", "Barn", 100.0);
        let report = estimate_condition(&[&cow, &goat, &hen]);
        assert_eq!(report.productivity, 80.0);
        assert_eq!(report.milk, 24.0);
        assert_eq!(report.straw, 1.0);
        assert!((report.manure - 2.05).abs() < 1e-9);
    }

    #[test]
    fn test_empty_pasture_has_zero_aggregates() {
        let rules = CapacityRules::default();
        let tables = ValuationTables::default();
        let mut cache = CapacityCache::new();
        let ctx = DeriveContext {
            rules: &rules,
            tables: &tables,
        };
        let pasture = derive_pasture(&PastureSpec::new("p", "Empty"), &[], &mut cache, ctx);
        assert_eq!(pasture.animal_count, 0);
        assert_eq!(pasture.avg_health, 0.0);
        assert_eq!(pasture.condition_report.productivity, 0.0);
        assert_eq!(pasture.total_value, 0);
        assert!(pasture.all_warnings.is_empty());
        assert_eq!(pasture.capacity_source, CapacitySource::Default);
    }

    #[test]
    fn test_derive_pastures_claims_and_implicit_groups() {
        let rules = CapacityRules::default();
        let tables = ValuationTables::default();
        let mut cache = CapacityCache::new();
        let ctx = DeriveContext {
            rules: &rules,
            tables: &tables,
        };
        let animals: Vec<Animal> = (0..18)
            .map(|i| animal(&i.to_string(), "COW_ANGUS", "North", 95.0))
            .chain(std::iter::once(animal("x", "PIG_LANDRACE", "Sty", 30.0)))
            .collect();
        let mut north = PastureSpec::new("p-north", "North");
        north.capacity = Some(20);

        let pastures = derive_pastures(&animals, &[north], &mut cache, ctx);
        assert_eq!(pastures.len(), 2);

        let north = pastures.iter().find(|p| p.id == "p-north").unwrap();
        assert_eq!(north.animal_count, 18);
        assert_eq!(north.member_ids.len(), north.animal_count);
        let capacity: Vec<_> = north
            .all_warnings
            .iter()
            .filter(|w| w.warning_type == WarningType::Capacity)
            .collect();
        assert_eq!(capacity.len(), 1);

        let sty = pastures.iter().find(|p| p.id == "Sty").unwrap();
        assert_eq!(sty.avg_health, 30.0);
        assert!(sty
            .all_warnings
            .iter()
            .any(|w| w.warning_type == WarningType::Health));
    }
}
