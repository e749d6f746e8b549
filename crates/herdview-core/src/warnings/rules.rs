//! Individual warning rules. Each returns the warnings its condition
//! produces for one pasture, independently of every other rule.

use std::collections::BTreeSet;

use super::{life_expectancy, WarningInput};
use crate::model::{
    Animal, FoodType, MotherOffspringPair, Severity, Warning, WarningDetails, WarningType,
};
use crate::valuation::{value_group, ValuationTables};

const CAPACITY_WARN_PERCENT: u64 = 90;
const FOOD_WARN_PERCENT: f64 = 20.0;
const FOOD_DANGER_PERCENT: f64 = 10.0;
const SICK_HEALTH: f64 = 70.0;
const CRITICAL_HEALTH: f64 = 20.0;
const PRODUCTION_MIN_LACTATING_COWS: usize = 5;
const COW_DAILY_MILK: f64 = 20.0;
const MANURE_PER_ANIMAL_LIMIT: f64 = 2.0;
const BREEDING_MIN_FEMALES: usize = 10;
const BREEDING_MAX_RATIO: f64 = 20.0;
const AGING_SHARE: f64 = 0.8;
const DAIRY_TYPES: &[&str] = &["COW", "GOAT", "SHEEP"];
const YOUNG_AGE_MONTHS: f64 = 12.0;
const MILK_GAIN_PER_MOTHER: f64 = 15.0;

fn ids<'a>(animals: impl IntoIterator<Item = &'a &'a Animal>) -> Vec<String> {
    animals.into_iter().map(|a| a.id.clone()).collect()
}

/// Utilization at or above 90% warns; at or above 100% is dangerous.
///
/// The threshold is compared in integers so exactly 90% always warns.
pub fn capacity(input: &WarningInput<'_>, tables: &ValuationTables) -> Option<Warning> {
    let count = input.members.len();
    let cap = input.capacity.capacity;
    if cap == 0 || count == 0 {
        return None;
    }
    let (count_scaled, cap_scaled) = (count as u64 * 100, u64::from(cap));
    if count_scaled < cap_scaled * CAPACITY_WARN_PERCENT {
        return None;
    }
    let utilization = count as f64 / f64::from(cap) * 100.0;
    let (severity, message) = if count as u64 >= u64::from(cap) {
        (
            Severity::Danger,
            format!(
                "{} is at or over capacity ({count}/{cap}, {utilization:.0}%)",
                input.pasture_name
            ),
        )
    } else {
        (
            Severity::Warning,
            format!(
                "{} is nearly full ({count}/{cap}, {utilization:.0}%)",
                input.pasture_name
            ),
        )
    };
    let available = u32::try_from(count)
        .map(|c| cap.saturating_sub(c))
        .unwrap_or(0);
    Some(
        Warning::new(WarningType::Capacity, severity, message).with_details(
            WarningDetails::Capacity {
                current_count: count,
                capacity: cap,
                utilization_percent: utilization,
                available_space: available,
                capacity_source: input.capacity.source,
                calculation_method: input.capacity.method.clone(),
                total_value: value_group(input.members.iter().copied(), tables),
            },
        ),
    )
}

/// One warning per known food level below 20% of storage capacity.
pub fn food(input: &WarningInput<'_>) -> Vec<Warning> {
    let total = input.food.total_capacity;
    if total.is_nan() || total <= 0.0 {
        return Vec::new();
    }
    FoodType::ALL
        .iter()
        .filter_map(|food_type| {
            let amount = *input.food.levels.get(food_type)?;
            let percent = amount / total * 100.0;
            if !percent.is_finite() || percent >= FOOD_WARN_PERCENT {
                return None;
            }
            let severity = if percent < FOOD_DANGER_PERCENT {
                Severity::Danger
            } else {
                Severity::Warning
            };
            Some(
                Warning::new(
                    WarningType::Food,
                    severity,
                    format!(
                        "{} is running low in {} ({percent:.0}% left)",
                        food_type.label(),
                        input.pasture_name
                    ),
                )
                .with_details(WarningDetails::Food {
                    food_type: *food_type,
                    amount,
                    total_capacity: total,
                    percent,
                }),
            )
        })
        .collect()
}

/// Sick members (health below 70); dangerous when any is critical (below 20).
pub fn health(input: &WarningInput<'_>) -> Option<Warning> {
    let sick: Vec<&&Animal> = input
        .members
        .iter()
        .filter(|a| a.health < SICK_HEALTH)
        .collect();
    if sick.is_empty() {
        return None;
    }
    let critical = sick.iter().filter(|a| a.health < CRITICAL_HEALTH).count();
    let severity = if critical > 0 {
        Severity::Danger
    } else {
        Severity::Warning
    };
    let message = if critical > 0 {
        format!(
            "{} animals in {} need care, {critical} critical",
            sick.len(),
            input.pasture_name
        )
    } else {
        format!(
            "{} animals in {} need care",
            sick.len(),
            input.pasture_name
        )
    };
    Some(
        Warning::new(WarningType::Health, severity, message)
            .with_affected(ids(sick.iter().copied()))
            .with_details(WarningDetails::Health {
                critical,
                warning: sick.len() - critical,
                total_sick: sick.len(),
            }),
    )
}

/// More than five lactating cows: a milk collection reminder.
pub fn production(input: &WarningInput<'_>) -> Option<Warning> {
    let lactating: Vec<&&Animal> = input
        .members
        .iter()
        .filter(|a| a.is_lactating && a.sub_type.to_ascii_uppercase().contains("COW"))
        .collect();
    if lactating.len() <= PRODUCTION_MIN_LACTATING_COWS {
        return None;
    }
    let milk = COW_DAILY_MILK * lactating.len() as f64;
    Some(
        Warning::new(
            WarningType::Production,
            Severity::Info,
            format!(
                "{} lactating cows in {} produce about {milk:.0} L of milk per day",
                lactating.len(),
                input.pasture_name
            ),
        )
        .with_affected(ids(lactating.iter().copied()))
        .with_details(WarningDetails::Production {
            lactating_cows: lactating.len(),
            estimated_daily_milk: milk,
        }),
    )
}

/// Manure production above two units per animal needs clearing out.
pub fn maintenance(input: &WarningInput<'_>) -> Option<Warning> {
    let manure = input.condition.manure;
    let threshold = MANURE_PER_ANIMAL_LIMIT * input.members.len() as f64;
    if manure.is_nan() || manure <= threshold {
        return None;
    }
    Some(
        Warning::new(
            WarningType::Maintenance,
            Severity::Warning,
            format!(
                "Manure is building up in {} ({manure:.1} per day)",
                input.pasture_name
            ),
        )
        .with_details(WarningDetails::Maintenance { manure, threshold }),
    )
}

/// Too few males for the number of females.
pub fn breeding(input: &WarningInput<'_>) -> Option<Warning> {
    let males = input.members.iter().filter(|a| a.is_male()).count();
    let females = input.members.iter().filter(|a| a.is_female()).count();
    if males == 0 || females <= BREEDING_MIN_FEMALES {
        return None;
    }
    let ratio = females as f64 / males as f64;
    if ratio <= BREEDING_MAX_RATIO {
        return None;
    }
    Some(
        Warning::new(
            WarningType::Breeding,
            Severity::Info,
            format!(
                "{} has {females} females per {males} male(s) (ratio {ratio:.1}:1)",
                input.pasture_name
            ),
        )
        .with_details(WarningDetails::Breeding {
            males,
            females,
            ratio,
        }),
    )
}

/// Whether an animal is past 80% of its type's life expectancy.
pub fn is_aging(animal: &Animal) -> bool {
    animal.age > AGING_SHARE * life_expectancy(&animal.animal_type)
}

/// More than 30% of the herd is aging.
pub fn age(input: &WarningInput<'_>) -> Option<Warning> {
    let total = input.members.len();
    let aging: Vec<&&Animal> = input.members.iter().filter(|a| is_aging(a)).collect();
    // aging / total > 0.3 without float error
    if total == 0 || aging.len() * 10 <= total * 3 {
        return None;
    }
    let percentage = (aging.len() as f64 / total as f64 * 100.0).round() as i64;
    Some(
        Warning::new(
            WarningType::Age,
            Severity::Warning,
            format!(
                "{} of {total} animals in {} are nearing the end of their life expectancy ({percentage}%)",
                aging.len(),
                input.pasture_name
            ),
        )
        .with_affected(ids(aging.iter().copied()))
        .with_details(WarningDetails::Age {
            aging_count: aging.len(),
            total,
            percentage,
        }),
    )
}

/// Lactating dairy mothers sharing a pasture with young of their type.
///
/// One aggregated warning for the whole pasture.
pub fn dairy_optimization(input: &WarningInput<'_>) -> Option<Warning> {
    let mut pairs = Vec::new();
    for mother in input.members.iter() {
        if !mother.is_lactating || !DAIRY_TYPES.contains(&mother.animal_type.as_str()) {
            continue;
        }
        let offspring_ids: Vec<String> = input
            .members
            .iter()
            .filter(|o| {
                o.id != mother.id
                    && o.animal_type == mother.animal_type
                    && o.age < YOUNG_AGE_MONTHS
                    && !o.is_lactating
            })
            .map(|o| o.id.clone())
            .collect();
        if !offspring_ids.is_empty() {
            pairs.push(MotherOffspringPair {
                mother_id: mother.id.clone(),
                mother_type: mother.animal_type.clone(),
                offspring_ids,
            });
        }
    }
    if pairs.is_empty() {
        return None;
    }

    let offspring: BTreeSet<&str> = pairs
        .iter()
        .flat_map(|p| p.offspring_ids.iter().map(String::as_str))
        .collect();
    let total_mothers = pairs.len();
    let total_offspring = offspring.len();
    let gain = MILK_GAIN_PER_MOTHER * total_mothers as f64;

    let mothers: BTreeSet<&str> = pairs.iter().map(|p| p.mother_id.as_str()).collect();
    let mut affected: Vec<String> = pairs.iter().map(|p| p.mother_id.clone()).collect();
    affected.extend(
        offspring
            .iter()
            .filter(|id| !mothers.contains(*id))
            .map(|id| id.to_string()),
    );

    Some(
        Warning::new(
            WarningType::DairyOptimization,
            Severity::Info,
            format!(
                "{total_mothers} lactating mother(s) in {} share the pasture with {total_offspring} young animal(s); separating them could gain about {gain:.0} L of milk per day",
                input.pasture_name
            ),
        )
        .with_affected(affected)
        .with_details(WarningDetails::DairyOptimization {
            pairs,
            total_mothers,
            total_offspring,
            potential_milk_gain: gain,
        }),
    )
}
