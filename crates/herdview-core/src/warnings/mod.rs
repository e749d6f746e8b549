//! Warning derivation engine.
//!
//! [`derive_warnings`] is a pure function of a pasture's members and context.
//! Each rule is evaluated independently; emission order (capacity, food,
//! health, production, maintenance, breeding, age, dairy optimization) is for
//! display only.
//!
//! Birth-due and breeding-risk findings are computed separately by
//! [`birth::forecast_births`] and never appear in a pasture's warnings.

pub mod birth;
pub mod rules;

pub use birth::{forecast_births, BirthDue, BirthForecast, BreedingRisk};

use crate::model::{Animal, CapacityEstimate, ConditionReport, FoodReport, Warning};
use crate::valuation::ValuationTables;

const LIFE_EXPECTANCY: &[(&str, f64)] = &[
    ("COW", 240.0),
    ("PIG", 180.0),
    ("SHEEP", 144.0),
    ("GOAT", 168.0),
    ("HORSE", 360.0),
    ("CHICKEN", 96.0),
];
const DEFAULT_LIFE_EXPECTANCY: f64 = 200.0;

const GESTATION: &[(&str, f64)] = &[
    ("COW", 9.0),
    ("PIG", 4.0),
    ("SHEEP", 5.0),
    ("GOAT", 5.0),
    ("HORSE", 11.0),
    ("CHICKEN", 1.0),
];
const DEFAULT_GESTATION: f64 = 6.0;

fn lookup(table: &[(&str, f64)], animal_type: &str, fallback: f64) -> f64 {
    table
        .iter()
        .find(|(t, _)| *t == animal_type)
        .map(|(_, v)| *v)
        .unwrap_or(fallback)
}

/// Life expectancy in months for a base type.
pub fn life_expectancy(animal_type: &str) -> f64 {
    lookup(LIFE_EXPECTANCY, animal_type, DEFAULT_LIFE_EXPECTANCY)
}

/// Gestation period in months for a base type.
pub fn gestation_months(animal_type: &str) -> f64 {
    lookup(GESTATION, animal_type, DEFAULT_GESTATION)
}

/// Everything the engine needs to know about one pasture.
#[derive(Debug, Clone, Copy)]
pub struct WarningInput<'a> {
    pub pasture_name: &'a str,
    pub capacity: &'a CapacityEstimate,
    pub members: &'a [&'a Animal],
    pub condition: &'a ConditionReport,
    pub food: &'a FoodReport,
}

/// Derive every warning that currently holds for a pasture.
pub fn derive_warnings(input: &WarningInput<'_>, tables: &ValuationTables) -> Vec<Warning> {
    let mut warnings = Vec::new();
    warnings.extend(rules::capacity(input, tables));
    warnings.extend(rules::food(input));
    warnings.extend(rules::health(input));
    warnings.extend(rules::production(input));
    warnings.extend(rules::maintenance(input));
    warnings.extend(rules::breeding(input));
    warnings.extend(rules::age(input));
    warnings.extend(rules::dairy_optimization(input));
    warnings
}
