//! Valuation engine.
//!
//! Heuristic market price of an animal, mirroring the in-game economy
//! formula. The arithmetic is compatibility-critical: curve shapes and
//! factor order must not be simplified.
//!
//! ## Pipeline
//!
//! 1. Table lookup (sub-type, then base type, then global default)
//! 2. Age curve gives the sell price
//! 3. Weight, health and meat-quality factors
//! 4. Quality and weight-quality adjustments
//! 5. Pregnancy (+25%) and lactation (+15%) premiums
//! 6. Horse blend or standard blend, floored at 5%

pub mod tables;

pub use tables::{AgeCurve, AgeCurves, CurveKind, PriceEntry, ValuationOverrides, ValuationTables};

use serde::{Deserialize, Serialize};

use crate::model::Animal;

/// Share of the target weight a healthy animal is expected to reach by
/// reproductive maturity.
const TARGET_FOR_AGE_SCALE: f64 = 0.85;
const PREGNANT_PREMIUM: f64 = 0.25;
const LACTATING_PREMIUM: f64 = 0.15;
const FLOOR_RATIO: f64 = 0.05;

/// Intermediate figures of a valuation, for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationBreakdown {
    pub base_value: f64,
    pub curve: CurveKind,
    pub age_factor: f64,
    /// Sell price after the age curve, before adjustments
    pub age_price: f64,
    pub target_weight_for_age: f64,
    pub weight_factor: f64,
    pub health_factor: f64,
    pub meat_factor: f64,
    /// Sell price after quality adjustments and premiums
    pub sell_price: f64,
    pub pregnancy_premium: f64,
    pub lactation_premium: f64,
    /// Blend result before the floor is applied
    pub computed_value: f64,
    /// Externally reported minimum (`base_value × 0.05`)
    pub floor: f64,
}

/// A rounded value and the figures that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Valuation {
    pub value: i64,
    pub breakdown: ValuationBreakdown,
}

/// Expected weight at `age` months: interpolated from birth weight to
/// target weight over the reproduction-age window, scaled by 0.85.
pub fn target_weight_for_age(entry: &PriceEntry, age: f64) -> f64 {
    let progress = if entry.reproduction_min_age > 0.0 {
        (age / entry.reproduction_min_age).clamp(0.0, 1.0)
    } else {
        1.0
    };
    (entry.min_weight + (entry.target_weight - entry.min_weight) * progress) * TARGET_FOR_AGE_SCALE
}

fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        fallback
    }
}

/// Market value of one animal.
///
/// Deterministic in the animal's attributes. Weight is used as normalized,
/// so a missing weight (0) zeroes the weight factor and the result leans on
/// the floor. Missing genetics count as average quality and missing horse
/// attributes as 0.
pub fn value(animal: &Animal, tables: &ValuationTables) -> Valuation {
    let entry = tables.lookup(&animal.sub_type);
    let curve = ValuationTables::curve_kind(animal);
    let age = finite_or(animal.age, 0.0).max(0.0);

    let age_factor = tables.curves.get(curve).factor_at(age);
    let age_price = entry.base_value * age_factor;

    let twa = target_weight_for_age(&entry, age);
    let weight = finite_or(animal.weight, 0.0);
    let weight_factor = if twa > 0.0 {
        1.0 + (weight - twa) / twa
    } else {
        1.0
    };
    let health_factor = (finite_or(animal.health, 0.0) / 100.0).clamp(0.0, 1.0);
    let meat_factor = finite_or(animal.meat_factor(), 1.0);

    let mut sell = age_price;
    sell += sell * 0.25 * (meat_factor - 1.0);
    if entry.target_weight > 0.0 {
        sell += sell * 0.6 / entry.target_weight * weight * (meat_factor - 1.0);
    }

    // Both premiums are taken on the adjusted price, then added.
    let adjusted = sell;
    let pregnancy_premium = if animal.is_pregnant {
        adjusted * PREGNANT_PREMIUM
    } else {
        0.0
    };
    let lactation_premium = if animal.is_lactating {
        adjusted * LACTATING_PREMIUM
    } else {
        0.0
    };
    sell += pregnancy_premium + lactation_premium;

    let computed_value = if animal.animal_type == "HORSE" {
        let riding = animal.riding.unwrap_or(0.0) / 100.0;
        let fitness = animal.fitness.unwrap_or(0.0) / 100.0;
        let dirt = animal.dirt.unwrap_or(0.0) / 100.0;
        let blend = 0.4 * health_factor + 0.3 * riding + 0.2 * fitness + 0.1 * (1.0 - dirt);
        sell * blend * meat_factor * weight_factor
    } else {
        sell * 0.6 + sell * 0.4 * weight_factor * 0.75 * health_factor
    };

    let floor = entry.base_value * FLOOR_RATIO;
    let floored = finite_or(computed_value, 0.0)
        .max(finite_or(sell, 0.0).max(0.0) * FLOOR_RATIO)
        .max(floor);

    Valuation {
        value: floored.round() as i64,
        breakdown: ValuationBreakdown {
            base_value: entry.base_value,
            curve,
            age_factor,
            age_price,
            target_weight_for_age: twa,
            weight_factor,
            health_factor,
            meat_factor,
            sell_price: sell,
            pregnancy_premium,
            lactation_premium,
            computed_value,
            floor,
        },
    }
}

/// Sum of member values.
pub fn value_group<'a, I>(animals: I, tables: &ValuationTables) -> i64
where
    I: IntoIterator<Item = &'a Animal>,
{
    animals.into_iter().map(|a| value(a, tables).value).sum()
}
