//! Economic lookup tables.
//!
//! Species and breed parameters are data, not code: adding a breed is one
//! more table row (or one more entry in a config override), never a new
//! branch.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{derive_type, Animal};

/// Economic parameters for one sub-type or base type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    /// Price of a prime adult at average condition
    pub base_value: f64,
    /// Adult target weight in kg
    pub target_weight: f64,
    /// Birth weight in kg
    pub min_weight: f64,
    /// Age in months at which the animal reaches reproductive maturity
    pub reproduction_min_age: f64,
}

impl PriceEntry {
    const fn new(
        base_value: f64,
        target_weight: f64,
        min_weight: f64,
        reproduction_min_age: f64,
    ) -> Self {
        Self {
            base_value,
            target_weight,
            min_weight,
            reproduction_min_age,
        }
    }
}

/// Piecewise-linear curve of price factor (fraction of base value) over age
/// in months. Ages outside the keyframes clamp to the first/last factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeCurve {
    /// `(age_months, factor)` keyframes in ascending age order
    pub points: Vec<(f64, f64)>,
}

impl AgeCurve {
    fn from_points(points: &[(f64, f64)]) -> Self {
        Self {
            points: points.to_vec(),
        }
    }

    /// Interpolated price factor at `age` months.
    pub fn factor_at(&self, age: f64) -> f64 {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(f), Some(l)) => (*f, *l),
            _ => return 1.0,
        };
        if age <= first.0 {
            return first.1;
        }
        if age >= last.0 {
            return last.1;
        }
        for pair in self.points.windows(2) {
            let (a0, f0) = pair[0];
            let (a1, f1) = pair[1];
            if age >= a0 && age <= a1 {
                if a1 <= a0 {
                    return f1;
                }
                return f0 + (f1 - f0) * (age - a0) / (a1 - a0);
            }
        }
        last.1
    }
}

/// Which age curve prices an animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    Cow,
    Bull,
    Horse,
    Default,
}

/// The four age curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeCurves {
    pub cow: AgeCurve,
    pub bull: AgeCurve,
    pub horse: AgeCurve,
    pub default: AgeCurve,
}

impl AgeCurves {
    pub fn get(&self, kind: CurveKind) -> &AgeCurve {
        match kind {
            CurveKind::Cow => &self.cow,
            CurveKind::Bull => &self.bull,
            CurveKind::Horse => &self.horse,
            CurveKind::Default => &self.default,
        }
    }
}

impl Default for AgeCurves {
    fn default() -> Self {
        Self {
            cow: AgeCurve::from_points(COW_CURVE),
            bull: AgeCurve::from_points(BULL_CURVE),
            horse: AgeCurve::from_points(HORSE_CURVE),
            default: AgeCurve::from_points(DEFAULT_CURVE),
        }
    }
}

const COW_CURVE: &[(f64, f64)] = &[(0.0, 0.3), (18.0, 1.0), (120.0, 1.0), (240.0, 0.4)];
const BULL_CURVE: &[(f64, f64)] = &[(0.0, 0.3), (24.0, 1.0), (96.0, 1.0), (180.0, 0.35)];
const HORSE_CURVE: &[(f64, f64)] = &[(0.0, 0.4), (36.0, 1.0), (180.0, 1.0), (360.0, 0.3)];
const DEFAULT_CURVE: &[(f64, f64)] = &[(0.0, 0.25), (12.0, 1.0), (60.0, 1.0), (144.0, 0.4)];

const SUBTYPE_PRICES: &[(&str, PriceEntry)] = &[
    ("COW_SWISS_BROWN", PriceEntry::new(2600.0, 700.0, 45.0, 18.0)),
    ("COW_HOLSTEIN", PriceEntry::new(2500.0, 680.0, 42.0, 18.0)),
    ("COW_ANGUS", PriceEntry::new(2300.0, 620.0, 35.0, 18.0)),
    ("COW_LIMOUSIN", PriceEntry::new(2400.0, 700.0, 40.0, 18.0)),
    ("COW_HEREFORD", PriceEntry::new(2350.0, 650.0, 38.0, 18.0)),
    ("COW_AYRSHIRE", PriceEntry::new(2300.0, 600.0, 35.0, 18.0)),
    ("COW_BRAHMAN", PriceEntry::new(2200.0, 600.0, 30.0, 20.0)),
    ("COW_WATERBUFFALO", PriceEntry::new(2800.0, 650.0, 40.0, 24.0)),
    ("BULL_HOLSTEIN", PriceEntry::new(3000.0, 1000.0, 42.0, 15.0)),
    ("BULL_ANGUS", PriceEntry::new(3200.0, 950.0, 35.0, 15.0)),
    ("BULL_LIMOUSIN", PriceEntry::new(3400.0, 1100.0, 40.0, 15.0)),
    ("BULL_HEREFORD", PriceEntry::new(3100.0, 1000.0, 38.0, 15.0)),
    ("PIG_LANDRACE", PriceEntry::new(450.0, 120.0, 1.5, 8.0)),
    ("PIG_BLACK_PIED", PriceEntry::new(480.0, 115.0, 1.4, 8.0)),
    ("PIG_BERKSHIRE", PriceEntry::new(520.0, 110.0, 1.3, 8.0)),
    ("SHEEP_LANDRACE", PriceEntry::new(350.0, 75.0, 4.0, 10.0)),
    ("SHEEP_STEINSCHAF", PriceEntry::new(330.0, 70.0, 4.0, 10.0)),
    ("SHEEP_SWISS_MOUNTAIN", PriceEntry::new(370.0, 80.0, 4.5, 10.0)),
    ("SHEEP_BLACK_WELSH", PriceEntry::new(360.0, 65.0, 3.5, 10.0)),
    ("CHICKEN_ROOSTER", PriceEntry::new(30.0, 3.2, 0.05, 5.0)),
];

const TYPE_PRICES: &[(&str, PriceEntry)] = &[
    ("COW", PriceEntry::new(2400.0, 650.0, 40.0, 18.0)),
    ("BULL", PriceEntry::new(3200.0, 1000.0, 40.0, 15.0)),
    ("PIG", PriceEntry::new(470.0, 115.0, 1.4, 8.0)),
    ("SHEEP", PriceEntry::new(350.0, 72.0, 4.0, 10.0)),
    ("GOAT", PriceEntry::new(400.0, 60.0, 3.0, 8.0)),
    ("HORSE", PriceEntry::new(8000.0, 550.0, 50.0, 36.0)),
    ("CHICKEN", PriceEntry::new(25.0, 2.5, 0.05, 5.0)),
];

const DEFAULT_PRICE: PriceEntry = PriceEntry::new(1000.0, 300.0, 20.0, 12.0);

/// Complete valuation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationTables {
    pub subtypes: BTreeMap<String, PriceEntry>,
    pub types: BTreeMap<String, PriceEntry>,
    pub fallback: PriceEntry,
    pub curves: AgeCurves,
}

impl Default for ValuationTables {
    fn default() -> Self {
        let to_map = |rows: &[(&str, PriceEntry)]| {
            rows.iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<BTreeMap<_, _>>()
        };
        Self {
            subtypes: to_map(SUBTYPE_PRICES),
            types: to_map(TYPE_PRICES),
            fallback: DEFAULT_PRICE,
            curves: AgeCurves::default(),
        }
    }
}

impl ValuationTables {
    /// Price entry for a sub-type: exact sub-type, then base-type prefix,
    /// then the global fallback.
    pub fn lookup(&self, sub_type: &str) -> PriceEntry {
        let key = sub_type.trim().to_ascii_uppercase();
        if let Some(entry) = self.subtypes.get(&key) {
            return *entry;
        }
        self.types
            .get(&derive_type(&key))
            .copied()
            .unwrap_or(self.fallback)
    }

    /// Merge overrides on top of these tables; override rows win.
    pub fn merged_with(mut self, overrides: &ValuationOverrides) -> Self {
        for (k, v) in &overrides.subtypes {
            self.subtypes.insert(k.to_ascii_uppercase(), *v);
        }
        for (k, v) in &overrides.types {
            self.types.insert(k.to_ascii_uppercase(), *v);
        }
        if let Some(fallback) = overrides.fallback {
            self.fallback = fallback;
        }
        self
    }

    /// Age curve that prices this animal.
    ///
    /// Bull sub-types and male cattle use the bull curve.
    pub fn curve_kind(animal: &Animal) -> CurveKind {
        let sub = animal.sub_type.to_ascii_uppercase();
        match animal.animal_type.as_str() {
            _ if sub.contains("BULL") => CurveKind::Bull,
            "COW" if animal.is_male() => CurveKind::Bull,
            "COW" => CurveKind::Cow,
            "HORSE" => CurveKind::Horse,
            _ => CurveKind::Default,
        }
    }
}

/// Partial table overrides, as read from configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationOverrides {
    pub subtypes: BTreeMap<String, PriceEntry>,
    pub types: BTreeMap<String, PriceEntry>,
    pub fallback: Option<PriceEntry>,
}
