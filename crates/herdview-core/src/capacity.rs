//! Pasture capacity derivation.
//!
//! Capacity comes from the first source that yields a figure: an explicit
//! attribute, the fenced area divided by the space one animal needs, a
//! building-type keyword, or a flat default.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::model::{Animal, CapacityEstimate, CapacitySource, FencePoint, PastureSpec};

pub const DEFAULT_CAPACITY: u32 = 50;

/// Square metres per animal when the dominant type has no table entry.
const FALLBACK_AREA_PER_ANIMAL: f64 = 20.0;

const AREA_PER_ANIMAL: &[(&str, f64)] = &[
    ("COW", 40.0),
    ("PIG", 5.0),
    ("SHEEP", 15.0),
    ("GOAT", 15.0),
    ("HORSE", 100.0),
    ("CHICKEN", 1.0),
];

// Checked in order; specific sizes before their generic keyword.
const BUILDING_KEYWORDS: &[(&str, u32)] = &[
    ("cowbarnlarge", 120),
    ("cowbarnbig", 120),
    ("cowbarnmedium", 80),
    ("cowbarnsmall", 40),
    ("cowbarn", 60),
    ("pigbarnlarge", 250),
    ("pigbarn", 150),
    ("sheepbarn", 60),
    ("goat", 60),
    ("horsestable", 12),
    ("stable", 10),
    ("chickencoop", 300),
    ("chicken", 300),
    ("henhouse", 300),
    ("pasture", 50),
];

/// Tunable capacity heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityRules {
    /// Square metres one animal of a base type needs
    pub area_per_animal: BTreeMap<String, f64>,
    /// `(keyword, capacity)` pairs matched against the squashed building type
    pub building_keywords: Vec<(String, u32)>,
    pub default_capacity: u32,
}

impl Default for CapacityRules {
    fn default() -> Self {
        Self {
            area_per_animal: AREA_PER_ANIMAL
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            building_keywords: BUILDING_KEYWORDS
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            default_capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Partial capacity overrides, as read from configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityOverrides {
    pub area_per_animal: BTreeMap<String, f64>,
    /// Checked before the built-in keywords
    pub building_keywords: Vec<(String, u32)>,
    pub default_capacity: Option<u32>,
}

impl CapacityRules {
    /// Merge overrides on top of these rules; override entries win.
    pub fn merged_with(mut self, overrides: &CapacityOverrides) -> Self {
        for (k, v) in &overrides.area_per_animal {
            self.area_per_animal.insert(k.to_ascii_uppercase(), *v);
        }
        let mut keywords: Vec<(String, u32)> = overrides
            .building_keywords
            .iter()
            .map(|(k, v)| (squash(k), *v))
            .collect();
        keywords.append(&mut self.building_keywords);
        self.building_keywords = keywords;
        if let Some(capacity) = overrides.default_capacity {
            self.default_capacity = capacity;
        }
        self
    }

    /// Area per animal for a base type.
    pub fn area_for(&self, animal_type: &str) -> f64 {
        self.area_per_animal
            .get(animal_type)
            .copied()
            .filter(|a| *a > 0.0)
            .unwrap_or(FALLBACK_AREA_PER_ANIMAL)
    }

    /// Resolve a capacity without caching.
    pub fn resolve(&self, spec: &PastureSpec, members: &[&Animal]) -> CapacityEstimate {
        if let Some(capacity) = spec.capacity.filter(|c| *c > 0) {
            return CapacityEstimate {
                capacity,
                source: CapacitySource::Explicit,
                method: "capacity stated by placeable".to_string(),
            };
        }
        if let Some(estimate) = self.from_fence(spec, members) {
            return estimate;
        }
        if let Some(estimate) = self.from_building(spec) {
            return estimate;
        }
        CapacityEstimate {
            capacity: self.default_capacity,
            source: CapacitySource::Default,
            method: format!("default capacity of {}", self.default_capacity),
        }
    }

    fn from_fence(&self, spec: &PastureSpec, members: &[&Animal]) -> Option<CapacityEstimate> {
        let area = polygon_area(&spec.fence)?;
        let dominant = dominant_type(members);
        let per_animal = self.area_for(&dominant);
        let capacity = ((area / per_animal).floor() as u32).max(1);
        let label = if dominant.is_empty() {
            "animal".to_string()
        } else {
            dominant.to_ascii_lowercase()
        };
        Some(CapacityEstimate {
            capacity,
            source: CapacitySource::FencedArea,
            method: format!("{area:.0} m² fenced area / {per_animal} m² per {label}"),
        })
    }

    fn from_building(&self, spec: &PastureSpec) -> Option<CapacityEstimate> {
        let raw = if spec.building_type.trim().is_empty() {
            &spec.name
        } else {
            &spec.building_type
        };
        let squashed = squash(raw);
        if squashed.is_empty() {
            return None;
        }
        self.building_keywords
            .iter()
            .find(|(keyword, _)| squashed.contains(keyword.as_str()))
            .map(|(keyword, capacity)| CapacityEstimate {
                capacity: *capacity,
                source: CapacitySource::BuildingType,
                method: format!("building type '{}' matches '{keyword}'", raw.trim()),
            })
    }
}

/// Lowercase with spaces, underscores and dashes removed.
fn squash(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Shoelace area of a closed fence polygon.
///
/// `None` for fewer than three corners or a degenerate polygon.
pub fn polygon_area(points: &[FencePoint]) -> Option<f64> {
    if points.len() < 3 {
        return None;
    }
    let twice: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.z - b.x * a.z)
        .sum();
    let area = twice.abs() / 2.0;
    (area.is_finite() && area > 0.0).then_some(area)
}

/// Most common base type among members; ties break alphabetically.
pub fn dominant_type(members: &[&Animal]) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for animal in members {
        if !animal.animal_type.is_empty() {
            *counts.entry(animal.animal_type.as_str()).or_default() += 1;
        }
    }
    let mut best: Option<(&str, usize)> = None;
    for (t, n) in counts {
        if best.map_or(true, |(_, m)| n > m) {
            best = Some((t, n));
        }
    }
    best.map(|(t, _)| t.to_string()).unwrap_or_default()
}

/// Memo of geometry-derived capacities, keyed by pasture id.
///
/// An entry is reused only while the pasture's fence area and dominant type
/// are unchanged, so one pasture's figure never answers for another.
#[derive(Debug, Default)]
pub struct CapacityCache {
    entries: HashMap<String, (String, CapacityEstimate)>,
}

impl CapacityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve capacity, reusing a cached fenced-area figure when the
    /// geometry fingerprint still matches.
    pub fn resolve(
        &mut self,
        rules: &CapacityRules,
        spec: &PastureSpec,
        members: &[&Animal],
    ) -> CapacityEstimate {
        if spec.capacity.is_some_and(|c| c > 0) {
            return rules.resolve(spec, members);
        }
        let Some(area) = polygon_area(&spec.fence) else {
            return rules.resolve(spec, members);
        };
        let fingerprint = format!("{area:.3}|{}", dominant_type(members));
        if let Some((cached_fp, estimate)) = self.entries.get(&spec.id) {
            if *cached_fp == fingerprint {
                return estimate.clone();
            }
        }
        let estimate = rules.resolve(spec, members);
        self.entries
            .insert(spec.id.clone(), (fingerprint, estimate.clone()));
        estimate
    }

    pub fn invalidate(&mut self, pasture_id: &str) {
        self.entries.remove(pasture_id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(side: f64) -> Vec<FencePoint> {
        vec![
            FencePoint { x: 0.0, z: 0.0 },
            FencePoint { x: side, z: 0.0 },
            FencePoint { x: side, z: side },
            FencePoint { x: 0.0, z: side },
        ]
    }

    fn cows(n: usize) -> Vec<Animal> {
        (0..n)
            .map(|i| Animal::new(i.to_string(), "COW_ANGUS"))
            .collect()
    }

    #[test]
    fn test_explicit_capacity_wins() {
        let mut spec = PastureSpec::new("p1", "Cow Barn Large");
        spec.capacity = Some(33);
        spec.fence = square(100.0);
        let est = CapacityRules::default().resolve(&spec, &[]);
        assert_eq!(est.capacity, 33);
        assert_eq!(est.source, CapacitySource::Explicit);
    }

    #[test]
    fn test_zero_explicit_capacity_is_ignored() {
        let mut spec = PastureSpec::new("p1", "Meadow");
        spec.capacity = Some(0);
        let est = CapacityRules::default().resolve(&spec, &[]);
        assert_eq!(est.source, CapacitySource::Default);
        assert_eq!(est.capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn test_fenced_area_by_dominant_type() {
        let mut spec = PastureSpec::new("p1", "Meadow");
        spec.fence = square(20.0);
        let herd = cows(3);
        let members: Vec<&Animal> = herd.iter().collect();
        let est = CapacityRules::default().resolve(&spec, &members);
        // 400 m² / 40 m² per cow
        assert_eq!(est.capacity, 10);
        assert_eq!(est.source, CapacitySource::FencedArea);
    }

    #[test]
    fn test_tiny_fence_still_holds_one() {
        let mut spec = PastureSpec::new("p1", "Paddock");
        spec.fence = square(2.0);
        let herd = cows(1);
        let members: Vec<&Animal> = herd.iter().collect();
        assert_eq!(CapacityRules::default().resolve(&spec, &members).capacity, 1);
    }

    #[test]
    fn test_degenerate_fence_falls_through() {
        let mut spec = PastureSpec::new("p1", "Pig Barn");
        spec.fence = vec![FencePoint { x: 0.0, z: 0.0 }, FencePoint { x: 5.0, z: 5.0 }];
        let est = CapacityRules::default().resolve(&spec, &[]);
        assert_eq!(est.source, CapacitySource::BuildingType);
        assert_eq!(est.capacity, 150);
    }

    #[test]
    fn test_building_keywords_prefer_specific_sizes() {
        let rules = CapacityRules::default();
        let mut spec = PastureSpec::new("p1", "");
        spec.building_type = "COW_BARN_LARGE".to_string();
        assert_eq!(rules.resolve(&spec, &[]).capacity, 120);
        spec.building_type = "cow barn".to_string();
        assert_eq!(rules.resolve(&spec, &[]).capacity, 60);
        spec.building_type = "Horse Stable".to_string();
        assert_eq!(rules.resolve(&spec, &[]).capacity, 12);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let overrides = CapacityOverrides {
            area_per_animal: [("cow".to_string(), 100.0)].into_iter().collect(),
            building_keywords: vec![("Cow Barn".to_string(), 75)],
            default_capacity: Some(25),
        };
        let rules = CapacityRules::default().merged_with(&overrides);
        assert_eq!(rules.area_for("COW"), 100.0);
        let mut spec = PastureSpec::new("p1", "");
        spec.building_type = "cow_barn_large".to_string();
        assert_eq!(rules.resolve(&spec, &[]).capacity, 75);
        spec.building_type.clear();
        assert_eq!(rules.resolve(&spec, &[]).capacity, 25);
    }

    #[test]
    fn test_shoelace_orientation_independent() {
        let mut pts = square(10.0);
        assert_eq!(polygon_area(&pts), Some(100.0));
        pts.reverse();
        assert_eq!(polygon_area(&pts), Some(100.0));
    }

    #[test]
    fn test_cache_keys_by_pasture_identity() {
        let rules = CapacityRules::default();
        let mut cache = CapacityCache::new();
        let herd = cows(2);
        let members: Vec<&Animal> = herd.iter().collect();

        let mut a = PastureSpec::new("a", "A");
        a.fence = square(20.0);
        let mut b = PastureSpec::new("b", "B");
        b.fence = square(40.0);

        assert_eq!(cache.resolve(&rules, &a, &members).capacity, 10);
        assert_eq!(cache.resolve(&rules, &b, &members).capacity, 40);
        assert_eq!(cache.resolve(&rules, &a, &members).capacity, 10);
        assert_eq!(cache.len(), 2);

        // Geometry change under the same id is recomputed
        a.fence = square(40.0);
        assert_eq!(cache.resolve(&rules, &a, &members).capacity, 40);

        cache.invalidate("a");
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
