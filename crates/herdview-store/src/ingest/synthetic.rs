//! Synthetic completion of aggregate-only herds.
//!
//! Some upstream shapes only report `{pastureId, subType, count}`. This
//! adapter fabricates plausible individuals so the core can treat every
//! herd alike. Age, weight, gender and health are fabricated; pregnancy and
//! lactation never are, since a made-up pregnancy would raise birth and
//! dairy warnings nobody can act on. Every fabricated animal carries
//! `synthetic = true`.
//!
//! The generator is a SHA-256 counter stream seeded by `(seed, herd key)`, so
//! the same aggregate always yields the same animals and successive
//! snapshots diff cleanly.

use herdview_core::model::{Animal, Gender, RawRecord};
use herdview_core::normalize::{normalize_number, normalize_string};
use herdview_core::valuation::{target_weight_for_age, ValuationTables};
use herdview_core::warnings::life_expectancy;
use sha2::{Digest, Sha256};

/// Upper bound on animals fabricated from one aggregate entry
pub const MAX_HERD_SIZE: usize = 5_000;

const FEMALE_SHARE: f64 = 0.75;

/// What fabrication draws on: the PRNG seed and the weight tables of the
/// engine the animals will be valued with.
#[derive(Debug, Clone, Copy)]
pub struct Completion<'a> {
    pub seed: u64,
    pub tables: &'a ValuationTables,
}

impl<'a> Completion<'a> {
    pub fn new(seed: u64, tables: &'a ValuationTables) -> Self {
        Self { seed, tables }
    }
}

/// A herd known only by its size
#[derive(Debug, Clone, PartialEq)]
pub struct HerdAggregate {
    pub pasture_id: String,
    pub location: String,
    pub sub_type: String,
    pub count: usize,
    pub farm_id: String,
}

impl HerdAggregate {
    /// Recognise an aggregate entry: a positive `count`, a `subType`, and no
    /// individual identity.
    pub fn from_record(record: &RawRecord) -> Option<Self> {
        let text = |key: &str| record.get(key).map(normalize_string).unwrap_or_default();
        if !text("id").is_empty() || !text("uniqueId").is_empty() {
            return None;
        }
        let count = normalize_number(record.get("count")?);
        let sub_type = text("subType");
        if count < 1.0 || sub_type.is_empty() {
            return None;
        }
        Some(Self {
            pasture_id: text("pastureId"),
            location: text("location"),
            sub_type,
            count: count as usize,
            farm_id: text("farmId"),
        })
    }

    fn key(&self) -> &str {
        if self.pasture_id.is_empty() {
            &self.location
        } else {
            &self.pasture_id
        }
    }
}

/// Deterministic hash-counter generator.
struct HashRng {
    seed: u64,
    stream: Vec<u8>,
    counter: u64,
}

impl HashRng {
    fn new(seed: u64, stream: &str) -> Self {
        Self {
            seed,
            stream: stream.as_bytes().to_vec(),
            counter: 0,
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut hasher = Sha256::new();
        hasher.update(self.seed.to_le_bytes());
        hasher.update(&self.stream);
        hasher.update(self.counter.to_le_bytes());
        self.counter += 1;
        let digest = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(bytes)
    }

    /// Uniform in `[0, 1)`
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// Fabricate the individuals of an aggregate herd.
///
/// Weights follow `completion.tables`, so configured target weights shape
/// fabricated herds the same way they shape valuations.
pub fn complete_population(aggregate: &HerdAggregate, completion: Completion<'_>) -> Vec<Animal> {
    let count = aggregate.count.min(MAX_HERD_SIZE);
    if count < aggregate.count {
        tracing::warn!(
            requested = aggregate.count,
            fabricated = count,
            sub_type = %aggregate.sub_type,
            "aggregate herd truncated"
        );
    }

    let entry = completion.tables.lookup(&aggregate.sub_type);
    let key = aggregate.key();
    let mut rng = HashRng::new(completion.seed, &format!("{}|{}", key, aggregate.sub_type));

    (0..count)
        .map(|i| {
            let mut animal = Animal::new(
                format!("syn:{}:{}:{}", key, aggregate.sub_type, i),
                aggregate.sub_type.clone(),
            );
            let max_age = (life_expectancy(&animal.animal_type) * 0.6).max(2.0);
            animal.age = rng.range(1.0, max_age).floor();
            animal.gender = if animal.sub_type.to_ascii_uppercase().contains("BULL")
                || rng.next_f64() >= FEMALE_SHARE
            {
                Gender::Male
            } else {
                Gender::Female
            };
            let weight = target_weight_for_age(&entry, animal.age) * rng.range(0.9, 1.1);
            animal.weight = (weight * 10.0).round() / 10.0;
            animal.health = rng.range(70.0, 100.0).round();
            animal.name = format!("{} #{}", aggregate.sub_type, i + 1);
            animal.location = aggregate.location.clone();
            animal.pasture_id =
                (!aggregate.pasture_id.is_empty()).then(|| aggregate.pasture_id.clone());
            animal.farm_id = aggregate.farm_id.clone();
            animal.synthetic = true;
            animal
        })
        .collect()
}
