//! Herd engine: the lookup tables and capacity cache used to turn raw
//! animals into a derived snapshot.

use crate::capacity::{CapacityCache, CapacityRules};
use crate::model::{Animal, Farm, GameTime, Pasture, PastureSpec, RawRecord, Snapshot};
use crate::pasture::{derive_pastures, group_by_location, DeriveContext};
use crate::valuation::{self, Valuation, ValuationTables};
use crate::warnings::{forecast_births, BirthForecast};

/// Normalize raw records into animals, dropping records without identity.
pub fn animals_from_records(records: &[RawRecord]) -> Vec<Animal> {
    let animals: Vec<Animal> = records.iter().filter_map(Animal::from_record).collect();
    let skipped = records.len() - animals.len();
    if skipped > 0 {
        tracing::debug!(skipped, "records without identity omitted");
    }
    animals
}

#[derive(Debug, Default)]
pub struct HerdEngine {
    tables: ValuationTables,
    rules: CapacityRules,
    cache: CapacityCache,
}

impl HerdEngine {
    pub fn new(tables: ValuationTables, rules: CapacityRules) -> Self {
        Self {
            tables,
            rules,
            cache: CapacityCache::new(),
        }
    }

    pub fn tables(&self) -> &ValuationTables {
        &self.tables
    }

    pub fn rules(&self) -> &CapacityRules {
        &self.rules
    }

    /// Derive every pasture for a herd, reusing cached geometry capacities.
    pub fn pastures(&mut self, animals: &[Animal], specs: &[PastureSpec]) -> Vec<Pasture> {
        let ctx = DeriveContext {
            rules: &self.rules,
            tables: &self.tables,
        };
        derive_pastures(animals, specs, &mut self.cache, ctx)
    }

    /// Build a snapshot with derived pastures and warnings.
    pub fn capture(
        &mut self,
        game_time: GameTime,
        animals: Vec<Animal>,
        specs: &[PastureSpec],
        farms: Vec<Farm>,
    ) -> Snapshot {
        let pastures = self.pastures(&animals, specs);
        tracing::debug!(
            animal_count = animals.len(),
            pasture_count = pastures.len(),
            "snapshot captured"
        );
        Snapshot::new(game_time, animals, pastures, farms)
    }

    pub fn value(&self, animal: &Animal) -> Valuation {
        valuation::value(animal, &self.tables)
    }

    /// Birth forecast across every location group of a snapshot.
    pub fn forecast(&self, snapshot: &Snapshot) -> BirthForecast {
        let mut forecast = BirthForecast::default();
        for members in group_by_location(&snapshot.animals).values() {
            forecast.merge(forecast_births(members));
        }
        forecast
    }

    /// Forget the cached capacity of one pasture.
    pub fn invalidate_capacity(&mut self, pasture_id: &str) {
        self.cache.invalidate(pasture_id);
    }
}
