//! Shared fixtures for core integration tests

#![allow(dead_code)]

use herdview_core::model::{Animal, GameTime, Gender, Snapshot};

/// An animal with identity, sub-type and health; everything else default.
pub fn animal(id: &str, sub_type: &str, health: f64) -> Animal {
    let mut a = Animal::new(id, sub_type);
    a.health = health;
    a
}

/// A healthy female of `age` months in `location`.
pub fn female(id: &str, sub_type: &str, age: f64, location: &str) -> Animal {
    let mut a = Animal::new(id, sub_type);
    a.gender = Gender::Female;
    a.age = age;
    a.health = 100.0;
    a.location = location.to_string();
    a
}

/// `count` healthy adult pigs in `location`.
pub fn pigs(location: &str, count: usize) -> Vec<Animal> {
    (0..count)
        .map(|i| female(&format!("{location}-{i}"), "PIG_LANDRACE", 24.0, location))
        .collect()
}

/// A snapshot with no derived pastures.
pub fn bare_snapshot(day: i64, animals: Vec<Animal>) -> Snapshot {
    Snapshot::new(GameTime::new(day, 360.0), animals, Vec::new(), Vec::new())
}
