//! Shared fixtures for store integration tests

#![allow(dead_code)]

use serde_json::{json, Value};

/// A live feed with two individual cows, one enhanced horse and a sheep
/// aggregate.
pub fn live_feed(day: i64, cow_health: u32) -> Value {
    json!({
        "animals": [
            {"id": "c1", "subType": "COW_HOLSTEIN", "age": 48, "health": cow_health,
             "gender": "female", "isLactating": true, "location": "Dairy barn",
             "reproduction": 0},
            {"id": "c2", "subType": "COW_HOLSTEIN", "age": 6, "health": "90",
             "gender": "female", "location": "Dairy barn"},
            {"uniqueId": "h1", "subType": "HORSE_GRAY", "age": 60, "health": 100,
             "gender": "male", "location": "Stable", "riding": 80, "fitness": 70,
             "dirt": 10, "genetics": {"quality": 1.2}},
            {"subType": "SHEEP_LANDRACE", "pastureId": "Meadow", "count": 4}
        ],
        "vehicles": [],
        "fields": [],
        "production": {},
        "finance": {"money": 120000},
        "weather": {},
        "economy": {},
        "gameTime": {"currentDay": day, "dayTime": 480},
        "farmInfo": {"farmId": 1, "name": "Green Acres"}
    })
}

pub fn feed_text(day: i64, cow_health: u32) -> String {
    live_feed(day, cow_health).to_string()
}
