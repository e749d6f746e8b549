use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use super::animal::Animal;
use super::pasture::Pasture;
use crate::errors::{HerdError, Result};

/// In-game clock
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameTime {
    pub current_day: i64,
    /// Minutes since midnight
    pub day_time: f64,
}

impl GameTime {
    pub fn new(current_day: i64, day_time: f64) -> Self {
        Self {
            current_day,
            day_time,
        }
    }
}

/// A farm owning animals and placeables
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Farm {
    pub id: String,
    pub name: String,
}

/// An immutable point-in-time capture of all animals, pastures and game
/// time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub captured_at: DateTime<Utc>,
    #[serde(default)]
    pub game_time: GameTime,
    #[serde(default)]
    pub animals: Vec<Animal>,
    #[serde(default)]
    pub pastures: Vec<Pasture>,
    #[serde(default)]
    pub farms: Vec<Farm>,
}

/// The semantic part of a snapshot: everything except `captured_at`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SemanticView<'a> {
    game_time: &'a GameTime,
    animals: &'a [Animal],
    pastures: &'a [Pasture],
    farms: &'a [Farm],
}

impl Snapshot {
    pub fn new(
        game_time: GameTime,
        animals: Vec<Animal>,
        pastures: Vec<Pasture>,
        farms: Vec<Farm>,
    ) -> Self {
        Self {
            captured_at: Utc::now(),
            game_time,
            animals,
            pastures,
            farms,
        }
    }

    /// An empty snapshot (no animals, pastures or farms).
    pub fn empty() -> Self {
        Self::new(GameTime::default(), Vec::new(), Vec::new(), Vec::new())
    }

    /// SHA-256 hex digest of the snapshot's semantic content.
    ///
    /// `captured_at` is excluded: two captures of the same game state share a
    /// digest.
    pub fn digest(&self) -> String {
        let view = SemanticView {
            game_time: &self.game_time,
            animals: &self.animals,
            pastures: &self.pastures,
            farms: &self.farms,
        };
        let canonical = serde_json::to_vec(&view).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        hex::encode(hasher.finalize())
    }

    /// Decode a previously serialized snapshot.
    ///
    /// # Errors
    ///
    /// `InvalidSnapshot` when the text is not a snapshot document.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| HerdError::InvalidSnapshot {
            reason: e.to_string(),
        })
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    ///
    /// `Serialization` if a value cannot be represented in JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn animal(&self, id: &str) -> Option<&Animal> {
        self.animals.iter().find(|a| a.id == id)
    }

    pub fn pasture(&self, id: &str) -> Option<&Pasture> {
        self.pastures.iter().find(|p| p.id == id)
    }

    /// Animals belonging to a pasture, in snapshot order.
    pub fn members_of<'a>(&'a self, pasture: &Pasture) -> Vec<&'a Animal> {
        self.animals
            .iter()
            .filter(|a| pasture.member_ids.iter().any(|id| id == &a.id))
            .collect()
    }
}
