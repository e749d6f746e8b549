//! YAML configuration
//!
//! Every key is optional; an absent file means built-in defaults. Diff and
//! warning thresholds are compatibility-critical and deliberately absent.
//!
//! ```yaml
//! log_profile: production
//! state_path: /var/lib/herdview/last.json
//! synthetic_seed: 42
//! valuation:
//!   subtypes:
//!     COW_WATERBUFFALO: { base_value: 2600, target_weight: 650, min_weight: 40, reproduction_min_age: 16 }
//! capacity:
//!   area_per_animal: { COW: 30 }
//!   building_keywords: [[freestall, 120]]
//! ```

use herdview_core::capacity::{CapacityOverrides, CapacityRules};
use herdview_core::logging_facility::Profile;
use herdview_core::valuation::{ValuationOverrides, ValuationTables};
use herdview_core::HerdEngine;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{config_error, io_error, Result};

/// Where the session slot lives when neither config nor CLI names a path.
pub const DEFAULT_STATE_PATH: &str = ".herdview/last_snapshot.json";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HerdviewConfig {
    pub log_profile: Profile,
    pub state_path: Option<PathBuf>,
    pub valuation: ValuationOverrides,
    pub capacity: CapacityOverrides,
    /// Seed for synthetic completion of aggregate herds
    pub synthetic_seed: u64,
}

impl HerdviewConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, `InvalidConfig` if it is not a
    /// valid configuration document.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| io_error("config_read", e))?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Load from `path` when given, else use defaults.
    ///
    /// # Errors
    ///
    /// See [`HerdviewConfig::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration text.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` on malformed YAML or unknown keys.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| config_error(&format!("YAML parse error: {}", e)))
    }

    pub fn state_path(&self) -> PathBuf {
        self.state_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_PATH))
    }

    /// Built-in valuation tables with configured rows merged on top.
    pub fn valuation_tables(&self) -> ValuationTables {
        ValuationTables::default().merged_with(&self.valuation)
    }

    /// Built-in capacity heuristics with configured entries merged on top.
    pub fn capacity_rules(&self) -> CapacityRules {
        CapacityRules::default().merged_with(&self.capacity)
    }

    pub fn engine(&self) -> HerdEngine {
        HerdEngine::new(self.valuation_tables(), self.capacity_rules())
    }
}
