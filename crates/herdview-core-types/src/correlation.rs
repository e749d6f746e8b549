//! Correlation types for reconcile cycles
//!
//! Every refresh or live-feed push that runs the core is one "cycle". The
//! cycle id ties together the log lines emitted while normalizing, diffing
//! and deriving warnings for that push.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single reconcile cycle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CycleId(String);

impl CycleId {
    /// Generate a new CycleId using UUIDv7 (time-ordered)
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for CycleId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CycleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context carried through one reconcile cycle
#[derive(Debug, Clone)]
pub struct CycleContext {
    pub cycle_id: CycleId,
    /// Monotonic sequence number within a session (0 = baseline)
    pub sequence: u64,
}

impl CycleContext {
    /// Create a new context with a fresh CycleId
    pub fn new(sequence: u64) -> Self {
        Self {
            cycle_id: CycleId::new(),
            sequence,
        }
    }

    /// Whether this cycle only establishes the baseline snapshot
    pub fn is_baseline(&self) -> bool {
        self.sequence == 0
    }
}

impl Default for CycleContext {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_id_generation() {
        let id1 = CycleId::new();
        let id2 = CycleId::new();

        assert_ne!(id1, id2);
        assert!(!id1.as_str().is_empty());
        assert!(!id2.as_str().is_empty());
    }

    #[test]
    fn test_cycle_id_display() {
        let id = CycleId::new();
        assert_eq!(format!("{}", id), id.as_str());
    }

    #[test]
    fn test_cycle_context_baseline() {
        assert!(CycleContext::new(0).is_baseline());
        assert!(!CycleContext::new(3).is_baseline());
    }

    #[test]
    fn test_serialization() {
        let id = CycleId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: CycleId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
