//! Change reporter.
//!
//! [`report`] composes the differ's outputs for two snapshots into one
//! [`ChangeReport`]. "No changes" is a first-class outcome, not an error.

pub mod human_summary;

pub use human_summary::render_human_summary;

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::diff::{
    diff_animals_counted, diff_statistics, diff_warnings, LivestockChanges, StatisticsDiff,
    WarningChanges,
};
use crate::errors::{ExError, ExErrorKind};
use crate::model::{GameTime, Snapshot};
use crate::{log_op_end, log_op_error, log_op_start};

/// High-level classification of a report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportClassification {
    /// No livestock, warning or population change
    NoChanges,
    Changed,
}

/// Game clock before and after.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GameTimeChange {
    pub old: GameTime,
    pub new: GameTime,
    pub changed: bool,
}

/// Everything that changed between two snapshots.
///
/// Ephemeral: computed on demand and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeReport {
    pub classification: ReportClassification,
    pub livestock: LivestockChanges,
    pub warnings: WarningChanges,
    pub statistics: StatisticsDiff,
    pub game_time: GameTimeChange,
    pub old_digest: String,
    pub new_digest: String,
}

impl ChangeReport {
    pub fn has_changes(&self) -> bool {
        self.classification == ReportClassification::Changed
    }
}

fn classify(
    livestock: &LivestockChanges,
    warnings: &WarningChanges,
    statistics: &StatisticsDiff,
) -> ReportClassification {
    // A clock tick alone is not a change.
    if livestock.is_empty() && warnings.is_empty() && !statistics.changed() {
        ReportClassification::NoChanges
    } else {
        ReportClassification::Changed
    }
}

/// Check that a report survives a JSON round trip unchanged.
///
/// Catches non-finite numbers leaking into the output.
fn determinism_guard(report: &ChangeReport) -> Result<(), ExError> {
    let serialized = serde_json::to_string(report).map_err(|e| {
        ExError::new(ExErrorKind::DeterminismViolation)
            .with_op("report")
            .with_message(format!("failed to serialize report: {}", e))
    })?;
    let reparsed: ChangeReport = serde_json::from_str(&serialized).map_err(|e| {
        ExError::new(ExErrorKind::DeterminismViolation)
            .with_op("report")
            .with_message(format!("failed to re-parse report: {}", e))
    })?;
    if reparsed != *report {
        return Err(ExError::new(ExErrorKind::DeterminismViolation)
            .with_op("report")
            .with_message("report is not deterministic: round-trip produced a different value"));
    }
    Ok(())
}

/// Compute the change report from `old` to `new`.
///
/// Snapshots with equal digests short-circuit to a `NoChanges` report.
///
/// # Errors
///
/// - `DeterminismViolation` when the report fails its round-trip check. The
///   caller should discard the cycle and compare again next time.
pub fn report(old: &Snapshot, new: &Snapshot) -> Result<ChangeReport, ExError> {
    let start = Instant::now();
    log_op_start!("report");

    let old_digest = old.digest();
    let new_digest = new.digest();

    let (livestock, suppressed) = if old_digest == new_digest {
        tracing::debug!(digest = %new_digest, "snapshots share a digest");
        (LivestockChanges::default(), 0)
    } else {
        diff_animals_counted(&old.animals, &new.animals)
    };
    if suppressed > 0 {
        tracing::debug!(suppressed, "animal changes filtered as noise");
    }

    let warnings = if old_digest == new_digest {
        WarningChanges {
            total: diff_warnings(&[], &new.pastures).total,
            ..WarningChanges::default()
        }
    } else {
        diff_warnings(&old.pastures, &new.pastures)
    };
    let statistics = diff_statistics(old, new);
    let game_time = GameTimeChange {
        old: old.game_time,
        new: new.game_time,
        changed: old.game_time != new.game_time,
    };

    let report = ChangeReport {
        classification: classify(&livestock, &warnings, &statistics),
        livestock,
        warnings,
        statistics,
        game_time,
        old_digest,
        new_digest,
    };

    if let Err(err) = determinism_guard(&report) {
        log_op_error!("report", err.clone(), start);
        return Err(err);
    }

    log_op_end!(
        "report",
        start,
        added = report.livestock.added.len(),
        removed = report.livestock.removed.len(),
        updated = report.livestock.updated.len(),
        warning_count = report.warnings.total
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Animal;

    fn snapshot(animals: Vec<Animal>) -> Snapshot {
        Snapshot::new(GameTime::new(1, 480.0), animals, Vec::new(), Vec::new())
    }

    fn cow(id: &str, health: f64) -> Animal {
        let mut a = Animal::new(id, "COW_ANGUS");
        a.health = health;
        a
    }

    #[test]
    fn test_identical_snapshots_report_no_changes() {
        let s = snapshot(vec![cow("1", 80.0)]);
        let r = report(&s, &s.clone()).unwrap();
        assert_eq!(r.classification, ReportClassification::NoChanges);
        assert!(!r.game_time.changed);
        assert_eq!(r.old_digest, r.new_digest);
    }

    #[test]
    fn test_clock_tick_alone_is_no_change() {
        let old = snapshot(vec![cow("1", 80.0)]);
        let mut new = old.clone();
        new.game_time.day_time = 540.0;
        let r = report(&old, &new).unwrap();
        assert!(r.game_time.changed);
        assert!(!r.has_changes());
    }

    #[test]
    fn test_noise_only_is_no_change() {
        let old = snapshot(vec![cow("1", 80.0)]);
        let new = snapshot(vec![cow("1", 70.0)]);
        let r = report(&old, &new).unwrap();
        assert_ne!(r.old_digest, r.new_digest);
        assert_eq!(r.classification, ReportClassification::NoChanges);
    }

    #[test]
    fn test_non_finite_values_fail_the_guard() {
        let old = snapshot(Vec::new());
        let mut bad = cow("1", 80.0);
        bad.weight = f64::NAN;
        let new = snapshot(vec![bad]);
        let err = report(&old, &new).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::DeterminismViolation);
    }
}
