//! Reconcile session: the single "last computed snapshot" slot.
//!
//! The session is the only state the core keeps between cycles. It supplies
//! the differ's `old` argument and is cleared when the caller discards
//! comparison context.

use herdview_core_types::{CycleContext, CycleId};
use std::time::Instant;

use crate::errors::ExError;
use crate::model::Snapshot;
use crate::report::{report, ChangeReport};
use crate::{log_op_end, log_op_error, log_op_start};

/// Result of feeding one snapshot into a session.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// First snapshot since creation or `clear`; nothing to compare against
    Baseline,
    Report(Box<ChangeReport>),
    /// The comparison failed; the previous snapshot is kept and the next
    /// cycle compares against it again
    ComparisonUnavailable(ExError),
}

#[derive(Debug, Default)]
pub struct ReconcileSession {
    last: Option<Snapshot>,
    sequence: u64,
    last_cycle: Option<CycleId>,
}

impl ReconcileSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a session from a previously stored snapshot.
    pub fn resume(last: Option<Snapshot>) -> Self {
        let sequence = u64::from(last.is_some());
        Self {
            last,
            sequence,
            last_cycle: None,
        }
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.last.as_ref()
    }

    /// Correlation id of the most recent cycle
    pub fn last_cycle(&self) -> Option<&CycleId> {
        self.last_cycle.as_ref()
    }

    pub fn has_baseline(&self) -> bool {
        self.last.is_some()
    }

    /// Compare `snapshot` against the last one and keep it for next time.
    ///
    /// The slot only advances when the report succeeds.
    pub fn update(&mut self, snapshot: Snapshot) -> UpdateOutcome {
        let start = Instant::now();
        let ctx = CycleContext::new(self.sequence);
        self.last_cycle = Some(ctx.cycle_id.clone());
        log_op_start!("session_update", cycle = ctx);

        let compared = self.last.as_ref().map(|previous| report(previous, &snapshot));
        match compared {
            None => {
                self.last = Some(snapshot);
                self.sequence += 1;
                log_op_end!("session_update", start, cycle = ctx, baseline = true);
                UpdateOutcome::Baseline
            }
            Some(Ok(change_report)) => {
                self.last = Some(snapshot);
                self.sequence += 1;
                log_op_end!(
                    "session_update",
                    start,
                    cycle = ctx,
                    changed = change_report.has_changes()
                );
                UpdateOutcome::Report(Box::new(change_report))
            }
            Some(Err(err)) => {
                let err = err.with_cycle_id(ctx.cycle_id.clone());
                log_op_error!("session_update", err.clone(), start);
                UpdateOutcome::ComparisonUnavailable(err)
            }
        }
    }

    /// Drop comparison context; the next update is a baseline.
    pub fn clear(&mut self) {
        self.last = None;
        self.sequence = 0;
        tracing::debug!("reconcile session cleared");
    }
}
