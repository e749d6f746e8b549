//! File-backed snapshot slot.
//!
//! Holds the single "last computed snapshot" between CLI invocations so a
//! [`ReconcileSession`](herdview_core::ReconcileSession) can resume.

pub mod atomic;
pub mod persist;

pub use persist::SnapshotFile;
