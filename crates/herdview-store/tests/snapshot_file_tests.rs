// Snapshot slot persistence: save/load/clear round trips through disk

mod common;

use herdview_core::{HerdEngine, ReconcileSession, UpdateOutcome};
use herdview_store::ingest::{ingest_document, Completion};
use herdview_store::SnapshotFile;
use tempfile::TempDir;

fn snapshot(day: i64, cow_health: u32) -> herdview_core::Snapshot {
    let mut engine = HerdEngine::default();
    let ingested =
        ingest_document(&common::feed_text(day, cow_health), Completion::new(0, engine.tables()))
            .unwrap();
    ingested.into_snapshot(&mut engine, &[])
}

#[test]
fn test_round_trip_preserves_snapshot() {
    let dir = TempDir::new().unwrap();
    let file = SnapshotFile::new(dir.path().join("state").join("last.json"));
    let original = snapshot(3, 80);

    file.save(&original).unwrap();
    let restored = file.load().unwrap().unwrap();

    assert_eq!(restored, original);
    assert_eq!(restored.digest(), original.digest());
}

#[test]
fn test_clear_empties_slot() {
    let dir = TempDir::new().unwrap();
    let file = SnapshotFile::new(dir.path().join("last.json"));
    file.save(&snapshot(1, 80)).unwrap();
    file.clear().unwrap();
    assert!(file.load().unwrap().is_none());
}

#[test]
fn test_session_resumes_from_slot() {
    let dir = TempDir::new().unwrap();
    let file = SnapshotFile::new(dir.path().join("last.json"));
    file.save(&snapshot(1, 80)).unwrap();

    let mut session = ReconcileSession::resume(file.load().unwrap());
    match session.update(snapshot(2, 40)) {
        UpdateOutcome::Report(report) => {
            assert_eq!(report.livestock.updated.len(), 1);
            assert_eq!(report.livestock.updated[0].id, "c1");
            assert!(report.game_time.changed);
        }
        other => panic!("expected a report, got {other:?}"),
    }
}
