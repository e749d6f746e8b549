#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::time::Instant;

use common::pigs;
use herdview_core::errors::{ExError, ExErrorKind, HerdError};
use herdview_core::logging_facility::test_capture::init_test_capture;
use herdview_core::model::{GameTime, PastureSpec};
use herdview_core::{
    log_op_end, log_op_error, log_op_start, HerdEngine, ReconcileSession, Snapshot, UpdateOutcome,
};
use herdview_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_ANIMAL_ID, FIELD_DURATION_MS, FIELD_ERR_CODE,
};

#[test]
fn test_log_op_start_with_pasture_scope() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, pasture = "start-scope-paddock");

    let start = capture.find(op_name, EVENT_START).expect("start event");
    assert_eq!(start.pasture_id.as_deref(), Some("start-scope-paddock"));
    assert_eq!(start.cycle_id, None);
}

#[test]
fn test_log_op_end_measures_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    let start = Instant::now();
    log_op_end!(op_name, start, animal_count = 3usize);

    let end = capture.find(op_name, EVENT_END).expect("end event");
    let duration: u64 = end.field(FIELD_DURATION_MS).unwrap().parse().unwrap();
    assert!(duration < 60_000);
    assert_eq!(end.field("animal_count"), Some("3"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = HerdError::InvalidFeed {
        reason: "animals is not a list".to_string(),
    };
    log_op_error!(op_name, err, Instant::now());

    let failed = capture.find(op_name, EVENT_END_ERROR).expect("error event");
    assert_eq!(failed.field(FIELD_ERR_CODE), Some("ERR_INVALID_FEED"));
    assert_eq!(failed.pasture_id, None);
}

#[test]
fn test_log_op_error_carries_error_context() {
    let capture = init_test_capture();
    let op_name = "test_ex_error_unique_4";

    let err = ExError::new(ExErrorKind::Persistence)
        .with_pasture_id("error-context-paddock")
        .with_entity_id("cow-7")
        .with_message("disk full");
    log_op_error!(op_name, err, Instant::now());

    let failed = capture.find(op_name, EVENT_END_ERROR).expect("error event");
    assert_eq!(failed.pasture_id.as_deref(), Some("error-context-paddock"));
    assert_eq!(failed.field(FIELD_ANIMAL_ID), Some("cow-7"));
    assert_eq!(failed.field(FIELD_ERR_CODE), Some("ERR_PERSISTENCE"));
}

#[test]
fn test_derive_pasture_events_carry_pasture_id() {
    let capture = init_test_capture();
    let spec = PastureSpec::new("logging-test-pen", "Logging Pen");

    HerdEngine::default().pastures(&pigs("logging-test-pen", 4), &[spec]);

    let events = capture.for_pasture("logging-test-pen");
    assert!(events[0].is("derive_pasture", EVENT_START));
    let end = events
        .iter()
        .find(|e| e.is("derive_pasture", EVENT_END))
        .expect("end event");
    assert_eq!(end.field("animal_count"), Some("4"));
}

#[test]
fn test_session_update_is_bracketed_with_cycle_id() {
    let capture = init_test_capture();

    let mut session = ReconcileSession::new();
    let snapshot = Snapshot::new(
        GameTime::new(1, 0.0),
        pigs("logging-session-sty", 1),
        Vec::new(),
        Vec::new(),
    );
    session.update(snapshot);
    let cycle_id = session.last_cycle().unwrap().to_string();

    let cycle = capture.for_cycle(&cycle_id);
    assert_eq!(cycle.len(), 2);
    assert!(cycle[0].is("session_update", EVENT_START));
    assert!(cycle[1].is("session_update", EVENT_END));
    assert_eq!(cycle[0].field("sequence"), Some("0"));
    assert_eq!(cycle[1].field("baseline"), Some("true"));
}

#[test]
fn test_failed_session_update_logs_cycle_from_error() {
    let capture = init_test_capture();

    let mut session = ReconcileSession::new();
    let herd = |animals| Snapshot::new(GameTime::new(1, 0.0), animals, Vec::new(), Vec::new());
    session.update(herd(pigs("logging-failure-sty", 2)));
    let mut broken = pigs("logging-failure-sty", 3);
    broken[2].health = f64::NAN;
    let outcome = session.update(herd(broken));
    assert!(matches!(outcome, UpdateOutcome::ComparisonUnavailable(_)));
    let cycle_id = session.last_cycle().unwrap().to_string();

    let cycle = capture.for_cycle(&cycle_id);
    assert!(cycle[0].is("session_update", EVENT_START));
    assert_eq!(cycle[0].field("sequence"), Some("1"));
    let failed = cycle
        .iter()
        .find(|e| e.is("session_update", EVENT_END_ERROR))
        .expect("error event");
    assert_eq!(failed.field(FIELD_ERR_CODE), Some("ERR_DETERMINISM_VIOLATION"));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();

    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}
