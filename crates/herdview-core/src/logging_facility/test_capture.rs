//! In-memory capture of operation events for tests
//!
//! Installs a global subscriber once and records every event with its
//! fields, so tests can assert on what a reconcile cycle or pasture
//! derivation logged.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use herdview_core_types::schema::{FIELD_CYCLE_ID, FIELD_EVENT, FIELD_OP, FIELD_PASTURE_ID};

/// One recorded event. Correlation ids are lifted out of `fields`.
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub op: Option<String>,
    pub event: Option<String>,
    pub cycle_id: Option<String>,
    pub pasture_id: Option<String>,
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    pub fn is(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Default)]
struct FieldVisitor(BTreeMap<String, String>);

// Numbers and bools fall through to record_debug, which prints them bare.
impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let fields = visitor.0;

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            op: fields.get(FIELD_OP).cloned(),
            event: fields.get(FIELD_EVENT).cloned(),
            cycle_id: fields.get(FIELD_CYCLE_ID).cloned(),
            pasture_id: fields.get(FIELD_PASTURE_ID).cloned(),
            fields,
        };
        if let Ok(mut events) = self.events.lock() {
            events.push(captured);
        }
    }
}

/// Shared handle on everything captured so far.
///
/// Tests run in parallel against one subscriber, so queries should key on
/// an op name or id the test owns.
#[derive(Clone)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Most recent event for `op` with the given event name.
    pub fn find(&self, op: &str, event: &str) -> Option<CapturedEvent> {
        self.events().into_iter().rev().find(|e| e.is(op, event))
    }

    /// Events stamped with a reconcile cycle id, in emission order.
    pub fn for_cycle(&self, cycle_id: &str) -> Vec<CapturedEvent> {
        self.matching(|e| e.cycle_id.as_deref() == Some(cycle_id))
    }

    /// Events stamped with a pasture id, in emission order.
    pub fn for_pasture(&self, pasture_id: &str) -> Vec<CapturedEvent> {
        self.matching(|e| e.pasture_id.as_deref() == Some(pasture_id))
    }

    /// # Panics
    ///
    /// Panics if no event matches `op` and `event`.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.is(op, event)),
            "Expected event op={} event={} not found in {} captured events",
            op,
            event,
            events.len()
        );
    }

    fn matching(&self, keep: impl Fn(&CapturedEvent) -> bool) -> Vec<CapturedEvent> {
        self.events().into_iter().filter(|e| keep(e)).collect()
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture subscriber on first use and return its handle.
///
/// ```
/// use herdview_core::logging_facility::test_capture::init_test_capture;
/// use herdview_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("derive_pasture", pasture = "doc-paddock");
/// assert_eq!(capture.for_pasture("doc-paddock").len(), 1);
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let events = Arc::new(Mutex::new(Vec::new()));
            let layer = CaptureLayer {
                events: events.clone(),
            };
            tracing_subscriber::registry().with(layer).init();
            TestCapture { events }
        })
        .clone()
}
