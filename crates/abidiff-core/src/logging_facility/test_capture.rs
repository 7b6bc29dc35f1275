//! In-memory capture of operation log events for tests
//!
//! Only events emitted by the `log_op_*` macros (those with an `op` field)
//! are kept. Tests in one process share the buffer, so look events up by a
//! unique op name or class id.

use abidiff_core_types::schema::{
    EVENT_END_ERROR, FIELD_CLASS_ID, FIELD_ERR_CODE, FIELD_EVENT, FIELD_OP, FIELD_SIDE,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One `start`, `end` or `end_error` event
#[derive(Clone, Debug)]
pub struct OpEvent {
    pub level: Level,
    pub op: String,
    pub event: String,
    /// Empty unless the event is an error naming a class
    pub class_id: String,
    /// `current`/`previous`, or empty
    pub side: String,
    pub err_code: Option<String>,
    /// Every other field, rendered as text
    pub fields: HashMap<String, String>,
}

impl OpEvent {
    pub fn is_error(&self) -> bool {
        self.event == EVENT_END_ERROR
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Default)]
struct FieldText(HashMap<String, String>);

impl Visit for FieldText {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

/// Shared handle to the captured events; also the subscriber layer itself
#[derive(Clone, Default)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<OpEvent>>>,
}

impl<S: Subscriber> Layer<S> for TestCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut text = FieldText::default();
        event.record(&mut text);
        let mut fields = text.0;

        let Some(op) = fields.remove(FIELD_OP) else {
            return;
        };
        let captured = OpEvent {
            level: *event.metadata().level(),
            op,
            event: fields.remove(FIELD_EVENT).unwrap_or_default(),
            class_id: fields.remove(FIELD_CLASS_ID).unwrap_or_default(),
            side: fields.remove(FIELD_SIDE).unwrap_or_default(),
            err_code: fields.remove(FIELD_ERR_CODE),
            fields,
        };
        if let Ok(mut events) = self.events.lock() {
            events.push(captured);
        }
    }
}

impl TestCapture {
    /// Events of `op` in emission order
    pub fn events_for_op(&self, op: &str) -> Vec<OpEvent> {
        self.matching(|e| e.op == op)
    }

    /// Error events that blame `class_id`
    pub fn errors_for_class(&self, class_id: &str) -> Vec<OpEvent> {
        self.matching(|e| e.is_error() && e.class_id == class_id)
    }

    fn matching(&self, keep: impl Fn(&OpEvent) -> bool) -> Vec<OpEvent> {
        self.events
            .lock()
            .map(|events| events.iter().filter(|e| keep(e)).cloned().collect())
            .unwrap_or_default()
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture as the global subscriber on first call and return
/// the shared handle.
///
/// ```
/// use abidiff_core::logging_facility::init_test_capture;
/// use abidiff_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_capture_op");
/// assert_eq!(capture.events_for_op("doc_capture_op").len(), 1);
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let capture = TestCapture::default();
            tracing_subscriber::registry().with(capture.clone()).init();
            capture
        })
        .clone()
}
