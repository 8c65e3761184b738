//! Integration tests for the tracing-backed host console.
//!
//! These tests install a capturing tracing layer for the duration of each
//! test and verify which events the host console emits for each operation.

use std::sync::{Arc, Mutex};

use serde_json::json;
use sink::{HOST_TARGET, OperationName, global_console, tracing_console};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;

#[derive(Clone, Debug, PartialEq, Eq)]
struct CapturedEvent {
    level: Level,
    operation: Option<String>,
    message: Option<String>,
}

#[derive(Clone, Default)]
struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureLayer {
    fn take(&self) -> Vec<CapturedEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

#[derive(Default)]
struct FieldVisitor {
    operation: Option<String>,
    message: Option<String>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        match field.name() {
            "operation" => self.operation = Some(value.to_owned()),
            "message" => self.message = Some(value.to_owned()),
            _ => {}
        }
    }
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if event.metadata().target() != HOST_TARGET {
            return;
        }
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            operation: visitor.operation,
            message: visitor.message,
        });
    }
}

fn capture<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let layer = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    tracing::subscriber::with_default(subscriber, f);
    layer.take()
}

// ============================================================================
// Severity Mapping Tests
// ============================================================================

/// Verifies each severity operation lands on the matching tracing level.
#[test]
fn severity_operations_emit_at_matching_levels() {
    let console = tracing_console();
    let events = capture(|| {
        console.error(&[json!("e")]);
        console.warn(&[json!("w")]);
        console.info(&[json!("i")]);
        console.debug(&[json!("d")]);
    });

    let levels: Vec<Level> = events.iter().map(|e| e.level).collect();
    assert_eq!(levels, vec![Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG]);
}

/// Verifies the operation name travels as a structured field.
#[test]
fn operation_is_recorded_as_field() {
    let console = tracing_console();
    let events = capture(|| {
        console.call(OperationName::TimeLog, &[json!("label")]);
    });

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].operation.as_deref(), Some("timeLog"));
    assert_eq!(events[0].level, Level::TRACE);
}

/// Verifies arguments are joined with spaces, strings verbatim.
#[test]
fn message_joins_arguments() {
    let console = tracing_console();
    let events = capture(|| {
        console.log(&[json!("copied"), json!(3), json!("files")]);
    });

    assert_eq!(events[0].message.as_deref(), Some("copied 3 files"));
}

// ============================================================================
// Assert Tests
// ============================================================================

/// Verifies a holding assertion emits nothing.
#[test]
fn passing_assert_is_silent() {
    let console = tracing_console();
    let events = capture(|| {
        console.call(OperationName::Assert, &[json!(true), json!("unused")]);
    });
    assert!(events.is_empty());
}

/// Verifies a failing assertion emits an error with the remaining arguments.
#[test]
fn failing_assert_reports_error() {
    let console = tracing_console();
    let events = capture(|| {
        console.call(OperationName::Assert, &[json!(0), json!("broken"), json!(7)]);
    });

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, Level::ERROR);
    assert_eq!(events[0].message.as_deref(), Some("broken 7"));
}

// ============================================================================
// Ambient Console Tests
// ============================================================================

/// Verifies the ambient console emits through tracing by default.
#[test]
fn ambient_console_emits_events() {
    let console = global_console();
    let events = capture(|| {
        console.warn(&[json!("ambient")]);
    });
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message.as_deref(), Some("ambient"));
}
