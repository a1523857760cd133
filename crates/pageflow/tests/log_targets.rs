#![forbid(unsafe_code)]

//! Structured logging checks: pager decisions are logged under the
//! `pageflow.*` targets at the expected levels.
//!
//! Run:
//!   cargo test -p pageflow --test log_targets

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use pageflow::{MemoryHost, Pager, PagerConfig, PointerEvent};
use tracing_subscriber::layer::SubscriberExt;
use web_time::{Duration, Instant};

// ============================================================================
// Tracing capture infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    target: String,
    message: String,
    fields: HashMap<String, String>,
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.get("message").cloned().unwrap_or_default();
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message,
            fields,
        });
    }
}

fn with_captured_tracing<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: events.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn find<'a>(events: &'a [CapturedEvent], target: &str, message: &str) -> Option<&'a CapturedEvent> {
    events
        .iter()
        .find(|e| e.target == target && e.message == message)
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn snap_start_and_settle_are_logged() {
    let events = with_captured_tracing(|| {
        let mut p = Pager::new(PagerConfig::default(), MemoryHost::uniform(3, 1000, 800)).unwrap();
        let t0 = Instant::now();
        p.snap_to_page(2, t0);
        p.tick(t0 + Duration::from_secs(1));
    });

    let started = find(&events, "pageflow.snap", "snap started").expect("snap start logged");
    assert_eq!(started.level, tracing::Level::DEBUG);
    assert_eq!(started.fields.get("page").map(String::as_str), Some("2"));
    assert_eq!(started.fields.get("duration_ms").map(String::as_str), Some("750"));

    let settled = find(&events, "pageflow.snap", "page settled").expect("settle logged");
    assert_eq!(settled.fields.get("previous").map(String::as_str), Some("0"));
}

#[test]
fn release_decision_is_logged() {
    let events = with_captured_tracing(|| {
        let mut p = Pager::new(PagerConfig::default(), MemoryHost::uniform(3, 1000, 800)).unwrap();
        let t0 = Instant::now();
        p.on_pointer(PointerEvent::down((700.0, 400.0), t0));
        p.on_pointer(PointerEvent::moved((600.0, 400.0), t0 + Duration::from_millis(8)));
        p.on_pointer(PointerEvent::moved((200.0, 400.0), t0 + Duration::from_millis(16)));
        p.on_pointer(PointerEvent::up((200.0, 400.0), Some(-100.0), t0 + Duration::from_millis(24)));
    });

    assert!(find(&events, "pageflow.gesture", "scroll started").is_some());
    let released = find(&events, "pageflow.gesture", "scroll released").expect("release logged");
    assert_eq!(released.level, tracing::Level::DEBUG);
    assert!(released.fields["decision"].contains("SnapWithVelocity"));
}

#[test]
fn refused_reorder_is_logged_with_reason() {
    let events = with_captured_tracing(|| {
        let mut p = Pager::new(PagerConfig::default(), MemoryHost::uniform(3, 1000, 800)).unwrap();
        assert!(!p.start_reordering(1, Instant::now()));
    });

    let refused = find(&events, "pageflow.pager", "reorder refused").expect("refusal logged");
    assert_eq!(refused.fields["reason"], "no pointer is down");
}

#[test]
fn invalid_config_is_warned() {
    let events = with_captured_tracing(|| {
        let config = PagerConfig {
            touch_slop: -1.0,
            ..PagerConfig::default()
        };
        assert!(Pager::new(config, MemoryHost::uniform(1, 100, 100)).is_err());
    });

    let warned = find(&events, "pageflow.pager", "rejecting pager configuration")
        .expect("warning logged");
    assert_eq!(warned.level, tracing::Level::WARN);
    assert!(warned.fields["problems"].contains("touch_slop"));
}
