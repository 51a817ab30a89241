#![forbid(unsafe_code)]

//! Tracing span integration tests.
//!
//! Verifies that the engine emits `logsmith.frame`, `logsmith.render`, and
//! `logsmith.filter` spans with the expected fields and nesting.
//!
//!   cargo test -p logsmith-runtime --test tracing_tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use logsmith_core::{Dataset, LogEntry, LogLevel};
use logsmith_render::HeadlessSurface;
use logsmith_runtime::{EngineConfig, RenderEngine};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured span with its fields and parent.
#[derive(Debug, Clone)]
struct CapturedSpan {
    name: String,
    fields: HashMap<String, String>,
    parent_name: Option<String>,
}

/// A tracing Layer that records every new span.
struct SpanCapture {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
}

/// Handle to read captured spans after the closure ran.
struct CaptureHandle {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
}

impl CaptureHandle {
    fn spans(&self) -> Vec<CapturedSpan> {
        self.spans.lock().unwrap().clone()
    }

    fn named(&self, name: &str) -> Vec<CapturedSpan> {
        self.spans().into_iter().filter(|s| s.name == name).collect()
    }
}

/// Visitor that extracts span fields.
struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for SpanCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);

        let parent_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());

        self.spans.lock().unwrap().push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
            parent_name,
        });
    }
}

/// Run `f` under a subscriber that captures spans.
fn with_captured_spans<F>(f: F) -> CaptureHandle
where
    F: FnOnce(),
{
    let spans = Arc::new(Mutex::new(Vec::new()));
    let layer = SpanCapture {
        spans: spans.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    CaptureHandle { spans }
}

fn engine(n: u64) -> RenderEngine<HeadlessSurface> {
    let data: Dataset = (0..n)
        .map(|i| {
            let level = LogLevel::ALL[(i % 3) as usize];
            LogEntry::new(i, format!("ts{i}"), level, format!("{level} event #{i}"))
        })
        .collect();
    RenderEngine::new(data, HeadlessSurface::new(600.0), EngineConfig::default())
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn render_span_carries_window_fields() {
    let handle = with_captured_spans(|| {
        let mut e = engine(100_000);
        e.notify_scroll(3200.0);
        e.on_frame();
    });

    let renders = handle.named("logsmith.render");
    assert_eq!(renders.len(), 1, "spans: {:?}", handle.spans());
    let fields = &renders[0].fields;
    assert_eq!(fields.get("total").map(String::as_str), Some("100000"));
    assert_eq!(fields.get("start").map(String::as_str), Some("100"));
    assert_eq!(fields.get("end").map(String::as_str), Some("129"));
    assert_eq!(fields.get("slots").map(String::as_str), Some("29"));
}

#[test]
fn render_span_nests_inside_frame_span() {
    let handle = with_captured_spans(|| {
        let mut e = engine(100);
        e.request_render();
        e.on_frame();
    });

    let renders = handle.named("logsmith.render");
    assert_eq!(renders.len(), 1);
    assert_eq!(renders[0].parent_name.as_deref(), Some("logsmith.frame"));
}

#[test]
fn idle_frame_opens_no_render_span() {
    let handle = with_captured_spans(|| {
        let mut e = engine(100);
        e.on_frame();
        e.on_frame();
    });

    assert_eq!(handle.named("logsmith.frame").len(), 2);
    assert!(handle.named("logsmith.render").is_empty());
}

#[test]
fn filter_span_records_query() {
    let handle = with_captured_spans(|| {
        let mut e = engine(30);
        e.set_filter_text("  Error ");
    });

    let filters = handle.named("logsmith.filter");
    assert_eq!(filters.len(), 1);
    assert_eq!(
        filters[0].fields.get("query").map(String::as_str),
        Some("error")
    );
}
