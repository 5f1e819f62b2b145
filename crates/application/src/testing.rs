//! Test helpers for asserting on emitted spans and events

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    span::{Attributes, Id, Record},
};
use tracing_subscriber::{
    Layer,
    layer::{Context, SubscriberExt},
    registry::LookupSpan,
};

/// A span as seen by [`SpanCapture`]
#[derive(Debug, Clone)]
pub struct CapturedSpan {
    pub name: &'static str,
    pub parent: Option<&'static str>,
    pub fields: HashMap<String, String>,
}

/// An event as seen by [`SpanCapture`]
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub message: String,
    pub span: Option<&'static str>,
    pub fields: HashMap<String, String>,
}

#[derive(Debug, Default)]
struct Captured {
    spans: Vec<CapturedSpan>,
    events: Vec<CapturedEvent>,
}

/// Index of a span in `Captured::spans`, kept in the span's extensions
#[derive(Debug)]
struct SpanIndex(usize);

/// Layer that records every span, span field and event
#[derive(Debug, Clone, Default)]
pub struct SpanCapture {
    captured: Arc<Mutex<Captured>>,
}

impl SpanCapture {
    /// Install a fresh capture as the thread's default subscriber
    ///
    /// Recording stops when the returned guard is dropped.
    pub fn install() -> (Self, tracing::subscriber::DefaultGuard) {
        let capture = Self::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    fn lock(&self) -> MutexGuard<'_, Captured> {
        self.captured
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Spans in creation order
    pub fn spans(&self) -> Vec<CapturedSpan> {
        self.lock().spans.clone()
    }

    /// Events in emission order
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.lock().events.clone()
    }

    /// The single span with this name
    pub fn span(&self, name: &str) -> CapturedSpan {
        let matching: Vec<_> = self.spans().into_iter().filter(|s| s.name == name).collect();
        assert_eq!(matching.len(), 1, "expected one `{name}` span");
        matching.into_iter().next().unwrap()
    }

    /// Events with this message emitted inside the named span
    pub fn events_in(&self, span: &str, message: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.span == Some(span) && e.message == message)
            .collect()
    }
}

#[derive(Debug, Default)]
struct FieldVisitor(HashMap<String, String>);

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }
}

impl<S> Layer<S> for SpanCapture
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        attrs.record(&mut visitor);

        let Some(span) = ctx.span(id) else { return };
        let parent = span.parent().map(|p| p.name());

        let mut captured = self.lock();
        span.extensions_mut().insert(SpanIndex(captured.spans.len()));
        captured.spans.push(CapturedSpan {
            name: span.name(),
            parent,
            fields: visitor.0,
        });
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else { return };
        let Some(index) = span.extensions().get::<SpanIndex>().map(|i| i.0) else {
            return;
        };

        let mut visitor = FieldVisitor::default();
        values.record(&mut visitor);
        self.lock().spans[index].fields.extend(visitor.0);
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let message = visitor.0.remove("message").unwrap_or_default();

        self.lock().events.push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            span: ctx.event_span(event).map(|s| s.name()),
            fields: visitor.0,
        });
    }
}
