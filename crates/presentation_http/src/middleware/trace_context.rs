//! W3C trace context propagation for incoming requests
//!
//! The request span is parented on the caller's `traceparent` header, so
//! spans from the roll pipeline join the caller's trace instead of starting
//! a new one.

use axum::http::{HeaderMap, HeaderName, Request};
use opentelemetry::{global, propagation::Extractor};
use tower_http::trace::MakeSpan;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Read-only view of request headers for the OpenTelemetry propagator
#[derive(Debug, Clone, Copy)]
pub struct HeaderExtractor<'a>(pub &'a HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

/// Creates the `http_request` span, parented on any propagated context
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceContextMakeSpan;

impl<B> MakeSpan<B> for TraceContextMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let parent =
            global::get_text_map_propagator(|p| p.extract(&HeaderExtractor(request.headers())));

        let span = tracing::info_span!(
            "http_request",
            otel.kind = "server",
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
        );

        // Fails when no OpenTelemetry layer is installed
        if let Err(e) = span.set_parent(parent) {
            tracing::trace!(error = %e, "trace context not attached");
        }

        span
    }
}
