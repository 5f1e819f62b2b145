//! Telemetry and distributed tracing infrastructure
//!
//! Provides OpenTelemetry integration for exporting roll traces to an OTLP
//! collector, plus console logging.

mod otel;

pub use otel::{TelemetryConfig, TelemetryError, TelemetryGuard, init_telemetry};
