//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer and owns process-level
//! concerns: configuration loading and telemetry pipeline setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, ServerConfig};
pub use telemetry::{TelemetryConfig, TelemetryError, TelemetryGuard, init_telemetry};
