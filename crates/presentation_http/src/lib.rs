//! Dice roller HTTP presentation layer
//!
//! This crate provides the HTTP API: the roll endpoint, the Prometheus
//! scrape endpoint and a liveness check.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use handlers::metrics::MetricsCollector;
pub use routes::create_router;
pub use state::AppState;
