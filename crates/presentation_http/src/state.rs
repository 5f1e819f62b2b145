//! Application state shared across handlers

use std::sync::Arc;

use application::{RollService, ports::RandomSource};
use infrastructure::AppConfig;

use crate::handlers::metrics::MetricsCollector;

/// Shared application state
///
/// Built once at startup; the counters and the fault configuration live as
/// long as the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Roll pipeline
    pub roll_service: Arc<RollService>,
    /// Process-wide roll counters
    pub metrics: Arc<MetricsCollector>,
}

impl AppState {
    /// Wire the roll service to a fresh metrics collector
    pub fn new(config: &AppConfig, random: Arc<dyn RandomSource>) -> Self {
        let metrics = Arc::new(MetricsCollector::new());
        let roll_service = RollService::from_config(
            config.faults,
            &config.identity,
            random,
            Arc::clone(&metrics) as _,
        );

        Self {
            roll_service: Arc::new(roll_service),
            metrics,
        }
    }
}
