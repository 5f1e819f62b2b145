//! Metrics handlers
//!
//! Holds the process-wide roll counters and renders them, together with the
//! fault injection counters, in the Prometheus text exposition format.

use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicU64, Ordering},
    time::Instant,
};

use application::{FaultStatsSnapshot, ports::RollMetricsPort};
use axum::{extract::State, http::header, response::IntoResponse};
use dashmap::DashMap;
use domain::RollOutcome;

use crate::state::AppState;

/// Content type of the Prometheus text format
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Point-in-time copy of the roll counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollMetrics {
    /// Successful rolls
    pub rolls_total: u64,
    /// Successful rolls per result, ordered by result
    pub numbers: BTreeMap<u8, u64>,
}

/// Atomic counters for dice rolls
#[derive(Debug)]
pub struct MetricsCollector {
    /// Server start time
    start_time: Instant,
    /// `dice_roll_count`
    rolls_total: AtomicU64,
    /// `dice_numbers_count`, keyed by the rolled value
    numbers: DashMap<u8, AtomicU64>,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCollector {
    /// Create a new metrics collector
    #[must_use]
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            rolls_total: AtomicU64::new(0),
            numbers: DashMap::new(),
        }
    }

    /// Get uptime in seconds
    #[must_use]
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Get roll metrics
    #[must_use]
    pub fn roll_metrics(&self) -> RollMetrics {
        let numbers = self
            .numbers
            .iter()
            .map(|entry| (*entry.key(), entry.value().load(Ordering::Relaxed)))
            .collect();

        RollMetrics {
            rolls_total: self.rolls_total.load(Ordering::Relaxed),
            numbers,
        }
    }

    /// Render every counter in the Prometheus text format
    pub fn render_prometheus(&self, faults: FaultStatsSnapshot) -> String {
        let rolls = self.roll_metrics();
        let mut output = String::new();

        output.push_str(&format!(
            "# HELP dice_roll_count Total number of successful dice rolls\n\
             # TYPE dice_roll_count counter\n\
             dice_roll_count {}\n\n",
            rolls.rolls_total
        ));

        output.push_str(
            "# HELP dice_numbers_count Successful dice rolls per result\n\
             # TYPE dice_numbers_count counter\n",
        );
        for (number, count) in &rolls.numbers {
            output.push_str(&format!("dice_numbers_count{{number=\"{number}\"}} {count}\n"));
        }
        output.push('\n');

        output.push_str(&format!(
            "# HELP dice_faults_injected_total Faults injected into roll requests\n\
             # TYPE dice_faults_injected_total counter\n\
             dice_faults_injected_total{{kind=\"error\"}} {}\n\
             dice_faults_injected_total{{kind=\"delay\"}} {}\n\n",
            faults.errors_injected, faults.delays_injected
        ));

        #[allow(clippy::cast_precision_loss)]
        let delay_seconds = faults.delay_ms_total as f64 / 1000.0;
        output.push_str(&format!(
            "# HELP dice_fault_delay_seconds_total Time spent in injected delays\n\
             # TYPE dice_fault_delay_seconds_total counter\n\
             dice_fault_delay_seconds_total {delay_seconds:.3}\n\n"
        ));

        output.push_str(&format!(
            "# HELP app_uptime_seconds Application uptime in seconds\n\
             # TYPE app_uptime_seconds gauge\n\
             app_uptime_seconds {}\n",
            self.uptime_seconds()
        ));

        output
    }
}

impl RollMetricsPort for MetricsCollector {
    fn record_roll(&self, outcome: RollOutcome) {
        self.rolls_total.fetch_add(1, Ordering::Relaxed);
        self.numbers
            .entry(outcome.value())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
    }
}

/// Prometheus scrape endpoint
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "metrics",
    responses(
        (status = 200, description = "Prometheus metrics", content_type = "text/plain")
    )
)]
pub async fn get_metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = state
        .metrics
        .render_prometheus(state.roll_service.fault_stats());
    ([(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], body)
}
