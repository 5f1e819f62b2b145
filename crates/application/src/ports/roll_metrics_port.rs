//! Roll metrics port
//!
//! Sink for the counters that describe successful rolls.

use domain::RollOutcome;
#[cfg(test)]
use mockall::automock;

/// Records completed rolls
///
/// Only successful rolls are reported; faulted requests never reach the sink.
#[cfg_attr(test, automock)]
pub trait RollMetricsPort: Send + Sync {
    /// Count one roll and the value it produced
    fn record_roll(&self, outcome: RollOutcome);
}

/// Metrics sink that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRollMetrics;

impl RollMetricsPort for NoopRollMetrics {
    fn record_roll(&self, _outcome: RollOutcome) {}
}
