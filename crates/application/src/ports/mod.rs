//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure and presentation layers
//! implement these ports.

mod random_source;
mod roll_metrics_port;

#[cfg(test)]
pub use random_source::MockRandomSource;
pub use random_source::RandomSource;
#[cfg(test)]
pub use roll_metrics_port::MockRollMetricsPort;
pub use roll_metrics_port::{NoopRollMetrics, RollMetricsPort};
