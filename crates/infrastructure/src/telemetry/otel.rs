//! OpenTelemetry initialization and configuration
//!
//! Sets up the tracing pipeline and, when enabled, a batching OTLP exporter.
//! Falls back to console-only logging when the exporter cannot be built.

use std::time::Duration;

use opentelemetry::{KeyValue, trace::TracerProvider as _};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    propagation::TraceContextPropagator,
    trace::{BatchConfigBuilder, BatchSpanProcessor, Sampler, SdkTracerProvider},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for telemetry/tracing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Whether OpenTelemetry export is enabled
    #[serde(default)]
    pub enabled: bool,

    /// OTLP endpoint URL (e.g., "http://localhost:4317" for gRPC)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Service name for traces
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Sampling ratio (0.0 - 1.0)
    #[serde(default = "default_sampling_ratio")]
    pub sampling_ratio: f64,

    /// Export timeout in seconds
    #[serde(default = "default_export_timeout")]
    pub export_timeout_secs: u64,

    /// Maximum batch size for trace export
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// Log level filter, used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Whether to fall back to console-only logging if the exporter fails
    #[serde(default = "default_graceful_fallback")]
    pub graceful_fallback: bool,
}

const fn default_sampling_ratio() -> f64 {
    1.0
}

const fn default_export_timeout() -> u64 {
    10
}

const fn default_max_batch_size() -> usize {
    512
}

fn default_endpoint() -> String {
    "http://localhost:4317".to_string()
}

fn default_service_name() -> String {
    "dice-roller".to_string()
}

fn default_log_filter() -> String {
    "dice_server=info,presentation_http=info,application=info,infrastructure=info,tower_http=info"
        .to_string()
}

const fn default_graceful_fallback() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            service_name: default_service_name(),
            sampling_ratio: default_sampling_ratio(),
            export_timeout_secs: default_export_timeout(),
            max_batch_size: default_max_batch_size(),
            log_filter: default_log_filter(),
            graceful_fallback: default_graceful_fallback(),
        }
    }
}

impl TelemetryConfig {
    fn sampler(&self) -> Sampler {
        if (self.sampling_ratio - 1.0).abs() < f64::EPSILON || self.sampling_ratio > 1.0 {
            Sampler::AlwaysOn
        } else if self.sampling_ratio <= 0.0 {
            Sampler::AlwaysOff
        } else {
            Sampler::TraceIdRatioBased(self.sampling_ratio)
        }
    }
}

/// Guard that shuts down the tracer provider when dropped
///
/// Dropping the guard flushes spans still sitting in the batch processor.
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl std::fmt::Debug for TelemetryGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryGuard")
            .field("active", &self.provider.is_some())
            .finish_non_exhaustive()
    }
}

impl TelemetryGuard {
    /// Whether spans are being exported
    #[must_use]
    pub const fn is_exporting(&self) -> bool {
        self.provider.is_some()
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                tracing::error!("Failed to shutdown tracer provider: {:?}", e);
            }
        }
    }
}

/// Initialize logging and, if enabled, OTLP trace export
///
/// Returns a guard that must be kept alive for the duration of the process.
///
/// # Example
///
/// ```ignore
/// use infrastructure::telemetry::{TelemetryConfig, init_telemetry};
///
/// #[tokio::main]
/// async fn main() {
///     let _guard = init_telemetry(&TelemetryConfig::default())
///         .expect("Failed to initialize telemetry");
///
///     // Application code...
/// }
/// ```
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Incoming `traceparent` headers are read through the global propagator
    opentelemetry::global::set_text_map_propagator(TraceContextPropagator::new());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    if !config.enabled {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;

        info!("Telemetry initialized (OTLP disabled, console only)");
        return Ok(TelemetryGuard { provider: None });
    }

    let exporter_result = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(config.endpoint.clone())
        .with_timeout(Duration::from_secs(config.export_timeout_secs))
        .build();

    match exporter_result {
        Ok(exporter) => {
            let resource = Resource::builder()
                .with_service_name(config.service_name.clone())
                .with_attribute(KeyValue::new("service.version", env!("CARGO_PKG_VERSION")))
                .build();

            let processor = BatchSpanProcessor::builder(exporter)
                .with_batch_config(
                    BatchConfigBuilder::default()
                        .with_max_export_batch_size(config.max_batch_size)
                        .build(),
                )
                .build();

            let provider = SdkTracerProvider::builder()
                .with_span_processor(processor)
                .with_sampler(config.sampler())
                .with_resource(resource)
                .build();

            let tracer = provider.tracer(config.service_name.clone());
            opentelemetry::global::set_tracer_provider(provider.clone());

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .try_init()
                .map_err(|e| TelemetryError::Init(e.to_string()))?;

            info!(
                endpoint = %config.endpoint,
                service = %config.service_name,
                sampling = %config.sampling_ratio,
                "Telemetry initialized with OTLP export"
            );

            Ok(TelemetryGuard {
                provider: Some(provider),
            })
        },
        Err(e) => {
            if !config.graceful_fallback {
                return Err(TelemetryError::Exporter(e.to_string()));
            }

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
                .map_err(|e| TelemetryError::Init(e.to_string()))?;

            warn!(
                endpoint = %config.endpoint,
                error = %e,
                "OTLP exporter unavailable, falling back to console-only logging"
            );
            Ok(TelemetryGuard { provider: None })
        },
    }
}

/// Error type for telemetry initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),

    /// Failed to create OTLP exporter
    #[error("Failed to create OTLP exporter: {0}")]
    Exporter(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = TelemetryConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.endpoint, "http://localhost:4317");
        assert_eq!(config.service_name, "dice-roller");
        assert!((config.sampling_ratio - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.export_timeout_secs, 10);
        assert_eq!(config.max_batch_size, 512);
        assert!(config.graceful_fallback);
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let json = r#"{"enabled": true, "endpoint": "http://tempo:4317"}"#;
        let parsed: TelemetryConfig = serde_json::from_str(json).unwrap();
        assert!(parsed.enabled);
        assert_eq!(parsed.endpoint, "http://tempo:4317");
        assert_eq!(parsed.service_name, "dice-roller");
        assert!(parsed.graceful_fallback);
    }

    #[test]
    fn test_sampler_selection() {
        let with_ratio = |sampling_ratio| TelemetryConfig {
            sampling_ratio,
            ..TelemetryConfig::default()
        };

        assert!(matches!(with_ratio(1.0).sampler(), Sampler::AlwaysOn));
        assert!(matches!(with_ratio(0.0).sampler(), Sampler::AlwaysOff));
        assert!(matches!(
            with_ratio(0.25).sampler(),
            Sampler::TraceIdRatioBased(r) if (r - 0.25).abs() < f64::EPSILON
        ));
    }

    #[test]
    fn test_telemetry_guard_without_provider() {
        let guard = TelemetryGuard { provider: None };
        assert!(!guard.is_exporting());
        drop(guard);
    }
}
