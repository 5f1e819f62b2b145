//! Application configuration
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults
//! 2. An optional `config.{toml,yaml,json}` file in the working directory
//! 3. `DICE_`-prefixed environment variables, `__` between sections
//!    (e.g. `DICE_SERVER__PORT=8080`)
//! 4. Fixed-name variables: `RATE_ERROR`, `RATE_HIGH_DELAY`,
//!    `OTEL_EXPORTER_OTLP_ENDPOINT`, `OTEL_SERVICE_NAME`
//!
//! A malformed or out-of-range fault rate fails the load.

mod server;

use application::{FaultConfig, IdentityConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::telemetry::TelemetryConfig;

pub use server::ServerConfig;

/// Prefix for structured environment overrides
pub const ENV_PREFIX: &str = "DICE";

/// Percentage of rolls that fail
pub const RATE_ERROR_VAR: &str = "RATE_ERROR";

/// Percentage of rolls that are delayed
pub const RATE_DELAY_VAR: &str = "RATE_HIGH_DELAY";

/// Standard OTLP collector endpoint variable; setting it enables export
pub const OTLP_ENDPOINT_VAR: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

/// Standard service name variable
pub const OTEL_SERVICE_NAME_VAR: &str = "OTEL_SERVICE_NAME";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Fault injection rates
    #[serde(default)]
    pub faults: FaultConfig,

    /// Player classification
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Tracing and log output
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from the config file and the process environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(std::env::vars().collect())
    }

    /// Load configuration using `vars` in place of the process environment
    pub fn load_from(vars: config::Map<String, String>) -> Result<Self, config::ConfigError> {
        let var = |key: &str| vars.get(key).cloned();
        let otlp_endpoint = var(OTLP_ENDPOINT_VAR).filter(|v| !v.is_empty());

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5165)?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with prefixed variables (e.g., DICE_TELEMETRY__ENABLED)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars.clone())),
            )
            .set_override_option("faults.error_rate", rate_var(&vars, RATE_ERROR_VAR)?)?
            .set_override_option("faults.delay_rate", rate_var(&vars, RATE_DELAY_VAR)?)?
            .set_override_option("telemetry.service_name", var(OTEL_SERVICE_NAME_VAR))?
            .set_override_option("telemetry.enabled", otlp_endpoint.as_ref().map(|_| true))?
            .set_override_option("telemetry.endpoint", otlp_endpoint)?;

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(
            error_rate = config.faults.error_rate.value(),
            delay_rate = config.faults.delay_rate.value(),
            "Fault rates loaded"
        );
        Ok(config)
    }
}

/// Read a fault rate variable as a plain decimal integer
///
/// `config` would coerce words such as `yes` or `off` to 1 and 0, so the
/// fixed-name rate variables are parsed before they reach the builder.
/// Range checking is left to `FaultRate`.
fn rate_var(
    vars: &config::Map<String, String>,
    key: &str,
) -> Result<Option<i64>, config::ConfigError> {
    vars.get(key)
        .map(|raw| {
            raw.parse::<i64>().map_err(|e| {
                config::ConfigError::Message(format!("{key}: invalid fault rate {raw:?}: {e}"))
            })
        })
        .transpose()
}
