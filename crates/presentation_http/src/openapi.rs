//! OpenAPI documentation module
//!
//! Serves the OpenAPI 3 description of the dice roller API as JSON.

// Allow clippy warnings from macro-generated code in utoipa derive
#![allow(clippy::needless_for_each)]

use axum::Json;
use utoipa::OpenApi;

use crate::handlers;

/// OpenAPI documentation for the dice roller
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dice Roller API",
        description = "Rolls dice while injecting configurable errors and latency for telemetry demos",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Liveness check"),
        (name = "dice", description = "Dice rolling"),
        (name = "metrics", description = "Prometheus metrics")
    ),
    paths(
        handlers::health::health_check,
        handlers::roll::roll_dice,
        handlers::metrics::get_metrics,
    ),
    components(schemas(handlers::health::HealthResponse))
)]
#[derive(Debug)]
pub struct ApiDoc;

/// Serve the OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
