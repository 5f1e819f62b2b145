//! Route definitions

use axum::{Router, routing::get};
use tower_http::trace::{DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::{handlers, middleware::TraceContextMakeSpan, openapi, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(handlers::health::health_check))
        // Dice
        .route("/rolldice", get(handlers::roll::roll_dice))
        // Prometheus scrape endpoint
        .route("/metrics", get(handlers::metrics::get_metrics))
        // API description
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        // Request spans joined to the caller's trace
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(TraceContextMakeSpan)
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
        // Attach state
        .with_state(state)
}
