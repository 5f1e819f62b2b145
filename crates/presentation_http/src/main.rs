//! Dice roller HTTP server
//!
//! Main entry point for the HTTP API server.

use std::{future::IntoFuture, sync::Arc, time::Duration};

use anyhow::Context;
use infrastructure::{AppConfig, ThreadRngSource, init_telemetry};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal, sync::oneshot};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Malformed fault rates are fatal
    let config = AppConfig::load().context("Failed to load configuration")?;

    let telemetry = init_telemetry(&config.telemetry).context("Failed to initialize telemetry")?;

    info!("🎲 Dice roller v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        host = %config.server.host,
        port = %config.server.port,
        error_rate = %config.faults.error_rate,
        delay_rate = %config.faults.delay_rate,
        otlp = telemetry.is_exporting(),
        "Configuration loaded"
    );

    let state = AppState::new(&config, Arc::new(ThreadRngSource));

    let app = routes::create_router(state);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("🚀 Server listening on http://{}", addr);
    info!("📚 API docs: http://{}/api-docs/openapi.json", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));
    let (signalled_tx, signalled_rx) = oneshot::channel();

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = signalled_tx.send(());
        })
        .into_future();

    tokio::select! {
        result = server => result?,
        () = drain_deadline(signalled_rx, shutdown_timeout) => {
            warn!(timeout = ?shutdown_timeout, "Connections still open, forcing shutdown");
        }
    }

    info!("👋 Server shutdown complete");
    drop(telemetry);

    Ok(())
}

/// Resolves `timeout` after the shutdown signal; never resolves without one
async fn drain_deadline(signalled: oneshot::Receiver<()>, timeout: Duration) {
    if signalled.await.is_err() {
        std::future::pending::<()>().await;
    }
    info!("⏳ Waiting up to {:?} for connections to close...", timeout);
    tokio::time::sleep(timeout).await;
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
