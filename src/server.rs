//! HTTP server initialization and runtime setup.
//!
//! Builds the question service, credential verifier and short-ID codec, then
//! runs the Axum server until a shutdown signal arrives.

use crate::application::services::HmacCredentialVerifier;
use crate::config::Config;
use crate::infrastructure::memory::InMemoryQuestionService;
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::short_id::ShortIdCodec;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Builds the application state from configuration.
pub fn build_state(config: &Config) -> AppState {
    let short_ids = ShortIdCodec::new(&config.short_id_secret, config.short_id_decode_policy);
    let credentials = HmacCredentialVerifier::new(config.token_signing_secret.clone());

    AppState::new(
        Arc::new(InMemoryQuestionService::new()),
        Arc::new(credentials),
        Arc::new(short_ids),
    )
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - In-memory question service
/// - Bearer credential verifier
/// - Short-ID codec
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The listen address cannot be parsed
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config);
    tracing::info!(
        policy = %config.short_id_decode_policy,
        "Question service ready (in-memory)"
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
