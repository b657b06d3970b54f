//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`           - Health check (public)
//! - `/answer/api/v1/*`       - Question API, see [`crate::api::routes`]
//! - anything else            - `not found` envelope, including known paths
//!   requested with an unsupported method
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::api::routes::API_PREFIX;
use crate::error::AppError;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the router with all routes and the tracing layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest(API_PREFIX, api::routes::question_routes())
        .fallback(fallback_handler)
        .method_not_allowed_fallback(method_not_allowed_handler)
        .with_state(state)
        .layer(tracing::layer())
}

/// Wraps [`router`] with trailing-slash normalization for serving.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

async fn fallback_handler() -> AppError {
    AppError::not_found("no such route")
}

async fn method_not_allowed_handler() -> AppError {
    AppError::not_found("method not supported on this route")
}
