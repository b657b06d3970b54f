//! Handler for health check endpoint.

use axum::extract::State;

use crate::api::dto::health::HealthResponse;
use crate::api::response::ApiResponse;
use crate::state::AppState;

/// Reports that the process is serving requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// ```json
/// {
///   "code": 200,
///   "message": "success",
///   "data": { "status": "healthy", "version": "0.1.0", "shortIdPolicy": "strict" }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> ApiResponse<HealthResponse> {
    ApiResponse(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        short_id_policy: state.short_ids.policy().to_string(),
    })
}
