//! DTO for the health check endpoint.

use serde::Serialize;

/// Health check payload, wrapped in the standard envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Active short-ID decode policy (`strict` or `passthrough`).
    pub short_id_policy: String,
}
