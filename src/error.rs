//! Error type returned by handlers and extractors.
//!
//! [`AppError`] is the single error boundary of the API: every failure is
//! translated into one of the fixed envelope classes and rendered with
//! `"data": null`. Details are logged, never sent to the client.

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::api::response::{ResponseCode, render};
use crate::domain::services::ServiceError;
use crate::utils::short_id::ShortIdError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid parameters: {message}")]
    ParamInvalid { message: String },

    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl AppError {
    pub fn param_invalid(message: impl Into<String>) -> Self {
        Self::ParamInvalid {
            message: message.into(),
        }
    }
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Envelope class this error renders as.
    pub fn response_code(&self) -> ResponseCode {
        match self {
            AppError::ParamInvalid { .. } => ResponseCode::ParamInvalid,
            AppError::Unauthorized { .. } => ResponseCode::Unauthorized,
            AppError::NotFound { .. } => ResponseCode::NotFound,
            AppError::Internal { .. } => ResponseCode::InternalError,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.response_code();

        match &self {
            AppError::Internal { message } => tracing::error!(%message, "request failed"),
            other => tracing::debug!(error = %other, "request rejected"),
        }

        render::<()>(code, None)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::param_invalid(errors.to_string())
    }
}

impl From<ServiceError> for AppError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::NotFound { .. } => AppError::not_found(error.to_string()),
            other => AppError::internal(other.to_string()),
        }
    }
}

impl From<ShortIdError> for AppError {
    fn from(error: ShortIdError) -> Self {
        AppError::not_found(format!("unknown identifier: {error}"))
    }
}
