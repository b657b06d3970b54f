//! Uniform response envelope rendered for every request.
//!
//! Every response body has the same shape:
//!
//! ```json
//! { "code": 200, "message": "success", "data": { ... } }
//! ```
//!
//! Failures carry `"data": null`. Handlers return
//! `Result<ApiResponse<T>, AppError>`, so each request renders exactly one
//! envelope: either the success value or the error, never both and never
//! neither.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Fixed code/message pairs of the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    Success,
    ParamInvalid,
    Unauthorized,
    NotFound,
    InternalError,
}

impl ResponseCode {
    /// Numeric code placed in the envelope body.
    pub const fn code(self) -> u16 {
        match self {
            Self::Success => 200,
            Self::ParamInvalid => 400,
            Self::Unauthorized => 401,
            Self::NotFound => 404,
            Self::InternalError => 500,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::ParamInvalid => "param invalid",
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not found",
            Self::InternalError => "internal server error",
        }
    }

    /// HTTP status sent alongside the envelope.
    pub const fn status(self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::ParamInvalid => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Wire form of the envelope.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub code: u16,
    pub message: &'static str,
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(code: ResponseCode, data: Option<T>) -> Self {
        Self {
            code: code.code(),
            message: code.message(),
            data,
        }
    }
}

/// Renders one envelope as an HTTP response.
pub fn render<T: Serialize>(code: ResponseCode, data: Option<T>) -> Response {
    (code.status(), Json(Envelope::new(code, data))).into_response()
}

/// Successful handler outcome, rendered as a `success` envelope around `T`.
#[derive(Debug)]
pub struct ApiResponse<T>(pub T);

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        render(ResponseCode::Success, Some(self.0))
    }
}
