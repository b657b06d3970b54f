//! Caller resolution from the `Authorization` header.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_auth::AuthBearer;

use crate::domain::entities::CallerIdentity;
use crate::state::AppState;

/// Extractor yielding the request's [`CallerIdentity`].
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Resolution
///
/// 1. Extract the bearer token from the `Authorization` header
/// 2. Verify it with [`AppState::credentials`]
/// 3. Anything missing, malformed, forged or expired resolves to
///    [`CallerIdentity::Anonymous`]
///
/// The extractor never rejects. Handlers that need a signed-in caller check
/// the identity themselves.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(Caller(caller): Caller) -> String {
///     caller.to_string()
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub CallerIdentity);

impl FromRequestParts<AppState> for Caller {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = match AuthBearer::from_request_parts(parts, &()).await {
            Ok(AuthBearer(token)) => state.credentials.resolve(&token),
            Err(_) => CallerIdentity::Anonymous,
        };

        Ok(Caller(identity))
    }
}
