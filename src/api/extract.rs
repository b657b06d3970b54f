//! Request binders that validate input before a handler runs.
//!
//! Both extractors reject with [`AppError::ParamInvalid`], so malformed input
//! produces a single `param invalid` envelope and the handler body, including
//! its domain call, never executes. Axum's own rejections (missing content
//! type, syntax errors, wrong primitive types) are folded into the same
//! envelope instead of axum's plain-text responses.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body deserialized into `T` and checked with [`Validate`].
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::param_invalid(rejection.body_text()))?;

        value.validate()?;

        Ok(Self(value))
    }
}

/// Query string deserialized into `T` and checked with [`Validate`].
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::param_invalid(rejection.body_text()))?;

        value.validate()?;

        Ok(Self(value))
    }
}
