//! HTTP middleware and request-scoped extractors.
//!
//! Provides caller resolution and observability middleware.

pub mod auth;
pub mod tracing;
