//! Application layer services.
//!
//! Services here are consumed by the API layer and hold no per-request state.
//!
//! # Available Services
//!
//! - [`services::auth_service::CredentialVerifier`] - Caller resolution from bearer tokens
//! - [`services::auth_service::HmacCredentialVerifier`] - HMAC-signed token verification

pub mod services;
