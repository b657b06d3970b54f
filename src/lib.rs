//! # Question API
//!
//! HTTP mediation layer for the question resource of a Q&A platform, built
//! with Axum.
//!
//! ## Architecture
//!
//! The crate keeps a clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Question entities, caller identity and the question service trait
//! - **Application Layer** ([`application`]) - Bearer credential verification
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory question service
//! - **API Layer** ([`api`]) - Handlers, DTOs, binders, envelope rendering and middleware
//!
//! ## Features
//!
//! - Opaque short tokens in place of internal IDs on the wire
//! - Uniform `{code, message, data}` response envelope
//! - Optional bearer authentication resolved to a caller identity
//! - Declarative request validation before any service call
//!
//! ## Quick Start
//!
//! ```bash
//! export SHORT_ID_SECRET="change-me"
//! export TOKEN_SIGNING_SECRET="change-me-too"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{CredentialVerifier, HmacCredentialVerifier};
    pub use crate::domain::entities::{CallerIdentity, QuestionId, QuestionInfo, UserId};
    pub use crate::domain::services::{QuestionService, ServiceError};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
    pub use crate::utils::short_id::{DecodePolicy, ShortIdCodec};
}
