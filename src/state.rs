//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::CredentialVerifier;
use crate::domain::services::QuestionService;
use crate::utils::short_id::ShortIdCodec;

/// Handles to the collaborators of the mediation layer.
///
/// Holds no per-request data and no mutable state of its own; cloning is a
/// handful of `Arc` increments. Collaborators are supplied by the caller so
/// tests can substitute doubles.
#[derive(Clone)]
pub struct AppState {
    pub question_service: Arc<dyn QuestionService>,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub short_ids: Arc<ShortIdCodec>,
}

impl AppState {
    pub fn new(
        question_service: Arc<dyn QuestionService>,
        credentials: Arc<dyn CredentialVerifier>,
        short_ids: Arc<ShortIdCodec>,
    ) -> Self {
        Self {
            question_service,
            credentials,
            short_ids,
        }
    }
}
