//! Trait for the question domain service.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{
    CallerIdentity, InvitedUser, NewQuestion, Page, PersonalQuestionPageQuery, QuestionId,
    QuestionInfo, QuestionPageQuery, QuestionPatch, QuestionSummary,
};

/// Failures reported by the question service.
///
/// The mediation layer surfaces [`ServiceError::NotFound`] as a not-found
/// response and every other variant as a generic internal error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("invalid request: {0}")]
    Invalid(String),

    #[error("question service unavailable: {0}")]
    Unavailable(String),
}

impl ServiceError {
    pub fn question_not_found() -> Self {
        Self::NotFound {
            resource: "question",
        }
    }
}

/// The question domain service.
///
/// Owns storage, visibility, view counting and the review workflow. The
/// mediation layer only translates identifiers and renders outcomes; it
/// receives an implementation at construction time.
///
/// # Implementations
///
/// - [`crate::infrastructure::memory::InMemoryQuestionService`] - In-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionService: Send + Sync {
    /// Creates a question owned by `question.owner` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Invalid`] if the service rejects the content.
    async fn add_question(&self, question: NewQuestion) -> Result<QuestionInfo, ServiceError>;

    /// Loads a question and counts a page view.
    ///
    /// The view is not counted when `viewer` is the question's creator.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if the question does not exist or is
    /// not visible to `viewer`.
    async fn get_question_and_add_pv(
        &self,
        id: QuestionId,
        viewer: CallerIdentity,
    ) -> Result<QuestionInfo, ServiceError>;

    /// Lists users invited to answer a question.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if the question does not exist.
    async fn invite_user_info(&self, id: QuestionId) -> Result<Vec<InvitedUser>, ServiceError>;

    /// Returns one page of questions and the total number of matches.
    ///
    /// The service clamps out-of-range paging values.
    async fn get_question_page(
        &self,
        query: QuestionPageQuery,
    ) -> Result<(Vec<QuestionSummary>, u64), ServiceError>;

    /// Applies or queues an edit and returns the resulting question state.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::PermissionDenied`] if the editor may not edit.
    /// Returns [`ServiceError::NotFound`] if the question does not exist.
    async fn update_question(&self, patch: QuestionPatch) -> Result<QuestionInfo, ServiceError>;

    /// Returns one page of the owner's own questions.
    async fn personal_question_page(
        &self,
        query: PersonalQuestionPageQuery,
    ) -> Result<Page<QuestionSummary>, ServiceError>;
}
