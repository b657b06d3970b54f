//! Contracts of the external collaborators the mediation layer delegates to.
//!
//! - [`QuestionService`] - Question storage, visibility, ranking and review rules

pub mod question_service;

pub use question_service::{QuestionService, ServiceError};

#[cfg(test)]
pub use question_service::MockQuestionService;
