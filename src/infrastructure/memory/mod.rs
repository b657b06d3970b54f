//! In-process implementation of the question service.

mod question_service;

pub use question_service::{InMemoryQuestionService, PendingRevision};
