//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod question;

pub use health::health_handler;
pub use question::{
    add_question_handler, get_question_handler, personal_question_page_handler,
    question_invite_users_handler, question_page_handler, update_question_handler,
};
