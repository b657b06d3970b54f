//! API route configuration.
//!
//! Authentication is optional on every route: the [`Caller`] extractor
//! resolves a missing or invalid bearer token to an anonymous caller, and
//! handlers that need a signed-in user reject on their own.
//!
//! [`Caller`]: crate::api::middleware::auth::Caller

use crate::api::handlers::{
    add_question_handler, get_question_handler, personal_question_page_handler,
    question_invite_users_handler, question_page_handler, update_question_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Mount point of the question API.
pub const API_PREFIX: &str = "/answer/api/v1";

/// Question routes, relative to [`API_PREFIX`].
///
/// # Endpoints
///
/// - `POST /question`                - Create a question
/// - `PUT  /question`                - Edit a question
/// - `GET  /question/info?id=`       - Fetch a question and count a view
/// - `GET  /question/invite?id=`     - Users invited to answer
/// - `GET  /question/page`           - Public question list (paginated)
/// - `GET  /personal/question/page`  - Caller's own questions (paginated)
pub fn question_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/question",
            post(add_question_handler).put(update_question_handler),
        )
        .route("/question/info", get(get_question_handler))
        .route("/question/invite", get(question_invite_users_handler))
        .route("/question/page", get(question_page_handler))
        .route(
            "/personal/question/page",
            get(personal_question_page_handler),
        )
}
