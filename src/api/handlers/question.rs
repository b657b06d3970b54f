//! Handlers for the question endpoints.
//!
//! Each handler is a short pipeline: bind and validate the request, resolve
//! the caller, decode inbound short tokens, delegate to the question service,
//! encode outbound IDs and return one envelope. Every path ends in exactly one
//! rendered envelope because handlers return `Result<ApiResponse<T>, AppError>`.

use axum::extract::State;

use crate::api::dto::pagination::{PageResult, paginate};
use crate::api::dto::question::{
    InvitedUserResponse, PersonalQuestionPageRequest, QuestionAddRequest, QuestionIdQuery,
    QuestionInfoResponse, QuestionPageRequest, QuestionSummaryResponse, QuestionUpdateRequest,
    UpdateQuestionResponse,
};
use crate::api::extract::{ValidatedJson, ValidatedQuery};
use crate::api::middleware::auth::Caller;
use crate::api::response::ApiResponse;
use crate::domain::entities::{QuestionId, UserId};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a question owned by the caller.
///
/// # Endpoint
///
/// `POST /answer/api/v1/question`
///
/// # Request Body
///
/// ```json
/// {
///   "title": "How do axum extractors work?",
///   "content": "Markdown body",
///   "tags": [{ "slugName": "axum", "displayName": "Axum" }],
///   "inviteUser": ["<user token>"]
/// }
/// ```
///
/// Anonymous callers are passed to the service as the owner; the service
/// decides what that means.
///
/// # Errors
///
/// - `param invalid` if the body fails validation or an invitee token is malformed
/// - `internal server error` if the service fails
pub async fn add_question_handler(
    State(state): State<AppState>,
    Caller(caller): Caller,
    ValidatedJson(payload): ValidatedJson<QuestionAddRequest>,
) -> Result<ApiResponse<QuestionInfoResponse>, AppError> {
    let invite_user_ids = payload
        .invite_user
        .iter()
        .map(|token| state.short_ids.decode(token).map(UserId))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::param_invalid(format!("inviteUser: {e}")))?;

    let question = payload.into_new_question(caller, invite_user_ids);

    let info = state.question_service.add_question(question).await?;
    tracing::info!(question_id = %info.id, %caller, "question created");

    Ok(ApiResponse(QuestionInfoResponse::from_info(
        info,
        &state.short_ids,
    )))
}

/// Returns a question and counts a page view.
///
/// # Endpoint
///
/// `GET /answer/api/v1/question/info?id=<token>`
///
/// The caller is forwarded to the service, which skips the view count when the
/// caller created the question.
///
/// # Errors
///
/// - `not found` if the token is malformed or the service reports no such question
/// - `internal server error` for other service failures
pub async fn get_question_handler(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<QuestionIdQuery>,
    Caller(caller): Caller,
) -> Result<ApiResponse<QuestionInfoResponse>, AppError> {
    let id = QuestionId(state.short_ids.decode(&query.id)?);

    let info = state
        .question_service
        .get_question_and_add_pv(id, caller)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, question_id = %id, "failed to load question"))?;

    Ok(ApiResponse(QuestionInfoResponse::from_info(
        info,
        &state.short_ids,
    )))
}

/// Lists users invited to answer a question.
///
/// # Endpoint
///
/// `GET /answer/api/v1/question/invite?id=<token>`
///
/// # Errors
///
/// - `not found` if the token is malformed or the question does not exist
/// - `internal server error` for other service failures
pub async fn question_invite_users_handler(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<QuestionIdQuery>,
) -> Result<ApiResponse<Vec<InvitedUserResponse>>, AppError> {
    let id = QuestionId(state.short_ids.decode(&query.id)?);

    let users = state
        .question_service
        .invite_user_info(id)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, question_id = %id, "failed to load invitees"))?;

    let users = users
        .into_iter()
        .map(|user| InvitedUserResponse::from_user(user, &state.short_ids))
        .collect();

    Ok(ApiResponse(users))
}

/// Lists questions page by page.
///
/// # Endpoint
///
/// `GET /answer/api/v1/question/page`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `pageSize` (optional): Items per page (default: 20)
/// - `order` (optional): `newest` | `active` | `frequent` | `score` | `unanswered`
/// - `tag` (optional): Tag slug filter
///
/// Anonymous callers are allowed; the caller is passed along as the viewer for
/// visibility rules.
///
/// # Response
///
/// ```json
/// { "code": 200, "message": "success", "data": { "total": 37, "list": [ ... ] } }
/// ```
pub async fn question_page_handler(
    State(state): State<AppState>,
    ValidatedQuery(request): ValidatedQuery<QuestionPageRequest>,
    Caller(caller): Caller,
) -> Result<ApiResponse<PageResult<QuestionSummaryResponse>>, AppError> {
    let query = request.into_query(caller);

    let (questions, total) = state.question_service.get_question_page(query).await?;

    let page = paginate(total, questions)
        .map(|summary| QuestionSummaryResponse::from_summary(summary, &state.short_ids));

    Ok(ApiResponse(page))
}

/// Edits a question.
///
/// # Endpoint
///
/// `PUT /answer/api/v1/question`
///
/// # Request Body
///
/// ```json
/// {
///   "id": "<question token>",
///   "title": "...",
///   "content": "...",
///   "tags": [{ "slugName": "axum" }],
///   "editSummary": "fix typo",
///   "noNeedReview": true
/// }
/// ```
///
/// # Review Gate
///
/// `waitForReview` in the response is `!noNeedReview`. It is advisory: the
/// service alone decides whether the edit is applied or queued.
///
/// # Errors
///
/// - `param invalid` if the body fails validation
/// - `not found` if the token is malformed or the question does not exist
/// - `internal server error` for other service failures (including permission denials)
pub async fn update_question_handler(
    State(state): State<AppState>,
    Caller(caller): Caller,
    ValidatedJson(payload): ValidatedJson<QuestionUpdateRequest>,
) -> Result<ApiResponse<UpdateQuestionResponse>, AppError> {
    let id = QuestionId(state.short_ids.decode(&payload.id)?);
    let wait_for_review = !payload.no_need_review;

    let patch = payload.into_patch(id, caller);

    let info = state
        .question_service
        .update_question(patch)
        .await
        .inspect_err(|e| {
            tracing::warn!(error = %e, question_id = %id, %caller, "question update failed")
        })?;

    Ok(ApiResponse(UpdateQuestionResponse {
        url_title: info.url_title,
        wait_for_review,
    }))
}

/// Lists the caller's own questions page by page.
///
/// # Endpoint
///
/// `GET /answer/api/v1/personal/question/page`
///
/// # Query Parameters
///
/// - `page`, `pageSize` as for the public list
/// - `order` (optional): `newest` | `score`
///
/// # Errors
///
/// - `unauthorized` for anonymous callers (the service is not called)
/// - `internal server error` if the service fails
pub async fn personal_question_page_handler(
    State(state): State<AppState>,
    ValidatedQuery(request): ValidatedQuery<PersonalQuestionPageRequest>,
    Caller(caller): Caller,
) -> Result<ApiResponse<PageResult<QuestionSummaryResponse>>, AppError> {
    let Some(owner) = caller.user_id() else {
        return Err(AppError::unauthorized(
            "personal question list requires a signed-in caller",
        ));
    };

    let page = state
        .question_service
        .personal_question_page(request.into_query(owner))
        .await?;

    let page = paginate(page.total, page.items)
        .map(|summary| QuestionSummaryResponse::from_summary(summary, &state.short_ids));

    Ok(ApiResponse(page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::question_routes;
    use crate::application::services::CredentialVerifier;
    use crate::domain::entities::{
        CallerIdentity, InvitedUser, Page, PersonalOrder, QuestionInfo, QuestionOrder,
        QuestionStatus, QuestionSummary, Tag,
    };
    use crate::domain::services::{MockQuestionService, ServiceError};
    use crate::utils::short_id::{DecodePolicy, ShortIdCodec};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::Utc;
    use serde_json::{Value, json};
    use std::sync::Arc;

    /// Resolves `user-<n>` tokens to user `n`.
    struct FixedCredentials;

    impl CredentialVerifier for FixedCredentials {
        fn resolve(&self, token: &str) -> CallerIdentity {
            token
                .strip_prefix("user-")
                .and_then(|id| id.parse().ok())
                .map(|id| CallerIdentity::User(UserId(id)))
                .unwrap_or_default()
        }
    }

    fn codec() -> ShortIdCodec {
        ShortIdCodec::new("handler-test-secret", DecodePolicy::Strict)
    }

    fn make_server(service: MockQuestionService) -> TestServer {
        let state = AppState::new(
            Arc::new(service),
            Arc::new(FixedCredentials),
            Arc::new(codec()),
        );
        TestServer::new(question_routes().with_state(state)).unwrap()
    }

    fn question_info(id: u64, owner: u64) -> QuestionInfo {
        let now = Utc::now();
        QuestionInfo {
            id: QuestionId(id),
            title: "How do axum extractors work?".to_string(),
            url_title: "how-do-axum-extractors-work".to_string(),
            content: "I would like to understand the ordering rules.".to_string(),
            tags: vec![Tag {
                slug_name: "axum".to_string(),
                display_name: "Axum".to_string(),
            }],
            status: QuestionStatus::Published,
            view_count: 0,
            answer_count: 0,
            vote_count: 0,
            owner: Some(UserId(owner)),
            last_editor: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn update_body(id: &str, no_need_review: bool) -> Value {
        json!({
            "id": id,
            "title": "How do axum extractors work?",
            "content": "I would like to understand the ordering rules.",
            "tags": [{ "slugName": "axum" }],
            "noNeedReview": no_need_review
        })
    }

    fn assert_internal_error(body: &Value) {
        assert_eq!(body["code"], 500);
        assert_eq!(body["message"], "internal server error");
        assert!(body["data"].is_null());
    }

    // ─── Update ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_update_no_need_review_true_does_not_wait() {
        let mut service = MockQuestionService::new();
        service
            .expect_update_question()
            .withf(|patch| {
                patch.id == QuestionId(42)
                    && patch.no_need_review
                    && patch.editor == CallerIdentity::User(UserId(7))
            })
            .times(1)
            .returning(|_| Ok(question_info(42, 7)));

        let server = make_server(service);
        let response = server
            .put("/question")
            .add_header("Authorization", "Bearer user-7")
            .json(&update_body(&codec().encode(42), true))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["code"], 200);
        assert_eq!(body["data"]["waitForReview"], false);
        assert_eq!(body["data"]["urlTitle"], "how-do-axum-extractors-work");
    }

    #[tokio::test]
    async fn test_update_no_need_review_false_waits() {
        let mut service = MockQuestionService::new();
        service
            .expect_update_question()
            .times(1)
            .returning(|_| Ok(question_info(42, 7)));

        let server = make_server(service);
        let response = server
            .put("/question")
            .json(&update_body(&codec().encode(42), false))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"]["waitForReview"], true);
    }

    #[tokio::test]
    async fn test_update_review_flag_ignores_domain_outcome() {
        let mut service = MockQuestionService::new();
        service.expect_update_question().times(1).returning(|_| {
            let mut info = question_info(42, 7);
            info.status = QuestionStatus::PendingReview;
            Ok(info)
        });

        let server = make_server(service);
        let response = server
            .put("/question")
            .json(&update_body(&codec().encode(42), true))
            .await;

        assert_eq!(response.json::<Value>()["data"]["waitForReview"], false);
    }

    #[tokio::test]
    async fn test_update_with_malformed_id_is_not_found() {
        let mut service = MockQuestionService::new();
        service.expect_update_question().never();

        let server = make_server(service);
        let response = server.put("/question").json(&update_body("42", true)).await;

        response.assert_status_not_found();
        let body = response.json::<Value>();
        assert_eq!(body["code"], 404);
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_update_validation_failure_skips_service() {
        let mut service = MockQuestionService::new();
        service.expect_update_question().never();

        let mut body = update_body(&codec().encode(42), true);
        body["title"] = json!("tiny");

        let server = make_server(service);
        let response = server.put("/question").json(&body).await;

        response.assert_status_bad_request();
        let body = response.json::<Value>();
        assert_eq!(body["code"], 400);
        assert_eq!(body["message"], "param invalid");
        assert!(body["data"].is_null());
    }

    // ─── Page ────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_page_wraps_total_and_encodes_ids() {
        let mut service = MockQuestionService::new();
        service
            .expect_get_question_page()
            .withf(|query| {
                query.page == 1
                    && query.page_size == 10
                    && query.order == QuestionOrder::Newest
                    && query.viewer == CallerIdentity::Anonymous
            })
            .times(1)
            .returning(|_| {
                let items = (1..=9)
                    .map(|id| QuestionSummary::from(&question_info(id, 7)))
                    .collect();
                Ok((items, 37))
            });

        let server = make_server(service);
        let response = server
            .get("/question/page")
            .add_query_param("page", 1)
            .add_query_param("pageSize", 10)
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["data"]["total"], 37);

        let list = body["data"]["list"].as_array().unwrap();
        assert_eq!(list.len(), 9);
        let codec = codec();
        for (item, id) in list.iter().zip(1..=9u64) {
            assert_eq!(item["id"], codec.encode(id));
            assert_eq!(item["userId"], codec.encode(7));
        }
    }

    #[tokio::test]
    async fn test_page_passes_signed_in_viewer() {
        let mut service = MockQuestionService::new();
        service
            .expect_get_question_page()
            .withf(|query| {
                query.viewer == CallerIdentity::User(UserId(3))
                    && query.order == QuestionOrder::Unanswered
                    && query.tag.as_deref() == Some("rust")
            })
            .times(1)
            .returning(|_| Ok((vec![], 0)));

        let server = make_server(service);
        let response = server
            .get("/question/page")
            .add_query_param("order", "unanswered")
            .add_query_param("tag", "rust")
            .add_header("Authorization", "Bearer user-3")
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>()["data"],
            json!({ "total": 0, "list": [] })
        );
    }

    #[tokio::test]
    async fn test_page_invalid_page_number_skips_service() {
        let mut service = MockQuestionService::new();
        service.expect_get_question_page().never();

        let server = make_server(service);
        let response = server
            .get("/question/page")
            .add_query_param("page", "first")
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["code"], 400);
    }

    // ─── Fetch ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_fetch_forwards_decoded_id_and_caller() {
        let mut service = MockQuestionService::new();
        service
            .expect_get_question_and_add_pv()
            .withf(|id, viewer| {
                *id == QuestionId(42) && *viewer == CallerIdentity::User(UserId(7))
            })
            .times(1)
            .returning(|id, _| Ok(question_info(id.0, 7)));

        let server = make_server(service);
        let response = server
            .get("/question/info")
            .add_query_param("id", codec().encode(42))
            .add_header("Authorization", "Bearer user-7")
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["data"]["id"], codec().encode(42));
        assert_eq!(body["data"]["title"], "How do axum extractors work?");
    }

    #[tokio::test]
    async fn test_fetch_with_unverifiable_token_is_anonymous() {
        let mut service = MockQuestionService::new();
        service
            .expect_get_question_and_add_pv()
            .withf(|_, viewer| *viewer == CallerIdentity::Anonymous)
            .times(1)
            .returning(|id, _| Ok(question_info(id.0, 7)));

        let server = make_server(service);
        server
            .get("/question/info")
            .add_query_param("id", codec().encode(42))
            .add_header("Authorization", "Bearer forged")
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_fetch_missing_id_is_param_invalid() {
        let mut service = MockQuestionService::new();
        service.expect_get_question_and_add_pv().never();

        let server = make_server(service);
        let response = server.get("/question/info").await;

        response.assert_status_bad_request();
        assert!(response.json::<Value>()["data"].is_null());
    }

    #[tokio::test]
    async fn test_fetch_not_found_renders_envelope() {
        let mut service = MockQuestionService::new();
        service
            .expect_get_question_and_add_pv()
            .times(1)
            .returning(|_, _| Err(ServiceError::question_not_found()));

        let server = make_server(service);
        let response = server
            .get("/question/info")
            .add_query_param("id", codec().encode(5))
            .await;

        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()["code"], 404);
    }

    // ─── Invite ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_invite_encodes_user_ids() {
        let mut service = MockQuestionService::new();
        service
            .expect_invite_user_info()
            .withf(|id| *id == QuestionId(42))
            .times(1)
            .returning(|_| {
                Ok(vec![InvitedUser {
                    id: UserId(11),
                    username: "ferris".to_string(),
                    display_name: "Ferris".to_string(),
                    avatar: None,
                    rank: 120,
                }])
            });

        let server = make_server(service);
        let response = server
            .get("/question/invite")
            .add_query_param("id", codec().encode(42))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["data"][0]["id"], codec().encode(11));
        assert_eq!(body["data"][0]["username"], "ferris");
    }

    // ─── Personal page ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_personal_page_filters_by_caller() {
        let mut service = MockQuestionService::new();
        service
            .expect_personal_question_page()
            .withf(|query| query.owner == UserId(7) && query.order == PersonalOrder::Score)
            .times(1)
            .returning(|_| {
                Ok(Page::new(
                    vec![QuestionSummary::from(&question_info(1, 7))],
                    1,
                ))
            });

        let server = make_server(service);
        let response = server
            .get("/personal/question/page")
            .add_query_param("order", "score")
            .add_header("Authorization", "Bearer user-7")
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["list"][0]["id"], codec().encode(1));
    }

    #[tokio::test]
    async fn test_personal_page_requires_signed_in_caller() {
        let mut service = MockQuestionService::new();
        service.expect_personal_question_page().never();

        let server = make_server(service);
        let response = server.get("/personal/question/page").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body = response.json::<Value>();
        assert_eq!(body["code"], 401);
        assert!(body["data"].is_null());
    }

    // ─── Create ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_create_injects_owner_and_decodes_invitees() {
        let mut service = MockQuestionService::new();
        service
            .expect_add_question()
            .withf(|question| {
                question.owner == CallerIdentity::User(UserId(7))
                    && question.invite_user_ids == vec![UserId(11)]
            })
            .times(1)
            .returning(|_| Ok(question_info(100, 7)));

        let server = make_server(service);
        let response = server
            .post("/question")
            .add_header("Authorization", "Bearer user-7")
            .json(&json!({
                "title": "How do axum extractors work?",
                "content": "I would like to understand the ordering rules.",
                "tags": [{ "slugName": "axum" }],
                "inviteUser": [codec().encode(11)]
            }))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["data"]["id"], codec().encode(100));
        assert_eq!(body["data"]["userId"], codec().encode(7));
    }

    #[tokio::test]
    async fn test_create_with_malformed_invitee_is_param_invalid() {
        let mut service = MockQuestionService::new();
        service.expect_add_question().never();

        let server = make_server(service);
        let response = server
            .post("/question")
            .json(&json!({
                "title": "How do axum extractors work?",
                "content": "I would like to understand the ordering rules.",
                "tags": [{ "slugName": "axum" }],
                "inviteUser": ["nope"]
            }))
            .await;

        response.assert_status_bad_request();
    }

    // ─── Service failures ────────────────────────────────────────────────────

    fn unavailable() -> ServiceError {
        ServiceError::Unavailable("connection refused".to_string())
    }

    #[tokio::test]
    async fn test_service_failure_renders_internal_error_on_every_operation() {
        let mut service = MockQuestionService::new();
        service
            .expect_add_question()
            .returning(|_| Err(unavailable()));
        service
            .expect_get_question_and_add_pv()
            .returning(|_, _| Err(unavailable()));
        service
            .expect_invite_user_info()
            .returning(|_| Err(unavailable()));
        service
            .expect_get_question_page()
            .returning(|_| Err(unavailable()));
        service
            .expect_update_question()
            .returning(|_| Err(unavailable()));
        service
            .expect_personal_question_page()
            .returning(|_| Err(unavailable()));

        let server = make_server(service);
        let token = codec().encode(42);

        let responses = vec![
            server
                .post("/question")
                .json(&json!({
                    "title": "How do axum extractors work?",
                    "content": "I would like to understand the ordering rules.",
                    "tags": [{ "slugName": "axum" }]
                }))
                .await,
            server
                .get("/question/info")
                .add_query_param("id", &token)
                .await,
            server
                .get("/question/invite")
                .add_query_param("id", &token)
                .await,
            server.get("/question/page").await,
            server.put("/question").json(&update_body(&token, false)).await,
            server
                .get("/personal/question/page")
                .add_header("Authorization", "Bearer user-7")
                .await,
        ];

        for response in responses {
            response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
            let body = response.json::<Value>();
            assert_internal_error(&body);
            assert!(!body.to_string().contains("connection refused"));
        }
    }

    #[tokio::test]
    async fn test_invite_failure_renders_single_error_envelope() {
        let mut service = MockQuestionService::new();
        service
            .expect_invite_user_info()
            .times(1)
            .returning(|_| Err(unavailable()));

        let server = make_server(service);
        let response = server
            .get("/question/invite")
            .add_query_param("id", codec().encode(42))
            .await;

        // The body must parse as exactly one JSON document.
        let body: Value = serde_json::from_str(&response.text()).unwrap();
        assert_internal_error(&body);
    }

    #[tokio::test]
    async fn test_permission_denied_is_internal_error() {
        let mut service = MockQuestionService::new();
        service
            .expect_update_question()
            .times(1)
            .returning(|_| Err(ServiceError::PermissionDenied("not the owner".to_string())));

        let server = make_server(service);
        let response = server
            .put("/question")
            .json(&update_body(&codec().encode(42), true))
            .await;

        assert_internal_error(&response.json::<Value>());
    }
}
