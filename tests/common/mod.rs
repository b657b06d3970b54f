#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use question_api::application::services::HmacCredentialVerifier;
use question_api::domain::entities::{
    CallerIdentity, InvitedUser, NewQuestion, Page, PersonalQuestionPageQuery, QuestionId,
    QuestionInfo, QuestionPageQuery, QuestionPatch, QuestionSummary, Tag, UserId,
};
use question_api::domain::services::{QuestionService, ServiceError};
use question_api::infrastructure::memory::InMemoryQuestionService;
use question_api::routes::router;
use question_api::state::AppState;
use question_api::utils::short_id::{DecodePolicy, ShortIdCodec};
use serde_json::{Value, json};
use sha2::Sha256;
use std::sync::Arc;

pub const TOKEN_SECRET: &str = "test-signing-secret";
pub const SHORT_ID_SECRET: &str = "test-short-id-secret";

pub const ALICE: u64 = 1;
pub const BOB: u64 = 2;
pub const FERRIS: u64 = 11;
pub const CORRO: u64 = 12;

pub fn test_codec() -> ShortIdCodec {
    ShortIdCodec::new(SHORT_ID_SECRET, DecodePolicy::Strict)
}

pub fn encode(id: u64) -> String {
    test_codec().encode(id)
}

/// Signs a bearer credential for `user_id`, valid for one hour.
pub fn sign_token(user_id: u64) -> String {
    let expires_at = (Utc::now() + Duration::hours(1)).timestamp();
    let payload = format!("{user_id}.{expires_at}");
    let mut mac = Hmac::<Sha256>::new_from_slice(TOKEN_SECRET.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(payload.as_bytes());
    format!("{payload}.{}", hex::encode(mac.finalize().into_bytes()))
}

pub fn bearer(user_id: u64) -> String {
    format!("Bearer {}", sign_token(user_id))
}

pub fn directory() -> Vec<InvitedUser> {
    vec![
        InvitedUser {
            id: UserId(FERRIS),
            username: "ferris".to_string(),
            display_name: "Ferris".to_string(),
            avatar: Some("https://example.com/ferris.png".to_string()),
            rank: 1200,
        },
        InvitedUser {
            id: UserId(CORRO),
            username: "corro".to_string(),
            display_name: "Corro".to_string(),
            avatar: None,
            rank: 35,
        },
    ]
}

pub fn state_with(service: Arc<dyn QuestionService>, policy: DecodePolicy) -> AppState {
    AppState::new(
        service,
        Arc::new(HmacCredentialVerifier::new(TOKEN_SECRET.to_string())),
        Arc::new(ShortIdCodec::new(SHORT_ID_SECRET, policy)),
    )
}

/// State backed by the in-memory service; the service handle is returned for
/// direct inspection.
pub fn create_test_state() -> (AppState, Arc<InMemoryQuestionService>) {
    let service = Arc::new(InMemoryQuestionService::with_users(directory()));
    let state = state_with(service.clone(), DecodePolicy::Strict);
    (state, service)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

pub fn question_body(title: &str) -> Value {
    json!({
        "title": title,
        "content": "Some context about the problem being asked.",
        "tags": [{ "slugName": "rust", "displayName": "Rust" }]
    })
}

pub fn tag(slug: &str) -> Tag {
    Tag {
        slug_name: slug.to_string(),
        display_name: slug.to_string(),
    }
}

/// Stores a question directly through the service and returns it.
pub async fn seed_question(
    service: &InMemoryQuestionService,
    title: &str,
    owner: CallerIdentity,
) -> QuestionInfo {
    service
        .add_question(NewQuestion {
            title: title.to_string(),
            content: "Seeded question body".to_string(),
            tags: vec![tag("rust")],
            invite_user_ids: vec![],
            owner,
        })
        .await
        .unwrap()
}

pub fn assert_envelope(body: &Value, code: u16, message: &str) {
    assert_eq!(body["code"], code);
    assert_eq!(body["message"], message);
}

pub fn assert_error_envelope(body: &Value, code: u16, message: &str) {
    assert_envelope(body, code, message);
    assert!(body["data"].is_null());
}

/// A question service whose every operation fails.
pub struct FailingQuestionService;

fn outage() -> ServiceError {
    ServiceError::Unavailable("storage offline".to_string())
}

#[async_trait]
impl QuestionService for FailingQuestionService {
    async fn add_question(&self, _question: NewQuestion) -> Result<QuestionInfo, ServiceError> {
        Err(outage())
    }

    async fn get_question_and_add_pv(
        &self,
        _id: QuestionId,
        _viewer: CallerIdentity,
    ) -> Result<QuestionInfo, ServiceError> {
        Err(outage())
    }

    async fn invite_user_info(&self, _id: QuestionId) -> Result<Vec<InvitedUser>, ServiceError> {
        Err(outage())
    }

    async fn get_question_page(
        &self,
        _query: QuestionPageQuery,
    ) -> Result<(Vec<QuestionSummary>, u64), ServiceError> {
        Err(outage())
    }

    async fn update_question(&self, _patch: QuestionPatch) -> Result<QuestionInfo, ServiceError> {
        Err(outage())
    }

    async fn personal_question_page(
        &self,
        _query: PersonalQuestionPageQuery,
    ) -> Result<Page<QuestionSummary>, ServiceError> {
        Err(outage())
    }
}

pub fn failing_server() -> TestServer {
    test_server(state_with(
        Arc::new(FailingQuestionService),
        DecodePolicy::Strict,
    ))
}
