//! DTOs for the question endpoints.
//!
//! Request types own their validation rules (via `validator`) and convert into
//! domain commands once the caller and decoded identifiers are known. Response
//! types carry external short tokens in place of every internal ID.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::api::dto::pagination::PageParams;
use crate::domain::entities::{
    CallerIdentity, InvitedUser, NewQuestion, PersonalOrder, PersonalQuestionPageQuery,
    QuestionId, QuestionInfo, QuestionOrder, QuestionPageQuery, QuestionPatch, QuestionStatus,
    QuestionSummary, Tag, UserId,
};
use crate::utils::short_id::ShortIdCodec;

/// Compiled regex for tag slug validation.
static TAG_SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9+#\-.]{1,35}$").unwrap());

/// Rejects strings that contain only whitespace.
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

// ─── Requests ────────────────────────────────────────────────────────────────

/// A tag reference in a create or update request.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TagItem {
    #[validate(regex(path = *TAG_SLUG_REGEX, message = "Invalid tag slug"))]
    pub slug_name: String,

    /// Defaults to the slug when omitted.
    #[validate(length(max = 35))]
    pub display_name: Option<String>,
}

impl From<TagItem> for Tag {
    fn from(item: TagItem) -> Self {
        let display_name = item
            .display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| item.slug_name.clone());

        Tag {
            slug_name: item.slug_name,
            display_name,
        }
    }
}

/// Request body for `POST /question`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAddRequest {
    #[validate(length(min = 6, max = 150), custom(function = "validate_not_blank"))]
    pub title: String,

    #[validate(length(min = 6, max = 65535), custom(function = "validate_not_blank"))]
    pub content: String,

    #[validate(length(min = 1, max = 5), nested)]
    pub tags: Vec<TagItem>,

    /// Short tokens of users invited to answer.
    #[serde(default)]
    #[validate(length(max = 5))]
    pub invite_user: Vec<String>,
}

impl QuestionAddRequest {
    /// Builds the create command with the resolved owner and decoded invitees.
    pub fn into_new_question(
        self,
        owner: CallerIdentity,
        invite_user_ids: Vec<UserId>,
    ) -> NewQuestion {
        NewQuestion {
            title: self.title,
            content: self.content,
            tags: self.tags.into_iter().map(Tag::from).collect(),
            invite_user_ids,
            owner,
        }
    }
}

/// Query string carrying a question's short token (`?id=`).
#[derive(Debug, Deserialize, Validate)]
pub struct QuestionIdQuery {
    #[validate(length(min = 1))]
    pub id: String,
}

/// Sort order accepted by the public question list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionOrderParam {
    #[default]
    Newest,
    Active,
    Frequent,
    Score,
    Unanswered,
}

impl From<QuestionOrderParam> for QuestionOrder {
    fn from(order: QuestionOrderParam) -> Self {
        match order {
            QuestionOrderParam::Newest => QuestionOrder::Newest,
            QuestionOrderParam::Active => QuestionOrder::Active,
            QuestionOrderParam::Frequent => QuestionOrder::Frequent,
            QuestionOrderParam::Score => QuestionOrder::Score,
            QuestionOrderParam::Unanswered => QuestionOrder::Unanswered,
        }
    }
}

/// Query parameters for `GET /question/page`.
#[derive(Debug, Deserialize, Validate)]
pub struct QuestionPageRequest {
    #[serde(flatten)]
    pub pagination: PageParams,

    #[serde(default)]
    pub order: QuestionOrderParam,

    /// Restricts the list to questions carrying this tag slug.
    #[validate(length(min = 1, max = 35))]
    pub tag: Option<String>,
}

impl QuestionPageRequest {
    pub fn into_query(self, viewer: CallerIdentity) -> QuestionPageQuery {
        QuestionPageQuery {
            page: self.pagination.page(),
            page_size: self.pagination.page_size(),
            order: self.order.into(),
            tag: self.tag,
            viewer,
        }
    }
}

/// Request body for `PUT /question`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionUpdateRequest {
    /// Short token of the question being edited.
    #[validate(length(min = 1))]
    pub id: String,

    #[validate(length(min = 6, max = 150), custom(function = "validate_not_blank"))]
    pub title: String,

    #[validate(length(min = 6, max = 65535), custom(function = "validate_not_blank"))]
    pub content: String,

    #[validate(length(min = 1, max = 5), nested)]
    pub tags: Vec<TagItem>,

    #[validate(length(max = 100))]
    pub edit_summary: Option<String>,

    /// The editor asks for the edit to skip moderation.
    #[serde(default)]
    pub no_need_review: bool,
}

impl QuestionUpdateRequest {
    /// Builds the edit command for the decoded question ID.
    pub fn into_patch(self, id: QuestionId, editor: CallerIdentity) -> QuestionPatch {
        QuestionPatch {
            id,
            title: self.title,
            content: self.content,
            tags: self.tags.into_iter().map(Tag::from).collect(),
            edit_summary: self.edit_summary,
            editor,
            no_need_review: self.no_need_review,
        }
    }
}

/// Sort order accepted by the personal question list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonalOrderParam {
    #[default]
    Newest,
    Score,
}

impl From<PersonalOrderParam> for PersonalOrder {
    fn from(order: PersonalOrderParam) -> Self {
        match order {
            PersonalOrderParam::Newest => PersonalOrder::Newest,
            PersonalOrderParam::Score => PersonalOrder::Score,
        }
    }
}

/// Query parameters for `GET /personal/question/page`.
#[derive(Debug, Deserialize, Validate)]
pub struct PersonalQuestionPageRequest {
    #[serde(flatten)]
    pub pagination: PageParams,

    #[serde(default)]
    pub order: PersonalOrderParam,
}

impl PersonalQuestionPageRequest {
    pub fn into_query(self, owner: UserId) -> PersonalQuestionPageQuery {
        PersonalQuestionPageQuery {
            page: self.pagination.page(),
            page_size: self.pagination.page_size(),
            order: self.order.into(),
            owner,
        }
    }
}

// ─── Responses ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagResponse {
    pub slug_name: String,
    pub display_name: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            slug_name: tag.slug_name,
            display_name: tag.display_name,
        }
    }
}

fn status_label(status: QuestionStatus) -> &'static str {
    match status {
        QuestionStatus::Published => "published",
        QuestionStatus::PendingReview => "pending_review",
    }
}

/// Full question as returned by create and fetch.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionInfoResponse {
    pub id: String,
    pub title: String,
    pub url_title: String,
    pub content: String,
    pub tags: Vec<TagResponse>,
    pub status: &'static str,
    pub view_count: u64,
    pub answer_count: u64,
    pub vote_count: i64,
    pub user_id: Option<String>,
    pub last_edit_user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuestionInfoResponse {
    /// Builds the response, encoding every internal ID.
    pub fn from_info(info: QuestionInfo, ids: &ShortIdCodec) -> Self {
        Self {
            id: ids.encode(info.id.0),
            title: info.title,
            url_title: info.url_title,
            content: info.content,
            tags: info.tags.into_iter().map(TagResponse::from).collect(),
            status: status_label(info.status),
            view_count: info.view_count,
            answer_count: info.answer_count,
            vote_count: info.vote_count,
            user_id: info.owner.map(|user| ids.encode(user.0)),
            last_edit_user_id: info.last_editor.map(|user| ids.encode(user.0)),
            created_at: info.created_at,
            updated_at: info.updated_at,
        }
    }
}

/// List item of the paged endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSummaryResponse {
    pub id: String,
    pub title: String,
    pub url_title: String,
    pub tags: Vec<TagResponse>,
    pub status: &'static str,
    pub view_count: u64,
    pub answer_count: u64,
    pub vote_count: i64,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuestionSummaryResponse {
    pub fn from_summary(summary: QuestionSummary, ids: &ShortIdCodec) -> Self {
        Self {
            id: ids.encode(summary.id.0),
            title: summary.title,
            url_title: summary.url_title,
            tags: summary.tags.into_iter().map(TagResponse::from).collect(),
            status: status_label(summary.status),
            view_count: summary.view_count,
            answer_count: summary.answer_count,
            vote_count: summary.vote_count,
            user_id: summary.owner.map(|user| ids.encode(user.0)),
            created_at: summary.created_at,
            updated_at: summary.updated_at,
        }
    }
}

/// A user invited to answer a question.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitedUserResponse {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub avatar: Option<String>,
    pub rank: i64,
}

impl InvitedUserResponse {
    pub fn from_user(user: InvitedUser, ids: &ShortIdCodec) -> Self {
        Self {
            id: ids.encode(user.id.0),
            username: user.username,
            display_name: user.display_name,
            avatar: user.avatar,
            rank: user.rank,
        }
    }
}

/// Outcome of an edit.
///
/// `wait_for_review` mirrors the request's `noNeedReview` flag; whether the
/// edit was actually queued is decided by the question service.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionResponse {
    pub url_title: String,
    pub wait_for_review: bool,
}
