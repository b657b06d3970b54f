//! Question entity and the commands/queries the question service accepts.

use std::fmt;

use chrono::{DateTime, Utc};

use super::caller::{CallerIdentity, UserId};

/// Internal question identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestionId(pub u64);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A tag attached to a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub slug_name: String,
    pub display_name: String,
}

/// Moderation state of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionStatus {
    Published,
    /// Waiting for a moderator; visible only to its owner.
    PendingReview,
}

/// Full projection of a question as returned by the question service.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionInfo {
    pub id: QuestionId,
    pub title: String,
    pub url_title: String,
    pub content: String,
    pub tags: Vec<Tag>,
    pub status: QuestionStatus,
    pub view_count: u64,
    pub answer_count: u64,
    pub vote_count: i64,
    pub owner: Option<UserId>,
    pub last_editor: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List projection of a question used by paged endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSummary {
    pub id: QuestionId,
    pub title: String,
    pub url_title: String,
    pub tags: Vec<Tag>,
    pub status: QuestionStatus,
    pub view_count: u64,
    pub answer_count: u64,
    pub vote_count: i64,
    pub owner: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&QuestionInfo> for QuestionSummary {
    fn from(info: &QuestionInfo) -> Self {
        Self {
            id: info.id,
            title: info.title.clone(),
            url_title: info.url_title.clone(),
            tags: info.tags.clone(),
            status: info.status,
            view_count: info.view_count,
            answer_count: info.answer_count,
            vote_count: info.vote_count,
            owner: info.owner,
            created_at: info.created_at,
            updated_at: info.updated_at,
        }
    }
}

/// Basic profile of a user invited to answer a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitedUser {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
    pub avatar: Option<String>,
    pub rank: i64,
}

/// Input data for creating a question.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuestion {
    pub title: String,
    pub content: String,
    pub tags: Vec<Tag>,
    pub invite_user_ids: Vec<UserId>,
    /// The caller that becomes the owner; anonymous is passed through as-is.
    pub owner: CallerIdentity,
}

/// Edit of an existing question.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionPatch {
    pub id: QuestionId,
    pub title: String,
    pub content: String,
    pub tags: Vec<Tag>,
    pub edit_summary: Option<String>,
    pub editor: CallerIdentity,
    /// The editor asked to skip moderation. The service decides whether that is honoured.
    pub no_need_review: bool,
}

/// Sort order for the public question list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuestionOrder {
    #[default]
    Newest,
    Active,
    Frequent,
    Score,
    Unanswered,
}

/// Query for the public question list.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionPageQuery {
    pub page: u32,
    pub page_size: u32,
    pub order: QuestionOrder,
    pub tag: Option<String>,
    /// Viewer context for visibility rules; anonymous callers are allowed.
    pub viewer: CallerIdentity,
}

/// Sort order for a user's own question list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PersonalOrder {
    #[default]
    Newest,
    Score,
}

/// Query for the caller's own questions.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonalQuestionPageQuery {
    pub page: u32,
    pub page_size: u32,
    pub order: PersonalOrder,
    pub owner: UserId,
}

/// A window of results plus the size of the full matching set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }
}
