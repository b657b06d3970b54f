//! In-memory question service.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::entities::{
    CallerIdentity, InvitedUser, NewQuestion, Page, PersonalOrder, PersonalQuestionPageQuery,
    QuestionId, QuestionInfo, QuestionOrder, QuestionPageQuery, QuestionPatch, QuestionStatus,
    QuestionSummary, Tag, UserId,
};
use crate::domain::services::{QuestionService, ServiceError};
use crate::utils::slug::url_title;

/// Upper bound applied to requested page sizes.
const MAX_PAGE_SIZE: u32 = 100;

/// An edit by a non-owner, waiting for moderation.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRevision {
    pub editor: UserId,
    pub title: String,
    pub content: String,
    pub tags: Vec<Tag>,
    pub edit_summary: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct StoredQuestion {
    info: QuestionInfo,
    invitees: Vec<UserId>,
    revisions: Vec<PendingRevision>,
}

impl StoredQuestion {
    /// Pending questions are visible only to their owner.
    fn visible_to(&self, viewer: CallerIdentity) -> bool {
        self.info.status == QuestionStatus::Published || viewer.is_owner_of(self.info.owner)
    }
}

#[derive(Debug, Default)]
struct Store {
    last_id: u64,
    questions: BTreeMap<QuestionId, StoredQuestion>,
}

impl Store {
    fn next_id(&mut self) -> QuestionId {
        self.last_id += 1;
        QuestionId(self.last_id)
    }
}

/// Question service backed by a process-local map.
///
/// Holds questions in a [`BTreeMap`] behind a [`RwLock`]; page view increments
/// and edits take the write lock, lists take the read lock. Invitees are
/// resolved against a user directory fixed at construction.
///
/// # Rules
///
/// - IDs are allocated sequentially from 1
/// - Questions created by anonymous callers start in review
/// - Fetching counts a view unless the caller owns the question
/// - Owners edit directly; other signed-in users submit revisions for review
pub struct InMemoryQuestionService {
    store: RwLock<Store>,
    users: HashMap<UserId, InvitedUser>,
}

impl InMemoryQuestionService {
    /// Creates an empty store with no known users.
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    /// Creates an empty store whose user directory holds `users`.
    pub fn with_users(users: Vec<InvitedUser>) -> Self {
        Self {
            store: RwLock::new(Store::default()),
            users: users.into_iter().map(|user| (user.id, user)).collect(),
        }
    }

    /// Revisions waiting for review on a question, oldest first.
    pub async fn pending_revisions(&self, id: QuestionId) -> Option<Vec<PendingRevision>> {
        let store = self.store.read().await;
        store.questions.get(&id).map(|q| q.revisions.clone())
    }
}

impl Default for InMemoryQuestionService {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the slice bounds of a page after clamping paging values.
fn window(page: u32, page_size: u32, len: usize) -> (usize, usize) {
    let page = page.max(1) as usize;
    let page_size = page_size.clamp(1, MAX_PAGE_SIZE) as usize;

    let start = (page - 1).saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    (start, end)
}

fn sort_questions(items: &mut [&StoredQuestion], order: QuestionOrder) {
    match order {
        QuestionOrder::Newest | QuestionOrder::Unanswered => {
            items.sort_by_key(|q| Reverse((q.info.created_at, q.info.id)))
        }
        QuestionOrder::Active => items.sort_by_key(|q| Reverse((q.info.updated_at, q.info.id))),
        QuestionOrder::Frequent => {
            items.sort_by_key(|q| Reverse((q.info.view_count, q.info.id)))
        }
        QuestionOrder::Score => items.sort_by_key(|q| Reverse((q.info.vote_count, q.info.id))),
    }
}

fn summarize(items: &[&StoredQuestion], page: u32, page_size: u32) -> Vec<QuestionSummary> {
    let (start, end) = window(page, page_size, items.len());
    items[start..end]
        .iter()
        .map(|q| QuestionSummary::from(&q.info))
        .collect()
}

#[async_trait]
impl QuestionService for InMemoryQuestionService {
    async fn add_question(&self, question: NewQuestion) -> Result<QuestionInfo, ServiceError> {
        let mut invitees = Vec::with_capacity(question.invite_user_ids.len());
        for id in question.invite_user_ids {
            if !self.users.contains_key(&id) {
                return Err(ServiceError::Invalid(format!("unknown invitee {id}")));
            }
            if !invitees.contains(&id) {
                invitees.push(id);
            }
        }

        let status = if question.owner.is_anonymous() {
            QuestionStatus::PendingReview
        } else {
            QuestionStatus::Published
        };

        let mut store = self.store.write().await;
        let id = store.next_id();
        let now = Utc::now();

        let info = QuestionInfo {
            id,
            url_title: url_title(&question.title),
            title: question.title,
            content: question.content,
            tags: question.tags,
            status,
            view_count: 0,
            answer_count: 0,
            vote_count: 0,
            owner: question.owner.user_id(),
            last_editor: None,
            created_at: now,
            updated_at: now,
        };

        store.questions.insert(
            id,
            StoredQuestion {
                info: info.clone(),
                invitees,
                revisions: Vec::new(),
            },
        );

        info!(question_id = %id, owner = %question.owner, ?status, "Question stored");
        Ok(info)
    }

    async fn get_question_and_add_pv(
        &self,
        id: QuestionId,
        viewer: CallerIdentity,
    ) -> Result<QuestionInfo, ServiceError> {
        let mut store = self.store.write().await;
        let question = store
            .questions
            .get_mut(&id)
            .filter(|q| q.visible_to(viewer))
            .ok_or_else(ServiceError::question_not_found)?;

        if !viewer.is_owner_of(question.info.owner) {
            question.info.view_count += 1;
        }

        Ok(question.info.clone())
    }

    async fn invite_user_info(&self, id: QuestionId) -> Result<Vec<InvitedUser>, ServiceError> {
        let store = self.store.read().await;
        let question = store
            .questions
            .get(&id)
            .ok_or_else(ServiceError::question_not_found)?;

        Ok(question
            .invitees
            .iter()
            .filter_map(|user_id| self.users.get(user_id).cloned())
            .collect())
    }

    async fn get_question_page(
        &self,
        query: QuestionPageQuery,
    ) -> Result<(Vec<QuestionSummary>, u64), ServiceError> {
        let store = self.store.read().await;

        let mut matches: Vec<&StoredQuestion> = store
            .questions
            .values()
            .filter(|q| q.visible_to(query.viewer))
            .filter(|q| match &query.tag {
                Some(tag) => q.info.tags.iter().any(|t| &t.slug_name == tag),
                None => true,
            })
            .filter(|q| query.order != QuestionOrder::Unanswered || q.info.answer_count == 0)
            .collect();

        sort_questions(&mut matches, query.order);

        let total = matches.len() as u64;
        let items = summarize(&matches, query.page, query.page_size);

        debug!(total, returned = items.len(), order = ?query.order, "Question page served");
        Ok((items, total))
    }

    async fn update_question(&self, patch: QuestionPatch) -> Result<QuestionInfo, ServiceError> {
        let Some(editor) = patch.editor.user_id() else {
            return Err(ServiceError::PermissionDenied(
                "anonymous callers cannot edit questions".to_string(),
            ));
        };

        let mut store = self.store.write().await;
        let question = store
            .questions
            .get_mut(&patch.id)
            .filter(|q| q.visible_to(patch.editor))
            .ok_or_else(ServiceError::question_not_found)?;

        if patch.editor.is_owner_of(question.info.owner) {
            question.info.url_title = url_title(&patch.title);
            question.info.title = patch.title;
            question.info.content = patch.content;
            question.info.tags = patch.tags;
            question.info.last_editor = Some(editor);
            question.info.updated_at = Utc::now();

            info!(question_id = %patch.id, %editor, "Question edited by owner");
        } else {
            question.revisions.push(PendingRevision {
                editor,
                title: patch.title,
                content: patch.content,
                tags: patch.tags,
                edit_summary: patch.edit_summary,
                submitted_at: Utc::now(),
            });

            info!(
                question_id = %patch.id,
                %editor,
                pending = question.revisions.len(),
                "Question revision queued for review"
            );
        }

        Ok(question.info.clone())
    }

    async fn personal_question_page(
        &self,
        query: PersonalQuestionPageQuery,
    ) -> Result<Page<QuestionSummary>, ServiceError> {
        let store = self.store.read().await;

        let mut matches: Vec<&StoredQuestion> = store
            .questions
            .values()
            .filter(|q| q.info.owner == Some(query.owner))
            .collect();

        let order = match query.order {
            PersonalOrder::Newest => QuestionOrder::Newest,
            PersonalOrder::Score => QuestionOrder::Score,
        };
        sort_questions(&mut matches, order);

        let total = matches.len() as u64;
        Ok(Page::new(
            summarize(&matches, query.page, query.page_size),
            total,
        ))
    }
}
