//! Core domain entities consumed and produced by the question service.
//!
//! Entities are plain data structures without framework dependencies. Internal
//! identifiers are numeric newtypes ([`QuestionId`], [`UserId`]); their external
//! token form exists only at the API boundary.
//!
//! # Entity Types
//!
//! - [`CallerIdentity`] - Authenticated user or anonymous caller
//! - [`QuestionInfo`] / [`QuestionSummary`] - Full and list projections of a question
//! - [`InvitedUser`] - A user invited to answer
//! - [`NewQuestion`], [`QuestionPatch`] - Commands
//! - [`QuestionPageQuery`], [`PersonalQuestionPageQuery`] - List queries
//! - [`Page`] - A window of results with the total count

pub mod caller;
pub mod question;

pub use caller::{CallerIdentity, UserId};
pub use question::{
    InvitedUser, NewQuestion, Page, PersonalOrder, PersonalQuestionPageQuery, QuestionId,
    QuestionInfo, QuestionOrder, QuestionPageQuery, QuestionPatch, QuestionStatus,
    QuestionSummary, Tag,
};
