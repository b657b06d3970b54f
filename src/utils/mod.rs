//! Utility functions shared across layers.
//!
//! - [`short_id`] - Reversible internal ID ⇄ short token transform
//! - [`slug`] - URL title generation from question titles

pub mod short_id;
pub mod slug;
