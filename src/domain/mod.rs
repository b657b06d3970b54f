//! Domain layer containing question entities and collaborator contracts.
//!
//! The mediation layer does not implement question business rules. This module
//! defines the data it exchanges with the question service and the trait that
//! service implements.
//!
//! # Architecture
//!
//! - [`entities`] - Question projections, commands, queries and caller identity
//! - [`services`] - The [`services::QuestionService`] contract
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Identifiers are internal numeric values here; short tokens exist only in
//!   [`crate::api`]
//! - Implementations of the contracts live in [`crate::infrastructure`] or are
//!   injected by the embedding application

pub mod entities;
pub mod services;
