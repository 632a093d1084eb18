//! Forum domain model.
//!
//! # Responsibility
//! - Define the records persisted for users, questions, answers and votes.
//! - Define input validation rules and the serialized view shapes.
//!
//! # Invariants
//! - Every record is identified by a store-assigned integer row id.
//! - Vote scores are derived from vote records and never persisted.

pub mod answer;
pub mod filter;
pub mod question;
pub mod user;
pub mod validation;
pub mod view;
pub mod vote;
