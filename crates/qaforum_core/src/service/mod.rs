//! Forum use-case services.
//!
//! # Responsibility
//! - Validate input, enforce authorship, then delegate to repositories.
//! - Assemble serialized views with freshly computed vote scores.
//!
//! # Invariants
//! - Validation and authorization run before any write.
//! - Service layer remains storage-agnostic (generic over `ForumStore`).

pub mod answer_service;
pub mod error;
pub mod question_service;
pub mod vote_service;
