//! Question record and write-path validation.
//!
//! # Invariants
//! - `user_id` is fixed at creation; updates only touch title and details.
//! - `title` is non-empty and at most `TITLE_MAX_CHARS` characters.
//! - `details` is non-empty.

use crate::model::user::UserId;
use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};

/// Store-assigned question row id.
pub type QuestionId = i64;

/// Maximum title length in characters, mirrored by a schema CHECK.
pub const TITLE_MAX_CHARS: usize = 255;

/// Persisted question row without its relations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    pub details: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds, refreshed on every content update.
    ///
    /// The store stamps whole seconds, so an update within the same second
    /// as the insert leaves this equal to `created_at`.
    pub updated_at: i64,
    /// Author of the question.
    pub user_id: UserId,
}

/// Insert payload for a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub title: String,
    pub details: String,
    pub user_id: UserId,
}

impl NewQuestion {
    /// Builds a validated insert payload.
    pub fn try_new(
        title: impl Into<String>,
        details: impl Into<String>,
        user_id: UserId,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        let details = details.into();
        validate_question_content(&title, &details)?;
        Ok(Self {
            title,
            details,
            user_id,
        })
    }
}

/// Checks title/details before any create or update.
///
/// Title is checked first so callers get one stable error per input.
pub fn validate_question_content(title: &str, details: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    if details.is_empty() {
        return Err(ValidationError::DetailsRequired);
    }
    let title_chars = title.chars().count();
    if title_chars > TITLE_MAX_CHARS {
        return Err(ValidationError::TitleTooLong {
            max: TITLE_MAX_CHARS,
            actual: title_chars,
        });
    }
    Ok(())
}
