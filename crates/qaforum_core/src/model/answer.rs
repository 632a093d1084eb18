//! Answer record.

use crate::model::question::QuestionId;
use crate::model::user::UserId;
use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};

/// Store-assigned answer row id.
pub type AnswerId = i64;

/// Persisted answer row. Belongs to exactly one question and one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    pub details: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub user_id: UserId,
    pub question_id: QuestionId,
}

/// Insert payload for an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnswer {
    pub details: String,
    pub user_id: UserId,
    pub question_id: QuestionId,
}

impl NewAnswer {
    pub fn try_new(
        question_id: QuestionId,
        details: impl Into<String>,
        user_id: UserId,
    ) -> Result<Self, ValidationError> {
        let details = details.into();
        validate_answer_details(&details)?;
        Ok(Self {
            details,
            user_id,
            question_id,
        })
    }
}

pub fn validate_answer_details(details: &str) -> Result<(), ValidationError> {
    if details.is_empty() {
        return Err(ValidationError::DetailsRequired);
    }
    Ok(())
}
