//! Input validation errors shared by forum write and filter paths.

use crate::model::user::UserId;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Malformed or missing caller input.
///
/// Always raised before any mutating side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    TitleRequired,
    TitleTooLong { max: usize, actual: usize },
    DetailsRequired,
    UsernameTooLong { max: usize },
    ScoreNotInteger(String),
    /// Keyword word containing characters other than letters, digits or `_`.
    KeywordHasSymbols(String),
    InvalidUserId(String),
    /// User already holds a vote on this question.
    DuplicateVote,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TitleRequired => write!(f, "title is required"),
            Self::TitleTooLong { max, actual } => {
                write!(f, "title cannot exceed {max} characters (got {actual})")
            }
            Self::DetailsRequired => write!(f, "details are required"),
            Self::UsernameTooLong { max } => {
                write!(f, "author name cannot exceed {max} characters")
            }
            Self::ScoreNotInteger(value) => write!(f, "score must be an integer, got `{value}`"),
            Self::KeywordHasSymbols(word) => {
                write!(f, "keywords should not contain special symbols: `{word}`")
            }
            Self::InvalidUserId(value) => write!(f, "user id must be an integer, got `{value}`"),
            Self::DuplicateVote => write!(f, "user has already voted on this question"),
        }
    }
}

impl Error for ValidationError {}

/// Parses an untyped user id (for example from a session or CLI argument).
///
/// Surrounding whitespace is ignored.
pub fn parse_user_id(raw: &str) -> Result<UserId, ValidationError> {
    raw.trim()
        .parse::<UserId>()
        .map_err(|_| ValidationError::InvalidUserId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{parse_user_id, ValidationError};

    #[test]
    fn parse_user_id_accepts_padded_integers() {
        assert_eq!(parse_user_id(" 42 ").unwrap(), 42);
    }

    #[test]
    fn parse_user_id_rejects_non_numeric_input() {
        assert_eq!(
            parse_user_id("abc").unwrap_err(),
            ValidationError::InvalidUserId("abc".to_string())
        );
    }
}
