//! Typed question filter resolved from raw request parameters.
//!
//! # Invariants
//! - At most one filter applies: username, then score, then keyword.
//! - Only the winning parameter is validated; the others are ignored.
//! - Empty strings count as absent.

use crate::model::user::USERNAME_MAX_CHARS;
use crate::model::validation::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::num::IntErrorKind;

static NON_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid keyword symbol regex"));

/// One resolved question listing predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionFilter {
    /// No filter supplied.
    All,
    /// Questions authored by the user with this exact username.
    ByUsername(String),
    /// Questions whose vote score is at least this value.
    ByScore(i64),
    /// Questions whose title contains any word, case-insensitively.
    ///
    /// An empty word list matches every question.
    ByKeyword(Vec<String>),
}

impl QuestionFilter {
    /// Resolves raw optional parameters into a single validated filter.
    ///
    /// # Errors
    /// - `UsernameTooLong` when the username exceeds 40 characters.
    /// - `ScoreNotInteger` when the score does not parse as an integer.
    ///   Integers outside the `i64` range saturate to its bounds.
    /// - `KeywordHasSymbols` when any keyword word contains punctuation.
    pub fn from_params(
        username: Option<&str>,
        score: Option<&str>,
        keyword: Option<&str>,
    ) -> Result<Self, ValidationError> {
        if let Some(username) = present(username) {
            if username.chars().count() > USERNAME_MAX_CHARS {
                return Err(ValidationError::UsernameTooLong {
                    max: USERNAME_MAX_CHARS,
                });
            }
            return Ok(Self::ByUsername(username.to_string()));
        }

        if let Some(score) = present(score) {
            return parse_min_score(score).map(Self::ByScore);
        }

        if let Some(keyword) = present(keyword) {
            return parse_keywords(keyword).map(Self::ByKeyword);
        }

        Ok(Self::All)
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

fn parse_min_score(score: &str) -> Result<i64, ValidationError> {
    match score.trim().parse::<i64>() {
        Ok(value) => Ok(value),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(ValidationError::ScoreNotInteger(score.to_string())),
        },
    }
}

/// Splits keyword input on whitespace and rejects words with symbols.
///
/// One offending word rejects the whole input.
pub fn parse_keywords(keyword: &str) -> Result<Vec<String>, ValidationError> {
    let words = keyword
        .split_whitespace()
        .map(str::to_string)
        .collect::<Vec<_>>();

    if let Some(word) = words.iter().find(|word| NON_WORD_RE.is_match(word)) {
        return Err(ValidationError::KeywordHasSymbols(word.clone()));
    }

    Ok(words)
}
