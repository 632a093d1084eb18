//! Question repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and filtered listing over `questions`.
//! - Own the cascading delete of a question and its dependents.
//!
//! # Invariants
//! - `user_id` is never rewritten after insert.
//! - Content updates always refresh `updated_at`.
//! - `delete_question` removes votes, answers and the question in one
//!   transaction.
//! - Title keywords match as literal substrings under Unicode lowercasing.

use crate::model::question::{NewQuestion, Question, QuestionId};
use crate::model::user::UserId;
use crate::repo::{RepoError, RepoResult, SqliteForumRepository};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

const QUESTION_SELECT_SQL: &str = "SELECT
    id,
    title,
    details,
    created_at,
    updated_at,
    user_id
FROM questions";

/// Query options for listing questions.
///
/// Conditions are AND-ed; title keywords are OR-ed among themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionListQuery {
    /// Restrict to questions authored by this user.
    pub author_id: Option<UserId>,
    /// Case-insensitive title substrings; empty means no title condition.
    ///
    /// Matched after loading rows: SQLite `LIKE` folds ASCII case only.
    pub title_keywords: Vec<String>,
}

/// Repository interface for question persistence.
pub trait QuestionRepository {
    fn create_question(&self, question: &NewQuestion) -> RepoResult<QuestionId>;
    fn get_question(&self, id: QuestionId) -> RepoResult<Option<Question>>;
    /// Lists matching questions in row-id order.
    fn list_questions(&self, query: &QuestionListQuery) -> RepoResult<Vec<Question>>;
    /// Replaces title/details and refreshes `updated_at`.
    fn update_question_content(&self, id: QuestionId, title: &str, details: &str)
        -> RepoResult<()>;
    /// Deletes the question together with its answers and votes.
    fn delete_question(&self, id: QuestionId) -> RepoResult<()>;
}

impl QuestionRepository for SqliteForumRepository<'_> {
    fn create_question(&self, question: &NewQuestion) -> RepoResult<QuestionId> {
        self.conn().execute(
            "INSERT INTO questions (title, details, user_id) VALUES (?1, ?2, ?3);",
            params![
                question.title.as_str(),
                question.details.as_str(),
                question.user_id,
            ],
        )?;
        Ok(self.conn().last_insert_rowid())
    }

    fn get_question(&self, id: QuestionId) -> RepoResult<Option<Question>> {
        let question = self
            .conn()
            .query_row(
                &format!("{QUESTION_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_question_row,
            )
            .optional()?;
        Ok(question)
    }

    fn list_questions(&self, query: &QuestionListQuery) -> RepoResult<Vec<Question>> {
        let mut sql = format!("{QUESTION_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(author_id) = query.author_id {
            sql.push_str(" AND user_id = ?");
            bind_values.push(Value::Integer(author_id));
        }

        sql.push_str(" ORDER BY id ASC");

        let mut stmt = self.conn().prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let keywords = lowercase_keywords(&query.title_keywords);
        let mut questions = Vec::new();
        while let Some(row) = rows.next()? {
            let question = parse_question_row(row)?;
            if keywords.is_empty() || title_contains_any(&question.title, &keywords) {
                questions.push(question);
            }
        }

        Ok(questions)
    }

    fn update_question_content(
        &self,
        id: QuestionId,
        title: &str,
        details: &str,
    ) -> RepoResult<()> {
        let changed = self.conn().execute(
            "UPDATE questions
             SET
                title = ?2,
                details = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![id, title, details],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "question",
                id,
            });
        }

        Ok(())
    }

    fn delete_question(&self, id: QuestionId) -> RepoResult<()> {
        // Children first; must not depend on the foreign_keys pragma.
        let tx = self.conn().unchecked_transaction()?;
        tx.execute("DELETE FROM question_votes WHERE question_id = ?1;", [id])?;
        tx.execute("DELETE FROM answers WHERE question_id = ?1;", [id])?;
        let changed = tx.execute("DELETE FROM questions WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "question",
                id,
            });
        }

        tx.commit()?;
        Ok(())
    }
}

fn lowercase_keywords(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .filter(|keyword| !keyword.is_empty())
        .map(|keyword| keyword.to_lowercase())
        .collect()
}

/// Returns whether `title` contains any of the already lowercased keywords.
fn title_contains_any(title: &str, keywords: &[String]) -> bool {
    let title = title.to_lowercase();
    keywords.iter().any(|keyword| title.contains(keyword.as_str()))
}

fn parse_question_row(row: &Row<'_>) -> rusqlite::Result<Question> {
    Ok(Question {
        id: row.get("id")?,
        title: row.get("title")?,
        details: row.get("details")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        user_id: row.get("user_id")?,
    })
}

#[cfg(test)]
mod tests {
    use super::{lowercase_keywords, title_contains_any};

    #[test]
    fn title_match_folds_unicode_case() {
        let keywords = lowercase_keywords(&["ÜBER".to_string(), "Café".to_string()]);
        assert_eq!(keywords, vec!["über", "café"]);
        assert!(title_contains_any("über alles", &keywords));
        assert!(title_contains_any("CAFÉ culture", &keywords));
        assert!(!title_contains_any("cafe culture", &keywords));
    }

    #[test]
    fn title_match_treats_underscore_literally() {
        let keywords = lowercase_keywords(&["snake_case".to_string()]);
        assert!(title_contains_any("Why snake_case?", &keywords));
        assert!(!title_contains_any("snakeXcase", &keywords));
    }
}
