//! Answer repository contract and SQLite implementation.

use crate::model::answer::{Answer, AnswerId, NewAnswer};
use crate::model::question::QuestionId;
use crate::repo::{RepoError, RepoResult, SqliteForumRepository};
use rusqlite::{params, OptionalExtension, Row};

const ANSWER_SELECT_SQL: &str = "SELECT
    id,
    details,
    created_at,
    updated_at,
    user_id,
    question_id
FROM answers";

/// Repository interface for answers.
pub trait AnswerRepository {
    fn create_answer(&self, answer: &NewAnswer) -> RepoResult<AnswerId>;
    fn get_answer(&self, id: AnswerId) -> RepoResult<Option<Answer>>;
    /// Lists answers of one question in row-id order.
    fn list_answers_for_question(&self, question_id: QuestionId) -> RepoResult<Vec<Answer>>;
    fn update_answer_details(&self, id: AnswerId, details: &str) -> RepoResult<()>;
    fn delete_answer(&self, id: AnswerId) -> RepoResult<()>;
}

impl AnswerRepository for SqliteForumRepository<'_> {
    fn create_answer(&self, answer: &NewAnswer) -> RepoResult<AnswerId> {
        self.conn().execute(
            "INSERT INTO answers (details, user_id, question_id) VALUES (?1, ?2, ?3);",
            params![answer.details.as_str(), answer.user_id, answer.question_id],
        )?;
        Ok(self.conn().last_insert_rowid())
    }

    fn get_answer(&self, id: AnswerId) -> RepoResult<Option<Answer>> {
        let answer = self
            .conn()
            .query_row(
                &format!("{ANSWER_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_answer_row,
            )
            .optional()?;
        Ok(answer)
    }

    fn list_answers_for_question(&self, question_id: QuestionId) -> RepoResult<Vec<Answer>> {
        let mut stmt = self.conn().prepare(&format!(
            "{ANSWER_SELECT_SQL} WHERE question_id = ?1 ORDER BY id ASC;"
        ))?;
        let answers = stmt
            .query_map([question_id], parse_answer_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(answers)
    }

    fn update_answer_details(&self, id: AnswerId, details: &str) -> RepoResult<()> {
        let changed = self.conn().execute(
            "UPDATE answers
             SET
                details = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![id, details],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "answer",
                id,
            });
        }

        Ok(())
    }

    fn delete_answer(&self, id: AnswerId) -> RepoResult<()> {
        let changed = self
            .conn()
            .execute("DELETE FROM answers WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "answer",
                id,
            });
        }

        Ok(())
    }
}

fn parse_answer_row(row: &Row<'_>) -> rusqlite::Result<Answer> {
    Ok(Answer {
        id: row.get("id")?,
        details: row.get("details")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        user_id: row.get("user_id")?,
        question_id: row.get("question_id")?,
    })
}
