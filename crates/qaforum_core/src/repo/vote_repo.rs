//! Question vote repository contract and SQLite implementation.
//!
//! # Invariants
//! - `is_liked` is stored as 0/1; any other persisted value is rejected.
//! - At most one vote per (user, question), enforced by a unique index.

use crate::model::question::QuestionId;
use crate::model::user::UserId;
use crate::model::vote::{NewQuestionVote, QuestionVote, QuestionVoteId};
use crate::repo::{bool_to_int, int_to_bool, RepoError, RepoResult, SqliteForumRepository};
use rusqlite::{params, Row};

const VOTE_SELECT_SQL: &str = "SELECT
    id,
    is_liked,
    created_at,
    updated_at,
    user_id,
    question_id
FROM question_votes";

/// Repository interface for question votes.
pub trait QuestionVoteRepository {
    fn create_vote(&self, vote: &NewQuestionVote) -> RepoResult<QuestionVoteId>;
    fn get_vote(&self, id: QuestionVoteId) -> RepoResult<Option<QuestionVote>>;
    fn find_vote(&self, user_id: UserId, question_id: QuestionId)
        -> RepoResult<Option<QuestionVote>>;
    /// Lists every vote on one question in row-id order.
    fn list_votes_for_question(&self, question_id: QuestionId) -> RepoResult<Vec<QuestionVote>>;
    fn update_vote(&self, id: QuestionVoteId, is_liked: bool) -> RepoResult<()>;
    fn delete_vote(&self, id: QuestionVoteId) -> RepoResult<()>;
}

impl QuestionVoteRepository for SqliteForumRepository<'_> {
    fn create_vote(&self, vote: &NewQuestionVote) -> RepoResult<QuestionVoteId> {
        self.conn().execute(
            "INSERT INTO question_votes (is_liked, user_id, question_id) VALUES (?1, ?2, ?3);",
            params![bool_to_int(vote.is_liked), vote.user_id, vote.question_id],
        )?;
        Ok(self.conn().last_insert_rowid())
    }

    fn get_vote(&self, id: QuestionVoteId) -> RepoResult<Option<QuestionVote>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{VOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_vote_row(row)?));
        }
        Ok(None)
    }

    fn find_vote(
        &self,
        user_id: UserId,
        question_id: QuestionId,
    ) -> RepoResult<Option<QuestionVote>> {
        let mut stmt = self.conn().prepare(&format!(
            "{VOTE_SELECT_SQL} WHERE user_id = ?1 AND question_id = ?2;"
        ))?;
        let mut rows = stmt.query([user_id, question_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_vote_row(row)?));
        }
        Ok(None)
    }

    fn list_votes_for_question(&self, question_id: QuestionId) -> RepoResult<Vec<QuestionVote>> {
        let mut stmt = self.conn().prepare(&format!(
            "{VOTE_SELECT_SQL} WHERE question_id = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([question_id])?;
        let mut votes = Vec::new();
        while let Some(row) = rows.next()? {
            votes.push(parse_vote_row(row)?);
        }
        Ok(votes)
    }

    fn update_vote(&self, id: QuestionVoteId, is_liked: bool) -> RepoResult<()> {
        let changed = self.conn().execute(
            "UPDATE question_votes
             SET
                is_liked = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![id, bool_to_int(is_liked)],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "vote", id });
        }

        Ok(())
    }

    fn delete_vote(&self, id: QuestionVoteId) -> RepoResult<()> {
        let changed = self
            .conn()
            .execute("DELETE FROM question_votes WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "vote", id });
        }

        Ok(())
    }
}

fn parse_vote_row(row: &Row<'_>) -> RepoResult<QuestionVote> {
    let is_liked = int_to_bool(row.get("is_liked")?, "question_votes.is_liked")?;
    Ok(QuestionVote {
        id: row.get("id")?,
        is_liked,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        user_id: row.get("user_id")?,
        question_id: row.get("question_id")?,
    })
}
