//! User repository contract and SQLite implementation.
//!
//! Users are owned by the account subsystem; the forum core only creates
//! them for bootstrap/tests and resolves them for views and filters.

use crate::model::user::{NewUser, User, UserId};
use crate::repo::{RepoResult, SqliteForumRepository};
use rusqlite::{params, OptionalExtension, Row};

const USER_SELECT_SQL: &str = "SELECT
    id,
    username,
    email,
    hashed_password,
    created_at,
    updated_at
FROM users";

/// Repository interface for user lookups.
pub trait UserRepository {
    fn create_user(&self, user: &NewUser) -> RepoResult<UserId>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    /// Exact, case-sensitive username match.
    fn find_user_by_username(&self, username: &str) -> RepoResult<Option<User>>;
}

impl UserRepository for SqliteForumRepository<'_> {
    fn create_user(&self, user: &NewUser) -> RepoResult<UserId> {
        self.conn().execute(
            "INSERT INTO users (username, email, hashed_password) VALUES (?1, ?2, ?3);",
            params![
                user.username.as_str(),
                user.email.as_str(),
                user.hashed_password.as_str(),
            ],
        )?;
        Ok(self.conn().last_insert_rowid())
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        let user = self
            .conn()
            .query_row(
                &format!("{USER_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_user_row,
            )
            .optional()?;
        Ok(user)
    }

    fn find_user_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let user = self
            .conn()
            .query_row(
                &format!("{USER_SELECT_SQL} WHERE username = ?1;"),
                [username],
                parse_user_row,
            )
            .optional()?;
        Ok(user)
    }
}

fn parse_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        email: row.get("email")?,
        hashed_password: row.get("hashed_password")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
