//! User record as seen by the forum core.

use serde::{Deserialize, Serialize};

/// Store-assigned user row id.
pub type UserId = i64;

/// Maximum username length in characters, mirrored by a schema CHECK.
pub const USERNAME_MAX_CHARS: usize = 40;

/// Persisted user account.
///
/// `hashed_password` never leaves the core through views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

/// Insert payload for a user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub hashed_password: String,
}

impl NewUser {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        hashed_password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            hashed_password: hashed_password.into(),
        }
    }
}
