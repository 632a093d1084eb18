//! Service-level error taxonomy.

use crate::model::answer::AnswerId;
use crate::model::question::QuestionId;
use crate::model::user::UserId;
use crate::model::validation::ValidationError;
use crate::model::vote::QuestionVoteId;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Coarse error class used by callers to pick a protocol response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Forbidden,
    Internal,
}

impl ErrorKind {
    /// HTTP-equivalent status code for this class.
    pub fn status_code(self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Internal => 500,
        }
    }
}

/// Errors from forum service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Malformed or missing input.
    Validation(ValidationError),
    QuestionNotFound(QuestionId),
    UserNotFound(UserId),
    AnswerNotFound(AnswerId),
    VoteNotFound(QuestionVoteId),
    /// Requesting user is not the owner of the target record.
    Forbidden {
        resource: &'static str,
        id: i64,
        user_id: UserId,
    },
    /// Repository-level failure.
    Repo(RepoError),
    /// Write succeeded but read-back disagrees.
    InconsistentState(&'static str),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::QuestionNotFound(_)
            | Self::UserNotFound(_)
            | Self::AnswerNotFound(_)
            | Self::VoteNotFound(_) => ErrorKind::NotFound,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::Repo(_) | Self::InconsistentState(_) => ErrorKind::Internal,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::QuestionNotFound(id) => write!(f, "question not found: {id}"),
            Self::UserNotFound(id) => write!(f, "user not found: {id}"),
            Self::AnswerNotFound(id) => write!(f, "answer not found: {id}"),
            Self::VoteNotFound(id) => write!(f, "vote not found: {id}"),
            Self::Forbidden {
                resource,
                id,
                user_id,
            } => write!(f, "user {user_id} is not the author of {resource} {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent forum state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                entity: "question",
                id,
            } => Self::QuestionNotFound(id),
            RepoError::NotFound {
                entity: "answer",
                id,
            } => Self::AnswerNotFound(id),
            RepoError::NotFound { entity: "vote", id } => Self::VoteNotFound(id),
            RepoError::NotFound { entity: "user", id } => Self::UserNotFound(id),
            other => Self::Repo(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, ServiceError};
    use crate::model::validation::ValidationError;
    use crate::repo::RepoError;

    #[test]
    fn repo_not_found_maps_to_entity_variant() {
        let err = ServiceError::from(RepoError::NotFound {
            entity: "question",
            id: 7,
        });
        assert!(matches!(err, ServiceError::QuestionNotFound(7)));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn kinds_map_to_status_codes() {
        let validation = ServiceError::from(ValidationError::TitleRequired);
        assert_eq!(validation.kind().status_code(), 400);

        let forbidden = ServiceError::Forbidden {
            resource: "question",
            id: 1,
            user_id: 2,
        };
        assert_eq!(forbidden.kind().status_code(), 403);
        assert_eq!(
            ServiceError::InconsistentState("x").kind().status_code(),
            500
        );
    }
}
