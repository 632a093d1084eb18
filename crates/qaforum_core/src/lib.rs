//! Core data-access and business rules for the Q&A forum.
//! This crate is the single source of truth for forum invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{
    default_log_level, init_logging, init_logging_with, logging_status, LogConfig, LoggingError,
};
pub use model::answer::{Answer, AnswerId, NewAnswer};
pub use model::filter::QuestionFilter;
pub use model::question::{NewQuestion, Question, QuestionId};
pub use model::user::{NewUser, User, UserId};
pub use model::validation::{parse_user_id, ValidationError};
pub use model::view::{
    AnswerView, QuestionDetailView, QuestionView, QuestionVoteView, UserSummary,
};
pub use model::vote::{vote_score, NewQuestionVote, QuestionVote, QuestionVoteId};
pub use repo::answer_repo::AnswerRepository;
pub use repo::question_repo::{QuestionListQuery, QuestionRepository};
pub use repo::user_repo::UserRepository;
pub use repo::vote_repo::QuestionVoteRepository;
pub use repo::{ForumStore, RepoError, RepoResult, SqliteForumRepository};
pub use service::answer_service::AnswerService;
pub use service::error::{ErrorKind, ServiceError, ServiceResult};
pub use service::question_service::QuestionService;
pub use service::vote_service::{QuestionVoteService, VoteOutcome};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
