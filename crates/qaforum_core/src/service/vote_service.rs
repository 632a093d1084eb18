//! Question vote use-case service.
//!
//! Backs the up/down voting widget: cast, flip or retract a vote. Every
//! operation returns the refreshed question so callers can redraw its score.
//!
//! # Invariants
//! - One vote per (user, question); a second cast is a validation error.
//! - Only the voter may change or retract a vote.

use crate::model::question::QuestionId;
use crate::model::user::UserId;
use crate::model::validation::ValidationError;
use crate::model::view::{QuestionVoteView, QuestionView};
use crate::model::vote::{NewQuestionVote, QuestionVote, QuestionVoteId};
use crate::repo::{ForumStore, RepoError};
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::question_service::load_question_view;
use log::{info, warn};
use serde::Serialize;

/// Result of a vote operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteOutcome {
    /// The vote after the operation; `None` once retracted.
    pub vote: Option<QuestionVoteView>,
    /// The voted question with its recomputed score.
    pub question: QuestionView,
}

/// Vote service facade over a forum store.
pub struct QuestionVoteService<S: ForumStore> {
    store: S,
}

impl<S: ForumStore> QuestionVoteService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Casts a new up (`is_liked = true`) or down vote.
    pub fn create_vote(
        &self,
        question_id: QuestionId,
        user_id: UserId,
        is_liked: bool,
    ) -> ServiceResult<VoteOutcome> {
        if self.store.get_question(question_id)?.is_none() {
            return Err(ServiceError::QuestionNotFound(question_id));
        }
        if self.store.get_user(user_id)?.is_none() {
            return Err(ServiceError::UserNotFound(user_id));
        }
        if self.store.find_vote(user_id, question_id)?.is_some() {
            return Err(ValidationError::DuplicateVote.into());
        }

        let vote = NewQuestionVote {
            is_liked,
            user_id,
            question_id,
        };
        let id = match self.store.create_vote(&vote) {
            Ok(id) => id,
            Err(RepoError::Conflict(_)) => return Err(ValidationError::DuplicateVote.into()),
            Err(err) => return Err(err.into()),
        };
        info!(
            "event=vote_create module=service status=ok vote_id={id} question_id={question_id} user_id={user_id}"
        );
        self.outcome(id, question_id)
    }

    /// Flips an existing vote.
    pub fn update_vote(
        &self,
        id: QuestionVoteId,
        user_id: UserId,
        is_liked: bool,
    ) -> ServiceResult<VoteOutcome> {
        let vote = self.require_vote(id)?;
        ensure_voter(&vote, user_id)?;

        self.store.update_vote(id, is_liked)?;
        info!("event=vote_update module=service status=ok vote_id={id} user_id={user_id}");
        self.outcome(id, vote.question_id)
    }

    /// Retracts an existing vote.
    pub fn delete_vote(&self, id: QuestionVoteId, user_id: UserId) -> ServiceResult<VoteOutcome> {
        let vote = self.require_vote(id)?;
        ensure_voter(&vote, user_id)?;

        self.store.delete_vote(id)?;
        info!("event=vote_delete module=service status=ok vote_id={id} user_id={user_id}");
        Ok(VoteOutcome {
            vote: None,
            question: self.question_view(vote.question_id)?,
        })
    }

    fn require_vote(&self, id: QuestionVoteId) -> ServiceResult<QuestionVote> {
        self.store
            .get_vote(id)?
            .ok_or(ServiceError::VoteNotFound(id))
    }

    fn outcome(&self, id: QuestionVoteId, question_id: QuestionId) -> ServiceResult<VoteOutcome> {
        let vote = self
            .store
            .get_vote(id)?
            .ok_or(ServiceError::InconsistentState("vote not found in read-back"))?;
        Ok(VoteOutcome {
            vote: Some(QuestionVoteView::from(&vote)),
            question: self.question_view(question_id)?,
        })
    }

    fn question_view(&self, question_id: QuestionId) -> ServiceResult<QuestionView> {
        let question = self
            .store
            .get_question(question_id)?
            .ok_or(ServiceError::InconsistentState(
                "voted question not found in read-back",
            ))?;
        load_question_view(&self.store, &question)
    }
}

fn ensure_voter(vote: &QuestionVote, user_id: UserId) -> ServiceResult<()> {
    if vote.user_id != user_id {
        warn!(
            "event=vote_authorize module=service status=forbidden vote_id={} user_id={}",
            vote.id, user_id
        );
        return Err(ServiceError::Forbidden {
            resource: "vote",
            id: vote.id,
            user_id,
        });
    }
    Ok(())
}
