//! Answer use-case service.
//!
//! # Invariants
//! - Answers can only be attached to existing questions by existing users.
//! - Only the answer's author may edit or delete it.

use crate::model::answer::{validate_answer_details, Answer, AnswerId, NewAnswer};
use crate::model::question::QuestionId;
use crate::model::user::UserId;
use crate::model::view::AnswerView;
use crate::repo::ForumStore;
use crate::service::error::{ServiceError, ServiceResult};
use log::{info, warn};

/// Answer service facade over a forum store.
pub struct AnswerService<S: ForumStore> {
    store: S,
}

impl<S: ForumStore> AnswerService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists answers of an existing question.
    pub fn list_answers(&self, question_id: QuestionId) -> ServiceResult<Vec<AnswerView>> {
        if self.store.get_question(question_id)?.is_none() {
            return Err(ServiceError::QuestionNotFound(question_id));
        }
        let answers = self.store.list_answers_for_question(question_id)?;
        Ok(answers.iter().map(AnswerView::from).collect())
    }

    /// Posts an answer to a question.
    pub fn create_answer(
        &self,
        question_id: QuestionId,
        details: &str,
        user_id: UserId,
    ) -> ServiceResult<AnswerView> {
        let new_answer = NewAnswer::try_new(question_id, details, user_id)?;
        if self.store.get_question(question_id)?.is_none() {
            return Err(ServiceError::QuestionNotFound(question_id));
        }
        if self.store.get_user(user_id)?.is_none() {
            return Err(ServiceError::UserNotFound(user_id));
        }

        let id = self.store.create_answer(&new_answer)?;
        info!(
            "event=answer_create module=service status=ok answer_id={id} question_id={question_id} user_id={user_id}"
        );
        self.read_back(id, "created answer not found in read-back")
    }

    /// Replaces answer details when `user_id` is the author.
    pub fn update_answer(
        &self,
        id: AnswerId,
        details: &str,
        user_id: UserId,
    ) -> ServiceResult<AnswerView> {
        let answer = self.require_answer(id)?;
        validate_answer_details(details)?;
        ensure_answer_author(&answer, user_id)?;

        self.store.update_answer_details(id, details)?;
        info!("event=answer_update module=service status=ok answer_id={id} user_id={user_id}");
        self.read_back(id, "updated answer not found in read-back")
    }

    /// Deletes an answer when `user_id` is the author.
    pub fn delete_answer(&self, id: AnswerId, user_id: UserId) -> ServiceResult<bool> {
        let answer = self.require_answer(id)?;
        ensure_answer_author(&answer, user_id)?;

        self.store.delete_answer(id)?;
        info!("event=answer_delete module=service status=ok answer_id={id} user_id={user_id}");
        Ok(true)
    }

    fn require_answer(&self, id: AnswerId) -> ServiceResult<Answer> {
        self.store
            .get_answer(id)?
            .ok_or(ServiceError::AnswerNotFound(id))
    }

    fn read_back(&self, id: AnswerId, details: &'static str) -> ServiceResult<AnswerView> {
        let answer = self
            .store
            .get_answer(id)?
            .ok_or(ServiceError::InconsistentState(details))?;
        Ok(AnswerView::from(&answer))
    }
}

fn ensure_answer_author(answer: &Answer, user_id: UserId) -> ServiceResult<()> {
    if answer.user_id != user_id {
        warn!(
            "event=answer_authorize module=service status=forbidden answer_id={} user_id={}",
            answer.id, user_id
        );
        return Err(ServiceError::Forbidden {
            resource: "answer",
            id: answer.id,
            user_id,
        });
    }
    Ok(())
}
