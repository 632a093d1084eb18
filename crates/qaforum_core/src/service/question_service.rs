//! Question use-case service.
//!
//! # Responsibility
//! - Question CRUD with authorship checks.
//! - Filtered listing by author username, minimum score or title keywords.
//! - Assemble list-style and detail-style views.
//!
//! # Invariants
//! - `update_question`/`delete_question` check existence before ownership.
//! - An unknown username filters to an empty list, never an error.
//! - `votes_score` is recomputed from stored votes on every call.

use crate::model::filter::QuestionFilter;
use crate::model::question::{validate_question_content, NewQuestion, Question, QuestionId};
use crate::model::user::{User, UserId};
use crate::model::view::{QuestionDetailView, QuestionView};
use crate::repo::question_repo::QuestionListQuery;
use crate::repo::ForumStore;
use crate::service::error::{ServiceError, ServiceResult};
use log::{info, warn};

/// Question service facade over a forum store.
pub struct QuestionService<S: ForumStore> {
    store: S,
}

impl<S: ForumStore> QuestionService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns list-style views of every question.
    pub fn get_all_questions(&self) -> ServiceResult<Vec<QuestionView>> {
        let questions = self.store.list_questions(&QuestionListQuery::default())?;
        self.list_views(&questions)
    }

    /// Lists questions using raw optional request parameters.
    ///
    /// Only the first present parameter (username, score, keyword) is
    /// applied; with none present this equals [`Self::get_all_questions`].
    pub fn filter_questions(
        &self,
        username: Option<&str>,
        score: Option<&str>,
        keyword: Option<&str>,
    ) -> ServiceResult<Vec<QuestionView>> {
        let filter = QuestionFilter::from_params(username, score, keyword)?;
        self.list_by_filter(&filter)
    }

    /// Lists questions matching an already resolved filter.
    pub fn list_by_filter(&self, filter: &QuestionFilter) -> ServiceResult<Vec<QuestionView>> {
        match filter {
            QuestionFilter::All => self.get_all_questions(),
            QuestionFilter::ByUsername(username) => {
                let Some(user) = self.store.find_user_by_username(username)? else {
                    return Ok(Vec::new());
                };
                let query = QuestionListQuery {
                    author_id: Some(user.id),
                    ..QuestionListQuery::default()
                };
                let questions = self.store.list_questions(&query)?;
                self.list_views(&questions)
            }
            QuestionFilter::ByScore(min_score) => {
                // Full scan: the score is derived, so there is no column to index.
                let mut views = self.get_all_questions()?;
                views.retain(|view| view.votes_score >= *min_score);
                Ok(views)
            }
            QuestionFilter::ByKeyword(words) => {
                let query = QuestionListQuery {
                    title_keywords: words.clone(),
                    ..QuestionListQuery::default()
                };
                let questions = self.store.list_questions(&query)?;
                self.list_views(&questions)
            }
        }
    }

    /// Returns the detail view of one question.
    pub fn get_question_by_id(&self, id: QuestionId) -> ServiceResult<QuestionDetailView> {
        let question = self.require_question(id)?;
        let author = require_author(&self.store, &question)?;
        let answers = self.store.list_answers_for_question(question.id)?;
        let votes = self.store.list_votes_for_question(question.id)?;
        Ok(QuestionDetailView::build(&question, &author, &answers, &votes))
    }

    /// Creates a question authored by `user_id`.
    ///
    /// # Errors
    /// - `Validation` when title or details is empty or the title is too long.
    /// - `UserNotFound` when the author does not exist.
    pub fn create_question(
        &self,
        title: &str,
        details: &str,
        user_id: UserId,
    ) -> ServiceResult<QuestionView> {
        let new_question = NewQuestion::try_new(title, details, user_id)?;
        if self.store.get_user(user_id)?.is_none() {
            return Err(ServiceError::UserNotFound(user_id));
        }

        let id = self.store.create_question(&new_question)?;
        info!("event=question_create module=service status=ok question_id={id} user_id={user_id}");

        let question = self
            .store
            .get_question(id)?
            .ok_or(ServiceError::InconsistentState(
                "created question not found in read-back",
            ))?;
        load_question_view(&self.store, &question)
    }

    /// Replaces title and details when `user_id` is the author.
    ///
    /// Checks run in order: existence, input, ownership.
    pub fn update_question(
        &self,
        id: QuestionId,
        title: &str,
        details: &str,
        user_id: UserId,
    ) -> ServiceResult<QuestionView> {
        let question = self.require_question(id)?;
        validate_question_content(title, details)?;
        ensure_author(&question, user_id)?;

        self.store.update_question_content(id, title, details)?;
        info!("event=question_update module=service status=ok question_id={id} user_id={user_id}");

        let question = self
            .store
            .get_question(id)?
            .ok_or(ServiceError::InconsistentState(
                "updated question not found in read-back",
            ))?;
        load_question_view(&self.store, &question)
    }

    /// Deletes a question with its answers and votes when `user_id` is the
    /// author.
    pub fn delete_question(&self, id: QuestionId, user_id: UserId) -> ServiceResult<bool> {
        let question = self.require_question(id)?;
        ensure_author(&question, user_id)?;

        self.store.delete_question(id)?;
        info!("event=question_delete module=service status=ok question_id={id} user_id={user_id}");
        Ok(true)
    }

    fn list_views(&self, questions: &[Question]) -> ServiceResult<Vec<QuestionView>> {
        questions
            .iter()
            .map(|question| load_question_view(&self.store, question))
            .collect()
    }

    fn require_question(&self, id: QuestionId) -> ServiceResult<Question> {
        self.store
            .get_question(id)?
            .ok_or(ServiceError::QuestionNotFound(id))
    }
}

/// Builds the list-style view of one question from fresh relation reads.
pub(crate) fn load_question_view<S: ForumStore>(
    store: &S,
    question: &Question,
) -> ServiceResult<QuestionView> {
    let author = require_author(store, question)?;
    let answers = store.list_answers_for_question(question.id)?;
    let votes = store.list_votes_for_question(question.id)?;
    Ok(QuestionView::build(question, &author, &answers, &votes))
}

fn require_author<S: ForumStore>(store: &S, question: &Question) -> ServiceResult<User> {
    store
        .get_user(question.user_id)?
        .ok_or(ServiceError::InconsistentState(
            "question author missing from users",
        ))
}

fn ensure_author(question: &Question, user_id: UserId) -> ServiceResult<()> {
    if question.user_id != user_id {
        warn!(
            "event=question_authorize module=service status=forbidden question_id={} user_id={}",
            question.id, user_id
        );
        return Err(ServiceError::Forbidden {
            resource: "question",
            id: question.id,
            user_id,
        });
    }
    Ok(())
}
