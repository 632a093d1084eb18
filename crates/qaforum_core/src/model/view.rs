//! Serialized view models returned by forum services.
//!
//! List-style and detail-style question views differ on purpose: the list
//! view embeds the author record, the detail view carries the username only.

use crate::model::answer::{Answer, AnswerId};
use crate::model::question::{Question, QuestionId};
use crate::model::user::{User, UserId};
use crate::model::vote::{vote_score, QuestionVote, QuestionVoteId};
use serde::Serialize;

/// Public subset of a user embedded in list-style question views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerView {
    pub id: AnswerId,
    pub details: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub user_id: UserId,
    pub question_id: QuestionId,
}

impl From<&Answer> for AnswerView {
    fn from(answer: &Answer) -> Self {
        Self {
            id: answer.id,
            details: answer.details.clone(),
            created_at: answer.created_at,
            updated_at: answer.updated_at,
            user_id: answer.user_id,
            question_id: answer.question_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionVoteView {
    pub id: QuestionVoteId,
    pub is_liked: bool,
    pub user_id: UserId,
    pub question_id: QuestionId,
}

impl From<&QuestionVote> for QuestionVoteView {
    fn from(vote: &QuestionVote) -> Self {
        Self {
            id: vote.id,
            is_liked: vote.is_liked,
            user_id: vote.user_id,
            question_id: vote.question_id,
        }
    }
}

/// List-style question view (also returned by create/update).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub id: QuestionId,
    pub title: String,
    pub details: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub user_id: UserId,
    pub answers_count: usize,
    pub votes_score: i64,
    pub user: UserSummary,
    pub answers: Vec<AnswerView>,
}

impl QuestionView {
    pub fn build(
        question: &Question,
        author: &User,
        answers: &[Answer],
        votes: &[QuestionVote],
    ) -> Self {
        Self {
            id: question.id,
            title: question.title.clone(),
            details: question.details.clone(),
            created_at: question.created_at,
            updated_at: question.updated_at,
            user_id: question.user_id,
            answers_count: answers.len(),
            votes_score: vote_score(votes),
            user: UserSummary::from(author),
            answers: answers.iter().map(AnswerView::from).collect(),
        }
    }
}

/// Single-item question view with the author's username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionDetailView {
    pub id: QuestionId,
    pub title: String,
    pub details: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub author: String,
    pub answers: Vec<AnswerView>,
    pub answers_count: usize,
    pub votes_score: i64,
}

impl QuestionDetailView {
    pub fn build(
        question: &Question,
        author: &User,
        answers: &[Answer],
        votes: &[QuestionVote],
    ) -> Self {
        Self {
            id: question.id,
            title: question.title.clone(),
            details: question.details.clone(),
            created_at: question.created_at,
            updated_at: question.updated_at,
            author: author.username.clone(),
            answers: answers.iter().map(AnswerView::from).collect(),
            answers_count: answers.len(),
            votes_score: vote_score(votes),
        }
    }
}
