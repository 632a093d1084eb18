//! Question vote record and score derivation.
//!
//! # Invariants
//! - A question's score is recomputed from its votes on every read.
//! - Liked votes weigh +1, disliked votes weigh -1.

use crate::model::question::QuestionId;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};

/// Store-assigned vote row id.
pub type QuestionVoteId = i64;

/// Persisted up/down vote on a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionVote {
    pub id: QuestionVoteId,
    /// `true` for an upvote, `false` for a downvote.
    pub is_liked: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub user_id: UserId,
    pub question_id: QuestionId,
}

impl QuestionVote {
    /// Score contribution of this vote.
    pub fn weight(&self) -> i64 {
        if self.is_liked {
            1
        } else {
            -1
        }
    }
}

/// Insert payload for a question vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewQuestionVote {
    pub is_liked: bool,
    pub user_id: UserId,
    pub question_id: QuestionId,
}

/// Sums vote weights; an empty slice scores 0.
pub fn vote_score(votes: &[QuestionVote]) -> i64 {
    votes.iter().map(QuestionVote::weight).sum()
}

#[cfg(test)]
mod tests {
    use super::{vote_score, QuestionVote};

    fn vote(id: i64, is_liked: bool) -> QuestionVote {
        QuestionVote {
            id,
            is_liked,
            created_at: 0,
            updated_at: 0,
            user_id: id,
            question_id: 1,
        }
    }

    #[test]
    fn no_votes_scores_zero() {
        assert_eq!(vote_score(&[]), 0);
    }

    #[test]
    fn two_likes_and_one_dislike_score_one() {
        let votes = [vote(1, true), vote(2, true), vote(3, false)];
        assert_eq!(vote_score(&votes), 1);
    }

    #[test]
    fn dislikes_can_push_score_negative() {
        let votes = [vote(1, false), vote(2, false)];
        assert_eq!(vote_score(&votes), -2);
    }
}
