use qaforum_core::db::open_db_in_memory;
use qaforum_core::{
    AnswerService, NewUser, QuestionService, QuestionVoteService, ServiceError,
    SqliteForumRepository, UserId, UserRepository, ValidationError,
};
use rusqlite::Connection;

fn create_user(conn: &Connection, username: &str) -> UserId {
    let repo = SqliteForumRepository::try_new(conn).unwrap();
    repo.create_user(&NewUser::new(
        username,
        format!("{username}@example.com"),
        "hashed",
    ))
    .unwrap()
}

fn repo(conn: &Connection) -> SqliteForumRepository<'_> {
    SqliteForumRepository::try_new(conn).unwrap()
}

#[test]
fn answers_are_listed_in_posting_order() {
    let conn = open_db_in_memory().unwrap();
    let asker = create_user(&conn, "asker");
    let helper = create_user(&conn, "helper");
    let question = QuestionService::new(repo(&conn))
        .create_question("title", "details", asker)
        .unwrap();
    let answers = AnswerService::new(repo(&conn));

    let first = answers.create_answer(question.id, "first", helper).unwrap();
    let second = answers.create_answer(question.id, "second", asker).unwrap();

    let listed = answers.list_answers(question.id).unwrap();
    assert_eq!(listed, vec![first, second]);
}

#[test]
fn answer_creation_validates_before_lookups() {
    let conn = open_db_in_memory().unwrap();
    let answers = AnswerService::new(repo(&conn));

    let err = answers.create_answer(1, "", 1).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::DetailsRequired)
    ));
    let err = answers.create_answer(1, "text", 1).unwrap_err();
    assert!(matches!(err, ServiceError::QuestionNotFound(1)));
}

#[test]
fn only_answer_author_may_edit_or_delete() {
    let conn = open_db_in_memory().unwrap();
    let asker = create_user(&conn, "asker");
    let helper = create_user(&conn, "helper");
    let question = QuestionService::new(repo(&conn))
        .create_question("title", "details", asker)
        .unwrap();
    let answers = AnswerService::new(repo(&conn));
    let answer = answers.create_answer(question.id, "draft", helper).unwrap();

    assert!(matches!(
        answers.update_answer(answer.id, "edited", asker).unwrap_err(),
        ServiceError::Forbidden {
            resource: "answer",
            ..
        }
    ));
    assert!(matches!(
        answers.delete_answer(answer.id, asker).unwrap_err(),
        ServiceError::Forbidden { .. }
    ));

    let edited = answers.update_answer(answer.id, "edited", helper).unwrap();
    assert_eq!(edited.details, "edited");
    assert!(answers.delete_answer(answer.id, helper).unwrap());
    assert!(matches!(
        answers.delete_answer(answer.id, helper).unwrap_err(),
        ServiceError::AnswerNotFound(_)
    ));
}

#[test]
fn voting_round_trip_updates_question_score() {
    let conn = open_db_in_memory().unwrap();
    let asker = create_user(&conn, "asker");
    let voter = create_user(&conn, "voter");
    let question = QuestionService::new(repo(&conn))
        .create_question("title", "details", asker)
        .unwrap();
    let votes = QuestionVoteService::new(repo(&conn));

    let cast = votes.create_vote(question.id, voter, true).unwrap();
    assert_eq!(cast.question.votes_score, 1);
    let vote = cast.vote.expect("vote should be returned after cast");
    assert!(vote.is_liked);

    let flipped = votes.update_vote(vote.id, voter, false).unwrap();
    assert_eq!(flipped.question.votes_score, -1);

    let retracted = votes.delete_vote(vote.id, voter).unwrap();
    assert!(retracted.vote.is_none());
    assert_eq!(retracted.question.votes_score, 0);
}

#[test]
fn second_vote_on_same_question_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let asker = create_user(&conn, "asker");
    let voter = create_user(&conn, "voter");
    let question = QuestionService::new(repo(&conn))
        .create_question("title", "details", asker)
        .unwrap();
    let votes = QuestionVoteService::new(repo(&conn));

    votes.create_vote(question.id, voter, true).unwrap();
    let err = votes.create_vote(question.id, voter, false).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::DuplicateVote)
    ));
}

#[test]
fn only_voter_may_change_or_retract_vote() {
    let conn = open_db_in_memory().unwrap();
    let asker = create_user(&conn, "asker");
    let voter = create_user(&conn, "voter");
    let question = QuestionService::new(repo(&conn))
        .create_question("title", "details", asker)
        .unwrap();
    let votes = QuestionVoteService::new(repo(&conn));
    let vote = votes
        .create_vote(question.id, voter, true)
        .unwrap()
        .vote
        .unwrap();

    assert!(matches!(
        votes.update_vote(vote.id, asker, false).unwrap_err(),
        ServiceError::Forbidden {
            resource: "vote",
            ..
        }
    ));
    assert!(matches!(
        votes.delete_vote(vote.id, asker).unwrap_err(),
        ServiceError::Forbidden { .. }
    ));
    assert!(matches!(
        votes.delete_vote(vote.id + 100, voter).unwrap_err(),
        ServiceError::VoteNotFound(_)
    ));
}

#[test]
fn vote_on_missing_question_or_by_missing_user_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let asker = create_user(&conn, "asker");
    let question = QuestionService::new(repo(&conn))
        .create_question("title", "details", asker)
        .unwrap();
    let votes = QuestionVoteService::new(repo(&conn));

    assert!(matches!(
        votes.create_vote(question.id + 1, asker, true).unwrap_err(),
        ServiceError::QuestionNotFound(_)
    ));
    assert!(matches!(
        votes.create_vote(question.id, 999, true).unwrap_err(),
        ServiceError::UserNotFound(999)
    ));
}
