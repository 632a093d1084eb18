use qaforum_core::db::open_db_in_memory;
use qaforum_core::{
    NewUser, QuestionFilter, QuestionId, QuestionService, QuestionView, QuestionVoteService,
    ServiceError, SqliteForumRepository, UserId, UserRepository, ValidationError,
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

fn ids(views: &[QuestionView]) -> Vec<QuestionId> {
    views.iter().map(|view| view.id).collect()
}

struct Fixture {
    conn: Connection,
    alice: UserId,
    bob: UserId,
    questions: Vec<QuestionId>,
}

/// Four questions, two by alice and two by bob, with scores 2, 2, 1 and 0.
fn fixture() -> Fixture {
    let conn = open_db_in_memory().unwrap();
    let alice = create_user(&conn, "alice");
    let bob = create_user(&conn, "bob");
    let voters = ["v1", "v2", "v3", "v4"].map(|name| create_user(&conn, name));

    let questions = {
        let service = QuestionService::new(SqliteForumRepository::try_new(&conn).unwrap());
        let votes = QuestionVoteService::new(SqliteForumRepository::try_new(&conn).unwrap());
        let seeds: [(&str, UserId, &[bool]); 4] = [
            ("Rust lifetimes explained", alice, &[true, true]),
            ("Python GIL and threads", alice, &[true, true, true, false]),
            ("snake_case naming in Rust", bob, &[true]),
            ("Learning RUST from scratch", bob, &[]),
        ];
        let mut ids = Vec::new();
        for (title, author, question_votes) in seeds {
            let created = service.create_question(title, "details", author).unwrap();
            for (voter, is_liked) in voters.iter().zip(question_votes.iter()) {
                votes.create_vote(created.id, *voter, *is_liked).unwrap();
            }
            ids.push(created.id);
        }
        ids
    };

    Fixture {
        conn,
        alice,
        bob,
        questions,
    }
}

fn service(conn: &Connection) -> QuestionService<SqliteForumRepository<'_>> {
    QuestionService::new(SqliteForumRepository::try_new(conn).unwrap())
}

#[test]
fn no_filter_equals_get_all() {
    let fx = fixture();
    let service = service(&fx.conn);

    let all = service.get_all_questions().unwrap();
    assert_eq!(ids(&all), fx.questions);
    let filtered = service.filter_questions(None, None, None).unwrap();
    assert_eq!(filtered, all);
}

#[test]
fn username_filter_returns_only_that_authors_questions() {
    let fx = fixture();
    let service = service(&fx.conn);

    let bobs = service.filter_questions(Some("bob"), None, None).unwrap();
    assert_eq!(ids(&bobs), fx.questions[2..].to_vec());
    assert!(bobs.iter().all(|view| view.user_id == fx.bob));

    let alices = service.filter_questions(Some("alice"), None, None).unwrap();
    assert!(alices.iter().all(|view| view.user_id == fx.alice));
}

#[test]
fn unknown_username_yields_empty_list() {
    let fx = fixture();
    let service = service(&fx.conn);

    let none = service
        .filter_questions(Some("nonexistent"), None, None)
        .unwrap();
    assert!(none.is_empty());
}

#[test]
fn overlong_username_is_rejected() {
    let fx = fixture();
    let service = service(&fx.conn);

    let err = service
        .filter_questions(Some("x".repeat(41).as_str()), None, None)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::UsernameTooLong { max: 40 })
    ));
}

#[test]
fn score_filter_keeps_questions_at_or_above_threshold() {
    let fx = fixture();
    let service = service(&fx.conn);

    let top = service.filter_questions(None, Some("2"), None).unwrap();
    assert_eq!(ids(&top), fx.questions[..2].to_vec());
    assert!(top.iter().all(|view| view.votes_score >= 2));

    let everything = service.filter_questions(None, Some("-1"), None).unwrap();
    assert_eq!(everything.len(), 4);

    let nothing = service.filter_questions(None, Some("3"), None).unwrap();
    assert!(nothing.is_empty());
}

#[test]
fn non_integer_score_is_rejected() {
    let fx = fixture();
    let service = service(&fx.conn);

    let err = service.filter_questions(None, Some("abc"), None).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::ScoreNotInteger(_))
    ));
}

#[test]
fn out_of_range_score_saturates_instead_of_failing() {
    let fx = fixture();
    let service = service(&fx.conn);

    let none = service
        .filter_questions(None, Some("99999999999999999999"), None)
        .unwrap();
    assert!(none.is_empty());

    let all = service
        .filter_questions(None, Some("-99999999999999999999"), None)
        .unwrap();
    assert_eq!(ids(&all), fx.questions);
}

#[test]
fn keyword_filter_matches_any_word_case_insensitively() {
    let fx = fixture();
    let service = service(&fx.conn);

    let rust = service.filter_questions(None, None, Some("rust")).unwrap();
    assert_eq!(
        ids(&rust),
        vec![fx.questions[0], fx.questions[2], fx.questions[3]]
    );

    let either = service
        .filter_questions(None, None, Some("gil   naming"))
        .unwrap();
    assert_eq!(ids(&either), vec![fx.questions[1], fx.questions[2]]);

    let none = service.filter_questions(None, None, Some("haskell")).unwrap();
    assert!(none.is_empty());
}

#[test]
fn keyword_filter_folds_non_ascii_case() {
    let conn = open_db_in_memory().unwrap();
    let author = create_user(&conn, "anna");
    let service = service(&conn);
    let created = service
        .create_question("Über café culture", "details", author)
        .unwrap();

    for keyword in ["über", "ÜBER", "CAFÉ", "café", "Über"] {
        let found = service.filter_questions(None, None, Some(keyword)).unwrap();
        assert_eq!(ids(&found), vec![created.id], "keyword `{keyword}` should match");
    }

    let plain = service.filter_questions(None, None, Some("cafe")).unwrap();
    assert!(plain.is_empty());
}

#[test]
fn keyword_with_symbols_is_rejected() {
    let fx = fixture();
    let service = service(&fx.conn);

    for keyword in ["c++", "c c++", "rust!"] {
        let err = service
            .filter_questions(None, None, Some(keyword))
            .unwrap_err();
        assert!(
            matches!(
                err,
                ServiceError::Validation(ValidationError::KeywordHasSymbols(_))
            ),
            "keyword `{keyword}` should be rejected"
        );
    }
}

#[test]
fn only_first_supplied_filter_applies() {
    let fx = fixture();
    let service = service(&fx.conn);

    let by_user = service
        .filter_questions(Some("bob"), Some("abc"), Some("c++"))
        .unwrap();
    assert_eq!(ids(&by_user), fx.questions[2..].to_vec());

    let by_score = service
        .filter_questions(Some(""), Some("2"), Some("snake_case"))
        .unwrap();
    assert_eq!(ids(&by_score), fx.questions[..2].to_vec());
}

#[test]
fn resolved_filter_can_be_passed_directly() {
    let fx = fixture();
    let service = service(&fx.conn);

    let filter = QuestionFilter::ByKeyword(vec!["snake_case".to_string()]);
    let found = service.list_by_filter(&filter).unwrap();
    assert_eq!(ids(&found), vec![fx.questions[2]]);
}
