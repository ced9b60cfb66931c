use rusqlite::Connection;
use trivia_core::db::migrations::latest_version;
use trivia_core::db::{open_db_in_memory, DbError};
use trivia_core::{
    CategoryRepository, NewQuestion, QuestionListQuery, QuestionRepository, RepoError,
    SqliteCategoryRepository, SqliteQuestionRepository,
};

fn new_question(text: &str, category: i64) -> NewQuestion {
    NewQuestion {
        question: text.to_string(),
        answer: "answer".to_string(),
        category,
        difficulty: 3,
    }
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuestionRepository::try_new(&conn).unwrap();

    let id = repo
        .create_question(&new_question("Who painted the Mona Lisa?", 2))
        .unwrap();

    let loaded = repo.get_question(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.question, "Who painted the Mona Lisa?");
    assert_eq!(loaded.category, 2);
    assert_eq!(loaded.difficulty, 3);
}

#[test]
fn store_assigns_increasing_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuestionRepository::try_new(&conn).unwrap();

    let first = repo.create_question(&new_question("one", 1)).unwrap();
    let second = repo.create_question(&new_question("two", 1)).unwrap();
    assert!(second > first);
}

#[test]
fn list_preserves_id_order_and_filters_by_category() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuestionRepository::try_new(&conn).unwrap();
    let a = repo.create_question(&new_question("a", 1)).unwrap();
    let b = repo.create_question(&new_question("b", 4)).unwrap();
    let c = repo.create_question(&new_question("c", 1)).unwrap();

    let all: Vec<_> = repo
        .list_questions(&QuestionListQuery::default())
        .unwrap()
        .into_iter()
        .map(|question| question.id)
        .collect();
    assert_eq!(all, vec![a, b, c]);

    let science: Vec<_> = repo
        .list_questions(&QuestionListQuery::in_category(1))
        .unwrap()
        .into_iter()
        .map(|question| question.id)
        .collect();
    assert_eq!(science, vec![a, c]);
}

#[test]
fn dangling_category_reference_is_accepted() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuestionRepository::try_new(&conn).unwrap();

    let id = repo.create_question(&new_question("orphan", 404)).unwrap();
    assert_eq!(repo.get_question(id).unwrap().unwrap().category, 404);
}

#[test]
fn delete_removes_row_and_reports_missing_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuestionRepository::try_new(&conn).unwrap();
    let id = repo.create_question(&new_question("short lived", 1)).unwrap();

    repo.delete_question(id).unwrap();
    assert!(repo.get_question(id).unwrap().is_none());

    let err = repo.delete_question(id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(missing) if missing == id));
}

#[test]
fn failed_insert_is_rolled_back() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuestionRepository::try_new(&conn).unwrap();
    repo.create_question(&new_question("kept", 1)).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_art AFTER INSERT ON questions
         WHEN NEW.category = 2
         BEGIN
             SELECT RAISE(ABORT, 'art is closed');
         END;",
    )
    .unwrap();

    let err = repo.create_question(&new_question("rejected", 2)).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));

    let remaining = repo.list_questions(&QuestionListQuery::default()).unwrap();
    assert_eq!(remaining.len(), 1);
    assert!(conn.is_autocommit());

    repo.create_question(&new_question("still writable", 1)).unwrap();
}

#[test]
fn category_repository_lists_and_gets() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();

    let categories = repo.list_categories().unwrap();
    assert_eq!(categories.len(), 6);
    assert_eq!(categories[0].kind, "Science");

    assert_eq!(repo.get_category(3).unwrap().unwrap().kind, "Geography");
    assert!(repo.get_category(1000).unwrap().is_none());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteQuestionRepository::try_new(&conn);
    match result {
        Err(RepoError::Db(DbError::SchemaBehind {
            db_version: 0,
            expected,
        })) => assert_eq!(expected, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("uninitialized connection must be rejected"),
    }
}

#[test]
fn repository_rejects_store_missing_its_table() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE categories;").unwrap();

    assert!(SqliteQuestionRepository::try_new(&conn).is_ok());
    assert!(matches!(
        SqliteCategoryRepository::try_new(&conn),
        Err(RepoError::Db(DbError::MissingTable("categories")))
    ));
}
