use rusqlite::Connection;
use trivia_core::db::migrations::{apply_migrations, latest_version};
use trivia_core::db::{open_db, open_db_in_memory, schema_state, DbError, SchemaState};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "categories");
    assert_table_exists(&conn, "questions");
}

#[test]
fn stock_categories_are_seeded() {
    let conn = open_db_in_memory().unwrap();
    let labels: Vec<String> = conn
        .prepare("SELECT type FROM categories ORDER BY id;")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(
        labels,
        vec!["Science", "Art", "Geography", "History", "Entertainment", "Sports"]
    );
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trivia.sqlite3");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO questions (question, answer, category, difficulty)
             VALUES ('Hottest planet?', 'Venus', 1, 2);",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM questions;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
    let categories: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM categories;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(categories, 6);
}

#[test]
fn migrating_from_version_one_keeps_existing_rows() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(include_str!("../src/db/migrations/0001_init.sql"))
        .unwrap();
    conn.execute_batch(
        "INSERT INTO categories (id, type) VALUES (1, 'Science');
         PRAGMA user_version = 1;",
    )
    .unwrap();

    let applied = apply_migrations(&mut conn).unwrap();

    assert_eq!(applied, vec![2]);
    assert_eq!(schema_version(&conn), latest_version());
    assert!(apply_migrations(&mut conn).unwrap().is_empty());
    let categories: i64 = conn
        .query_row("SELECT COUNT(*) FROM categories;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(categories, 6);
}

#[test]
fn failing_script_is_named_and_rolled_back() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE questions (id INTEGER PRIMARY KEY, body TEXT);")
        .unwrap();

    let err = apply_migrations(&mut conn).unwrap_err();
    match err {
        DbError::Migration { version, name, .. } => {
            assert_eq!(version, 1);
            assert_eq!(name, "init_schema");
        }
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(
        schema_state(&conn).unwrap(),
        SchemaState::Behind { db_version: 0 }
    );
    let categories_created: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE name = 'categories';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(categories_created, 0);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
