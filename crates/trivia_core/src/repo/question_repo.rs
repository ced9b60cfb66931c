//! Question repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/read/delete and predicate queries over `questions`.
//! - Own transaction boundaries for question writes.
//!
//! # Invariants
//! - Listing order is `id ASC` for every query shape.
//! - Each write runs in one `IMMEDIATE` transaction; an error drops the
//!   transaction, which rolls back any partial write.
//! - Ids are minted by SQLite, never by callers.

use crate::model::category::CategoryId;
use crate::model::question::{NewQuestion, Question, QuestionId};
use crate::db::ensure_store_ready;
use crate::repo::{RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, Transaction, TransactionBehavior};

const QUESTION_SELECT_SQL: &str = "SELECT
    id,
    question,
    answer,
    category,
    difficulty
FROM questions";

/// Query options for listing questions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionListQuery {
    /// Exact-match category filter.
    pub category: Option<CategoryId>,
}

impl QuestionListQuery {
    pub fn in_category(category: CategoryId) -> Self {
        Self {
            category: Some(category),
        }
    }
}

/// Repository interface for question persistence.
pub trait QuestionRepository {
    /// Inserts one question and returns the store-assigned id.
    fn create_question(&self, new_question: &NewQuestion) -> RepoResult<QuestionId>;
    /// Gets one question by id.
    fn get_question(&self, id: QuestionId) -> RepoResult<Option<Question>>;
    /// Lists questions matching `query` in store order.
    fn list_questions(&self, query: &QuestionListQuery) -> RepoResult<Vec<Question>>;
    /// Hard-deletes one question. Returns `NotFound` when no row matched.
    fn delete_question(&self, id: QuestionId) -> RepoResult<()>;
}

/// SQLite-backed question repository.
#[derive(Clone, Copy)]
pub struct SqliteQuestionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteQuestionRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_store_ready(conn, "questions")?;
        Ok(Self { conn })
    }
}

impl QuestionRepository for SqliteQuestionRepository<'_> {
    fn create_question(&self, new_question: &NewQuestion) -> RepoResult<QuestionId> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO questions (
                question,
                answer,
                category,
                difficulty
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                new_question.question.as_str(),
                new_question.answer.as_str(),
                new_question.category,
                new_question.difficulty,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(id)
    }

    fn get_question(&self, id: QuestionId) -> RepoResult<Option<Question>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{QUESTION_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_question_row(row)?));
        }

        Ok(None)
    }

    fn list_questions(&self, query: &QuestionListQuery) -> RepoResult<Vec<Question>> {
        let mut sql = format!("{QUESTION_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(category) = query.category {
            sql.push_str(" AND category = ?");
            bind_values.push(Value::Integer(category));
        }

        sql.push_str(" ORDER BY id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut questions = Vec::new();

        while let Some(row) = rows.next()? {
            questions.push(parse_question_row(row)?);
        }

        Ok(questions)
    }

    fn delete_question(&self, id: QuestionId) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let changed = tx.execute("DELETE FROM questions WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        tx.commit()?;

        Ok(())
    }
}

fn parse_question_row(row: &Row<'_>) -> RepoResult<Question> {
    let question = Question {
        id: row.get("id")?,
        question: row.get("question")?,
        answer: row.get("answer")?,
        category: row.get("category")?,
        difficulty: row.get("difficulty")?,
    };

    if question.question.is_empty() || question.answer.is_empty() {
        return Err(RepoError::InvalidData(format!(
            "empty question or answer text for questions.id {}",
            question.id
        )));
    }

    Ok(question)
}
