//! Category repository contracts and SQLite implementation.
//!
//! Categories are read-only through this repository; rows come from
//! migrations or external tooling.

use crate::model::category::{Category, CategoryId};
use crate::db::ensure_store_ready;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{Connection, OptionalExtension, Row};

/// Repository interface for category reads.
pub trait CategoryRepository {
    /// Lists all categories in store order (`id ASC`).
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    /// Gets one category by id.
    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>>;
}

/// SQLite-backed category repository.
#[derive(Clone, Copy)]
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_store_ready(conn, "categories")?;
        Ok(Self { conn })
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, type FROM categories ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }
        Ok(categories)
    }

    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        let category = self
            .conn
            .query_row(
                "SELECT id, type FROM categories WHERE id = ?1;",
                [id],
                |row| Ok((row.get::<_, i64>("id")?, row.get::<_, String>("type")?)),
            )
            .optional()?;

        category
            .map(|(id, kind)| validate_category(Category::new(id, kind)))
            .transpose()
    }
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    validate_category(Category::new(row.get("id")?, row.get::<_, String>("type")?))
}

fn validate_category(category: Category) -> RepoResult<Category> {
    if category.kind.is_empty() {
        return Err(RepoError::InvalidData(format!(
            "empty label in categories.type for id {}",
            category.id
        )));
    }
    Ok(category)
}
