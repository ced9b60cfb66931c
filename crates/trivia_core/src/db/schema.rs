//! Schema readiness checks shared by the store's repositories.

use super::migrations::{latest_version, user_version};
use super::{DbError, DbResult};
use rusqlite::Connection;

/// Tables every migrated trivia store carries.
pub const STORE_TABLES: [&str; 2] = ["categories", "questions"];

/// Where a connection's schema stands relative to this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaState {
    Current,
    Behind { db_version: u32 },
    Ahead { db_version: u32 },
}

impl SchemaState {
    fn of(db_version: u32) -> Self {
        let latest = latest_version();
        if db_version == latest {
            Self::Current
        } else if db_version < latest {
            Self::Behind { db_version }
        } else {
            Self::Ahead { db_version }
        }
    }
}

/// Reads the version stamp and compares it with this build's latest.
pub fn schema_state(conn: &Connection) -> DbResult<SchemaState> {
    Ok(SchemaState::of(user_version(conn)?))
}

/// Fails unless `conn` is fully migrated and `table` exists.
///
/// Repositories call this from their constructors so a raw connection is
/// rejected before any query runs.
pub fn ensure_store_ready(conn: &Connection, table: &'static str) -> DbResult<()> {
    match schema_state(conn)? {
        SchemaState::Current => {}
        SchemaState::Behind { db_version } => {
            return Err(DbError::SchemaBehind {
                db_version,
                expected: latest_version(),
            })
        }
        SchemaState::Ahead { db_version } => {
            return Err(DbError::UnsupportedSchemaVersion {
                db_version,
                latest_supported: latest_version(),
            })
        }
    }

    if !table_exists(conn, table)? {
        return Err(DbError::MissingTable(table));
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists)
}
