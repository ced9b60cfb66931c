//! Trivia store bootstrap, schema versioning and readiness checks.
//!
//! # Responsibility
//! - Open connections to the two-table store (`categories`, `questions`).
//! - Bring the schema to this build's version through `migrations`.
//! - Tell repositories whether a connection is safe to query (`schema`).
//!
//! # Invariants
//! - `PRAGMA user_version` is the only record of the applied schema version.
//! - A file stamped by a newer build is never written to.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;
mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::{ensure_store_ready, schema_state, SchemaState, STORE_TABLES};

pub type DbResult<T> = Result<T, DbError>;

/// Failure opening, migrating or checking the trivia store.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// One migration script failed; the whole run was rolled back.
    Migration {
        version: u32,
        name: &'static str,
        source: rusqlite::Error,
    },
    /// The file was stamped by a newer build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// The connection has not been migrated up to this build's version.
    SchemaBehind { db_version: u32, expected: u32 },
    /// A store table is absent although the version stamp is current.
    MissingTable(&'static str),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::Migration {
                version,
                name,
                source,
            } => write!(f, "trivia migration {version} ({name}) failed: {source}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "trivia store is at schema {db_version}, this build knows up to {latest_supported}"
            ),
            Self::SchemaBehind {
                db_version,
                expected,
            } => write!(
                f,
                "trivia store is at schema {db_version}, expected {expected}; open it with open_db first"
            ),
            Self::MissingTable(table) => write!(f, "trivia store has no `{table}` table"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::UnsupportedSchemaVersion { .. }
            | Self::SchemaBehind { .. }
            | Self::MissingTable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
