//! Versioned schema scripts for the trivia store.
//!
//! Script `N` runs only on a store stamped below `N` and stamps it `N`. One
//! call applies every pending script inside a single transaction, so a failed
//! script leaves the file at the version it had before the call.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "init_schema",
        sql: include_str!("0001_init.sql"),
    },
    Migration {
        version: 2,
        name: "seed_categories",
        sql: include_str!("0002_seed_categories.sql"),
    },
];

/// Schema version this build migrates to.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Reads the store's `PRAGMA user_version` stamp.
pub fn user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}

/// Brings the store up to `latest_version()`.
///
/// Returns the versions applied by this call, oldest first; empty when the
/// store was already current.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the stamp is newer than this build.
/// - `Migration` naming the script that failed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<Vec<u32>> {
    let db_version = user_version(conn)?;
    let pending = pending_after(db_version)?;
    if pending.is_empty() {
        return Ok(Vec::new());
    }

    let tx = conn.transaction()?;
    for migration in pending {
        tx.execute_batch(migration.sql)
            .and_then(|()| tx.pragma_update(None, "user_version", migration.version))
            .map_err(|source| DbError::Migration {
                version: migration.version,
                name: migration.name,
                source,
            })?;
    }
    tx.commit()?;

    let applied: Vec<u32> = pending.iter().map(|migration| migration.version).collect();
    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={} applied={}",
        db_version,
        latest_version(),
        applied
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",")
    );
    Ok(applied)
}

fn pending_after(db_version: u32) -> DbResult<&'static [Migration]> {
    let latest = latest_version();
    if db_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported: latest,
        });
    }

    let start = MIGRATIONS.partition_point(|migration| migration.version <= db_version);
    Ok(&MIGRATIONS[start..])
}
