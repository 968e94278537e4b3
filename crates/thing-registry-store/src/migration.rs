//! Versioned schema for the SQLite ledger.
//!
//! `MIGRATIONS` is applied in order; entry `i` moves the schema to version
//! `i + 1`. Applied versions are recorded in `schema_migrations`.

use rusqlite::{params, Connection, Transaction};

use crate::error::{Result, StoreError};

struct Migration {
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    description: "ledger table",
    sql: "CREATE TABLE ledger (
              key BLOB PRIMARY KEY,
              value BLOB NOT NULL,
              written_at INTEGER NOT NULL
          );",
}];

/// Schema version this build writes.
pub const CURRENT_VERSION: u32 = MIGRATIONS.len() as u32;

/// Bring the ledger schema up to [`CURRENT_VERSION`].
///
/// Pending migrations run in one SQLite transaction. A database written by a
/// newer build is refused rather than opened.
pub fn migrate(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
             version INTEGER PRIMARY KEY,
             applied_at INTEGER NOT NULL
         );",
    )?;

    let found = schema_version(conn)?;
    if found > CURRENT_VERSION {
        return Err(StoreError::Migration(format!(
            "ledger schema v{} is newer than supported v{}",
            found, CURRENT_VERSION
        )));
    }
    if found == CURRENT_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (index, migration) in MIGRATIONS.iter().enumerate().skip(found as usize) {
        apply(&tx, index as u32 + 1, migration)?;
    }
    tx.commit()?;
    Ok(())
}

/// Highest applied schema version, or 0 for a fresh database.
pub fn schema_version(conn: &Connection) -> Result<u32> {
    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

fn apply(tx: &Transaction<'_>, version: u32, migration: &Migration) -> Result<()> {
    tx.execute_batch(migration.sql).map_err(|e| {
        StoreError::Migration(format!("v{} ({}): {}", version, migration.description, e))
    })?;
    tx.execute(
        "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
        params![version, now_millis()],
    )?;
    tracing::debug!(version, description = migration.description, "migrated ledger schema");
    Ok(())
}

/// Wall-clock milliseconds since the Unix epoch, 0 if the clock is before it.
pub(crate) fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
