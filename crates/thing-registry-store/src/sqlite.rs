//! SQLite implementation of the Ledger trait.
//!
//! A persistent ledger for running the registry outside a host runtime. It
//! uses rusqlite with bundled SQLite; each batch commits inside a single
//! SQLite transaction, so a failed commit leaves no rows behind.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use bytes::Bytes;
use rusqlite::{params, Connection, OptionalExtension};

use crate::batch::WriteBatch;
use crate::error::{Result, StoreError};
use crate::migration::{self, now_millis};
use crate::traits::Ledger;

/// SQLite-based ledger implementation.
///
/// Thread-safe via internal Mutex.
pub struct SqliteLedger {
    conn: Mutex<Connection>,
}

impl SqliteLedger {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Number of stored keys.
    pub fn len(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM ledger", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("mutex poisoned: {}", e)))
    }
}

const UPSERT: &str = "INSERT INTO ledger (key, value, written_at) VALUES (?1, ?2, ?3)
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, written_at = excluded.written_at";

impl Ledger for SqliteLedger {
    fn get(&self, key: &[u8]) -> Result<Option<Bytes>> {
        let conn = self.lock()?;
        let value: Option<Vec<u8>> = conn
            .query_row(
                "SELECT value FROM ledger WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value.map(Bytes::from))
    }

    fn put(&self, key: &[u8], value: Bytes) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(UPSERT, params![key, value.as_ref(), now_millis()])?;
        Ok(())
    }

    fn commit(&self, batch: WriteBatch) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let now = now_millis();
        {
            let mut stmt = tx.prepare_cached(UPSERT)?;
            for (key, value) in batch.iter() {
                stmt.execute(params![key, value.as_ref(), now])?;
            }
        }
        // Dropping an uncommitted transaction rolls it back.
        tx.commit()?;
        Ok(())
    }

    fn contains(&self, key: &[u8]) -> Result<bool> {
        let conn = self.lock()?;
        let found: Option<i64> = conn
            .query_row("SELECT 1 FROM ledger WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }
}
