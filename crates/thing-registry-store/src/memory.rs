//! In-memory implementation of the Ledger trait.
//!
//! Same semantics as SQLite but keeps everything in memory with no
//! persistence. Commits take the write lock once, so a batch is applied
//! atomically with respect to every other reader.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use bytes::Bytes;

use crate::batch::WriteBatch;
use crate::error::{Result, StoreError};
use crate::traits::Ledger;

/// In-memory ledger.
///
/// All data is lost when the ledger is dropped. Thread-safe via RwLock.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    entries: RwLock<BTreeMap<Vec<u8>, Bytes>>,
}

impl MemoryLedger {
    /// Create a new empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every entry, for comparing ledger states.
    pub fn snapshot(&self) -> Result<BTreeMap<Vec<u8>, Bytes>> {
        Ok(self.read()?.clone())
    }

    /// Number of stored keys.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    /// All keys starting with `prefix`, in byte order.
    pub fn keys_with_prefix(&self, prefix: &[u8]) -> Result<Vec<Vec<u8>>> {
        let entries = self.read()?;
        Ok(entries
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<Vec<u8>, Bytes>>> {
        self.entries
            .read()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<Vec<u8>, Bytes>>> {
        self.entries
            .write()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {}", e)))
    }
}

impl Ledger for MemoryLedger {
    fn get(&self, key: &[u8]) -> Result<Option<Bytes>> {
        Ok(self.read()?.get(key).cloned())
    }

    fn put(&self, key: &[u8], value: Bytes) -> Result<()> {
        self.write()?.insert(key.to_vec(), value);
        Ok(())
    }

    fn commit(&self, batch: WriteBatch) -> Result<()> {
        let mut entries = self.write()?;
        entries.extend(batch);
        Ok(())
    }

    fn contains(&self, key: &[u8]) -> Result<bool> {
        Ok(self.read()?.contains_key(key))
    }
}
