//! Ledger trait: the abstract interface to the host's key-value state.
//!
//! This trait allows the registry to be storage-agnostic. Implementations
//! include SQLite and in-memory; a host runtime supplies its own.

use bytes::Bytes;

use crate::batch::WriteBatch;
use crate::error::Result;

/// The Ledger trait: synchronous key-value reads and writes.
///
/// The host delivers transactions one at a time, so implementations only need
/// interior locking for safe sharing, not for ordering.
///
/// # Design Notes
///
/// - **Absent is not an error**: `get` returns `Ok(None)` for missing keys.
/// - **Atomic batches**: `commit` must make every staged write visible, or none.
///   The default implementation flushes with one `put` per key in key order
///   and stops at the first failure, leaving the earlier keys written.
pub trait Ledger: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &[u8]) -> Result<Option<Bytes>>;

    /// Write a single value.
    fn put(&self, key: &[u8], value: Bytes) -> Result<()>;

    /// Apply every write in `batch`.
    ///
    /// A ledger whose `put` can fail after an earlier `put` succeeded must
    /// override this with a real transaction, as `SqliteLedger` does.
    /// Otherwise a failed commit can strand alias records with no thing
    /// record behind them.
    fn commit(&self, batch: WriteBatch) -> Result<()> {
        for (key, value) in batch {
            self.put(&key, value)?;
        }
        Ok(())
    }

    /// Check if a key is present.
    fn contains(&self, key: &[u8]) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<L: Ledger + ?Sized> Ledger for std::sync::Arc<L> {
    fn get(&self, key: &[u8]) -> Result<Option<Bytes>> {
        (**self).get(key)
    }

    fn put(&self, key: &[u8], value: Bytes) -> Result<()> {
        (**self).put(key, value)
    }

    fn commit(&self, batch: WriteBatch) -> Result<()> {
        (**self).commit(batch)
    }

    fn contains(&self, key: &[u8]) -> Result<bool> {
        (**self).contains(key)
    }
}

impl<L: Ledger + ?Sized> Ledger for &L {
    fn get(&self, key: &[u8]) -> Result<Option<Bytes>> {
        (**self).get(key)
    }

    fn put(&self, key: &[u8], value: Bytes) -> Result<()> {
        (**self).put(key, value)
    }

    fn commit(&self, batch: WriteBatch) -> Result<()> {
        (**self).commit(batch)
    }

    fn contains(&self, key: &[u8]) -> Result<bool> {
        (**self).contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// A ledger that only implements the required methods.
    #[derive(Default)]
    struct PutOnly {
        values: Mutex<HashMap<Vec<u8>, Bytes>>,
        puts: Mutex<Vec<Vec<u8>>>,
    }

    impl Ledger for PutOnly {
        fn get(&self, key: &[u8]) -> Result<Option<Bytes>> {
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        fn put(&self, key: &[u8], value: Bytes) -> Result<()> {
            self.puts.lock().unwrap().push(key.to_vec());
            self.values.lock().unwrap().insert(key.to_vec(), value);
            Ok(())
        }
    }

    #[test]
    fn test_default_commit_flushes_in_key_order() {
        let ledger = PutOnly::default();
        let mut batch = WriteBatch::new();
        batch.stage(b"b".to_vec(), Bytes::from_static(b"2"));
        batch.stage(b"a".to_vec(), Bytes::from_static(b"1"));

        ledger.commit(batch).unwrap();

        assert_eq!(*ledger.puts.lock().unwrap(), vec![b"a".to_vec(), b"b".to_vec()]);
        assert!(ledger.contains(b"a").unwrap());
        assert!(!ledger.contains(b"c").unwrap());
    }

    #[test]
    fn test_arc_ledger_delegates() {
        let ledger = Arc::new(PutOnly::default());
        ledger.put(b"k", Bytes::from_static(b"v")).unwrap();

        let shared: Arc<PutOnly> = Arc::clone(&ledger);
        assert_eq!(shared.get(b"k").unwrap(), Some(Bytes::from_static(b"v")));
    }
}
