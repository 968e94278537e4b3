//! Staging buffer for one transaction's writes.

use std::collections::btree_map::{self, BTreeMap};

use bytes::Bytes;

/// Writes accumulated while a transaction is validated.
///
/// Nothing in a batch is visible to the ledger until [`Ledger::commit`]
/// receives it. Keys iterate in byte order, so flushing is deterministic.
///
/// [`Ledger::commit`]: crate::Ledger::commit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    writes: BTreeMap<Vec<u8>, Bytes>,
}

impl WriteBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a write. Returns the value previously staged under `key`, if any.
    pub fn stage(&mut self, key: Vec<u8>, value: Bytes) -> Option<Bytes> {
        self.writes.insert(key, value)
    }

    /// Check if a key is staged.
    pub fn contains(&self, key: &[u8]) -> bool {
        self.writes.contains_key(key)
    }

    /// Get a staged value.
    pub fn get(&self, key: &[u8]) -> Option<&Bytes> {
        self.writes.get(key)
    }

    /// Number of staged writes.
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Staged keys, in byte order.
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.writes.keys().map(Vec::as_slice)
    }

    /// Iterate over staged writes, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &Bytes)> {
        self.writes.iter().map(|(k, v)| (k.as_slice(), v))
    }
}

impl IntoIterator for WriteBatch {
    type Item = (Vec<u8>, Bytes);
    type IntoIter = btree_map::IntoIter<Vec<u8>, Bytes>;

    fn into_iter(self) -> Self::IntoIter {
        self.writes.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_and_lookup() {
        let mut batch = WriteBatch::new();
        assert!(batch.is_empty());

        assert!(batch.stage(b"alias/Foo".to_vec(), Bytes::from_static(b"1")).is_none());
        assert!(batch.contains(b"alias/Foo"));
        assert_eq!(batch.get(b"alias/Foo"), Some(&Bytes::from_static(b"1")));
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn test_restage_returns_previous() {
        let mut batch = WriteBatch::new();
        batch.stage(b"k".to_vec(), Bytes::from_static(b"1"));
        let previous = batch.stage(b"k".to_vec(), Bytes::from_static(b"2"));
        assert_eq!(previous, Some(Bytes::from_static(b"1")));
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn test_keys_sorted() {
        let mut batch = WriteBatch::new();
        batch.stage(b"thing/01".to_vec(), Bytes::new());
        batch.stage(b"alias/Bar".to_vec(), Bytes::new());
        batch.stage(b"alias/Foo".to_vec(), Bytes::new());

        let keys: Vec<&[u8]> = batch.keys().collect();
        assert_eq!(keys, vec![&b"alias/Bar"[..], &b"alias/Foo"[..], &b"thing/01"[..]]);
    }
}
