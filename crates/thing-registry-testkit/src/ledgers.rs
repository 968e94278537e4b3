//! Instrumented ledgers for asserting how the registry touches storage.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use bytes::Bytes;
use thing_registry_store::{Ledger, MemoryLedger, Result, StoreError, WriteBatch};

/// One call the registry made against a ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerOp {
    Get(Vec<u8>),
    Put(Vec<u8>),
    /// Keys of a committed batch, in flush order.
    Commit(Vec<Vec<u8>>),
}

impl LedgerOp {
    pub fn is_write(&self) -> bool {
        !matches!(self, LedgerOp::Get(_))
    }
}

/// Wraps a ledger and records every call in order.
#[derive(Debug, Default)]
pub struct RecordingLedger<L = MemoryLedger> {
    inner: L,
    ops: Mutex<Vec<LedgerOp>>,
}

impl<L: Ledger> RecordingLedger<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            ops: Mutex::new(Vec::new()),
        }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Calls recorded so far.
    pub fn ops(&self) -> Vec<LedgerOp> {
        self.ops.lock().map(|ops| ops.clone()).unwrap_or_default()
    }

    /// Forget recorded calls.
    pub fn clear(&self) {
        if let Ok(mut ops) = self.ops.lock() {
            ops.clear();
        }
    }

    /// Index of the first write, if any write happened.
    pub fn first_write(&self) -> Option<usize> {
        self.ops().iter().position(LedgerOp::is_write)
    }

    fn record(&self, op: LedgerOp) -> Result<()> {
        self.ops
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {}", e)))?
            .push(op);
        Ok(())
    }
}

impl<L: Ledger> Ledger for RecordingLedger<L> {
    fn get(&self, key: &[u8]) -> Result<Option<Bytes>> {
        self.record(LedgerOp::Get(key.to_vec()))?;
        self.inner.get(key)
    }

    fn put(&self, key: &[u8], value: Bytes) -> Result<()> {
        self.record(LedgerOp::Put(key.to_vec()))?;
        self.inner.put(key, value)
    }

    fn commit(&self, batch: WriteBatch) -> Result<()> {
        self.record(LedgerOp::Commit(batch.keys().map(<[u8]>::to_vec).collect()))?;
        self.inner.commit(batch)
    }
}

const NEVER: usize = usize::MAX;

/// Wraps a ledger and fails reads or writes on demand.
///
/// Commits go through the default one-`put`-per-key flush, so
/// [`fail_puts_after`](Self::fail_puts_after) can simulate a host ledger
/// that fails part-way through a batch.
#[derive(Debug)]
pub struct FaultyLedger<L = MemoryLedger> {
    inner: L,
    fail_reads: AtomicBool,
    puts_remaining: AtomicUsize,
}

impl<L: Ledger + Default> Default for FaultyLedger<L> {
    fn default() -> Self {
        Self::new(L::default())
    }
}

impl<L: Ledger> FaultyLedger<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            fail_reads: AtomicBool::new(false),
            puts_remaining: AtomicUsize::new(NEVER),
        }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Make every read fail until healed.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Let `n` more puts succeed, then fail every put after them.
    pub fn fail_puts_after(&self, n: usize) {
        self.puts_remaining.store(n, Ordering::SeqCst);
    }

    /// Stop injecting failures.
    pub fn heal(&self) {
        self.fail_reads(false);
        self.puts_remaining.store(NEVER, Ordering::SeqCst);
    }
}

impl<L: Ledger> Ledger for FaultyLedger<L> {
    fn get(&self, key: &[u8]) -> Result<Option<Bytes>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected read failure".into()));
        }
        self.inner.get(key)
    }

    fn put(&self, key: &[u8], value: Bytes) -> Result<()> {
        let allowed = self
            .puts_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| match n {
                NEVER => Some(NEVER),
                n => n.checked_sub(1),
            })
            .is_ok();
        if !allowed {
            return Err(StoreError::Unavailable("injected write failure".into()));
        }
        self.inner.put(key, value)
    }
}
