//! # Thing Registry Store
//!
//! The ledger abstraction for the Thing Registry. The host owns the ledger;
//! the registry only reads and writes opaque byte keys and values through the
//! [`Ledger`] trait.
//!
//! ## Key Types
//!
//! - [`Ledger`] - The key-value interface the registry consumes
//! - [`WriteBatch`] - Writes staged during validation, committed once
//! - [`KeyNamespaces`] - Prefixes separating registrants, things, aliases, specs
//! - [`MemoryLedger`] - In-memory ledger for tests and embedding
//! - [`SqliteLedger`] - SQLite-backed persistent ledger
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bytes::Bytes;
//! use thing_registry_store::{KeyNamespaces, Ledger, SqliteLedger, WriteBatch};
//!
//! let ledger = SqliteLedger::open("registry.db").unwrap();
//! let keys = KeyNamespaces::default();
//!
//! let mut batch = WriteBatch::new();
//! batch.stage(keys.spec_key("s1"), Bytes::from_static(b"record"));
//! ledger.commit(batch).unwrap();
//!
//! assert!(ledger.get(&keys.spec_key("s1")).unwrap().is_some());
//! ```
//!
//! ## Design Notes
//!
//! - **All-or-nothing commit**: both bundled ledgers apply a batch atomically
//! - **Non-overlapping namespaces**: no prefix may be a prefix of another
//! - **No deletes**: registry records are immutable once written

pub mod batch;
pub mod error;
pub mod keys;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use batch::WriteBatch;
pub use error::{Result, StoreError};
pub use keys::KeyNamespaces;
pub use memory::MemoryLedger;
pub use sqlite::SqliteLedger;
pub use traits::Ledger;
