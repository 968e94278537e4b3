//! # Thing Registry
//!
//! An authenticated registry over a host key-value ledger. Principals
//! (registrants) claim a name bound to a secp256k1 public key; a registrant
//! then signs registrations of things (tagged with aliases and a spec
//! reference) and of specs (named schema blobs).
//!
//! ## Overview
//!
//! - **Registrants**: self-certifying; the signature is checked against the key being bound
//! - **Things**: keyed by a caller-supplied nonce, indexed by every declared alias
//! - **Specs**: named documents owned by a registrant
//! - **Queries**: read-only views rendered as JSON with hex byte fields
//!
//! ## Key Concepts
//!
//! - **Validate-then-apply**: every check runs before any write
//! - **One commit per transaction**: writes are staged and committed as one batch
//! - **Global uniqueness**: names, nonces, aliases, and spec names are claimed once
//!
//! ## Usage
//!
//! ```rust,no_run
//! use thing_registry::core::{Keypair, Nonce, RegisterRegistrant, RegisterThing};
//! use thing_registry::store::SqliteLedger;
//! use thing_registry::{Registry, RegistryConfig};
//!
//! fn example() -> thing_registry::Result<()> {
//!     let ledger = SqliteLedger::open("registry.db")?;
//!     let registry = Registry::new(ledger, RegistryConfig::default())?;
//!
//!     let keypair = Keypair::generate();
//!     let tx = RegisterRegistrant::new("Alice", keypair.public_key_bytes(), "").sign(&keypair);
//!     registry.register_registrant(&tx)?;
//!
//!     let nonce = Nonce::from_hex("1f7b169c846f218ab552fa82fbf86758").unwrap();
//!     let tx = RegisterThing::new(nonce, "Alice", vec!["Foo".into()], "s1", "d").sign(&keypair);
//!     registry.register_thing(&tx)?;
//!
//!     let thing = registry.query_thing_hex("1f7b169c846f218ab552fa82fbf86758")?;
//!     assert_eq!(thing.aliases, vec!["Foo".to_string()]);
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `thing_registry::core` - Transactions, records, canonical messages, signatures
//! - `thing_registry::store` - Ledger abstraction, in-memory and SQLite ledgers

pub mod error;
pub mod query;
pub mod registry;

// Re-export component crates
pub use thing_registry_core as core;
pub use thing_registry_store as store;

// Re-export main types for convenience
pub use error::{ErrorKind, RegistryError, Result};
pub use query::{AliasView, RegistrantView, SpecView, ThingView, View};
pub use registry::{Applied, Registry, RegistryConfig};

// Re-export commonly used core types
pub use thing_registry_core::{
    Keypair, Nonce, PublicKey, RegisterRegistrant, RegisterSpec, RegisterThing, ResourceKind,
    Transaction, TransactionKind,
};
pub use thing_registry_store::{KeyNamespaces, Ledger, MemoryLedger, SqliteLedger};
