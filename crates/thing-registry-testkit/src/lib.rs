//! # Thing Registry Testkit
//!
//! Testing utilities for the Thing Registry.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Canonical signing messages other signers must reproduce
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Named parties with deterministic keys that sign their own transactions
//! - **Ledgers**: Recording and fault-injecting ledger wrappers
//!
//! ## Golden Vectors
//!
//! ```rust
//! use thing_registry_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, message) in verify_all_vectors() {
//!     assert!(matches, "{}: {}", name, message);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use thing_registry_testkit::generators::ThingParams;
//!
//! proptest! {
//!     #[test]
//!     fn message_is_deterministic(params: ThingParams) {
//!         prop_assert_eq!(params.thing_tx().signed_message(), params.thing_tx().signed_message());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use thing_registry_testkit::fixtures::{scenario_nonce, Party};
//!
//! let alice = Party::new("Alice");
//! let registration = alice.register("");
//! let thing = alice.register_thing(scenario_nonce(), &["Foo", "Bar"], "s1", "d");
//! assert_eq!(thing.signed_message(), b"Alice:Foo:Bar:d:s1");
//! ```

pub mod fixtures;
pub mod generators;
pub mod ledgers;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, scenario_nonce, Party};
pub use generators::ThingParams;
pub use ledgers::{FaultyLedger, LedgerOp, RecordingLedger};
pub use vectors::{all_vectors, verify_all_vectors, vectors_json, GoldenVector};
