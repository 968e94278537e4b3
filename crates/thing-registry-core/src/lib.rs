//! # Thing Registry Core
//!
//! Pure primitives for the Thing Registry: canonical signing messages,
//! secp256k1 signature verification, transaction types, and the records the
//! registry stores in the ledger.
//!
//! This crate contains no I/O, no storage, no networking. It is pure computation
//! over the fields of registry transactions.
//!
//! ## Key Types
//!
//! - [`Transaction`] - The closed set of mutating operations
//! - [`RegisterRegistrant`], [`RegisterThing`], [`RegisterSpec`] - Transaction payloads
//! - [`Nonce`] - Caller-supplied unique identifier of a thing
//! - [`Keypair`], [`PublicKey`] - secp256k1 keys (client side)
//! - [`RegistrantRecord`], [`ThingRecord`], [`AliasRecord`], [`SpecRecord`] - Stored records
//!
//! ## Canonical Messages
//!
//! Signatures are computed over `:`-delimited field concatenations. See the
//! [`canonical`] module for the exact layout of each transaction kind.

pub mod canonical;
pub mod crypto;
pub mod error;
pub mod records;
pub mod transaction;
pub mod types;
pub mod validation;

pub use canonical::{registrant_message, spec_message, thing_message, DELIMITER};
pub use crypto::{sha256, verify_signature, DerSignature, Keypair, PublicKey};
pub use error::{CoreError, Field, SignatureError, ValidationError};
pub use records::{AliasRecord, Record, RegistrantRecord, SpecRecord, ThingRecord};
pub use transaction::{
    RegisterRegistrant, RegisterSpec, RegisterThing, Transaction, TransactionKind,
};
pub use types::{Nonce, ResourceKind};
pub use validation::validate_structure;
