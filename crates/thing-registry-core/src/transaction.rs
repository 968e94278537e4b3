//! Transactions: the closed set of operations that mutate the registry.
//!
//! Each payload knows its canonical signing message. Clients build a payload
//! with `new`, then call `sign` with the key the registry will check the
//! signature against.

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::canonical::{registrant_message, spec_message, thing_message};
use crate::crypto::Keypair;
use crate::types::Nonce;

/// Claim a name and bind it to a public key.
///
/// Self-certifying: the signature is checked against `public_key` itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRegistrant {
    pub name: String,
    pub public_key: Bytes,
    pub signature: Bytes,
    pub data: String,
}

impl RegisterRegistrant {
    /// Create an unsigned registration.
    pub fn new(
        name: impl Into<String>,
        public_key: impl Into<Bytes>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            public_key: public_key.into(),
            signature: Bytes::new(),
            data: data.into(),
        }
    }

    /// The bytes the signature covers.
    pub fn signed_message(&self) -> Vec<u8> {
        registrant_message(&self.name, &self.data)
    }

    /// Sign with the keypair whose public key is being registered.
    pub fn sign(mut self, keypair: &Keypair) -> Self {
        self.signature = keypair.sign(&self.signed_message()).into_bytes();
        self
    }
}

/// Register a thing owned by an existing registrant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterThing {
    pub nonce: Nonce,
    pub registrant_name: String,
    pub aliases: Vec<String>,
    pub spec_name: String,
    pub data: String,
    pub signature: Bytes,
}

impl RegisterThing {
    /// Create an unsigned thing registration.
    pub fn new(
        nonce: Nonce,
        registrant_name: impl Into<String>,
        aliases: Vec<String>,
        spec_name: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            nonce,
            registrant_name: registrant_name.into(),
            aliases,
            spec_name: spec_name.into(),
            data: data.into(),
            signature: Bytes::new(),
        }
    }

    /// The bytes the signature covers.
    pub fn signed_message(&self) -> Vec<u8> {
        thing_message(&self.registrant_name, &self.aliases, &self.data, &self.spec_name)
    }

    /// Sign with the registrant's keypair.
    pub fn sign(mut self, keypair: &Keypair) -> Self {
        self.signature = keypair.sign(&self.signed_message()).into_bytes();
        self
    }
}

/// Register a named spec owned by an existing registrant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterSpec {
    pub spec_name: String,
    pub registrant_name: String,
    pub data: String,
    pub signature: Bytes,
}

impl RegisterSpec {
    /// Create an unsigned spec registration.
    pub fn new(
        spec_name: impl Into<String>,
        registrant_name: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            spec_name: spec_name.into(),
            registrant_name: registrant_name.into(),
            data: data.into(),
            signature: Bytes::new(),
        }
    }

    /// The bytes the signature covers.
    pub fn signed_message(&self) -> Vec<u8> {
        spec_message(&self.spec_name, &self.registrant_name, &self.data)
    }

    /// Sign with the registrant's keypair.
    pub fn sign(mut self, keypair: &Keypair) -> Self {
        self.signature = keypair.sign(&self.signed_message()).into_bytes();
        self
    }
}

/// Discriminator for the transaction kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    RegisterRegistrant,
    RegisterThing,
    RegisterSpec,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::RegisterRegistrant => "register_registrant",
            TransactionKind::RegisterThing => "register_thing",
            TransactionKind::RegisterSpec => "register_spec",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any registry transaction, already decoded from the host's wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transaction {
    RegisterRegistrant(RegisterRegistrant),
    RegisterThing(RegisterThing),
    RegisterSpec(RegisterSpec),
}

impl Transaction {
    pub fn kind(&self) -> TransactionKind {
        match self {
            Transaction::RegisterRegistrant(_) => TransactionKind::RegisterRegistrant,
            Transaction::RegisterThing(_) => TransactionKind::RegisterThing,
            Transaction::RegisterSpec(_) => TransactionKind::RegisterSpec,
        }
    }

    /// The bytes the signature covers.
    pub fn signed_message(&self) -> Vec<u8> {
        match self {
            Transaction::RegisterRegistrant(tx) => tx.signed_message(),
            Transaction::RegisterThing(tx) => tx.signed_message(),
            Transaction::RegisterSpec(tx) => tx.signed_message(),
        }
    }
}

impl From<RegisterRegistrant> for Transaction {
    fn from(tx: RegisterRegistrant) -> Self {
        Transaction::RegisterRegistrant(tx)
    }
}

impl From<RegisterThing> for Transaction {
    fn from(tx: RegisterThing) -> Self {
        Transaction::RegisterThing(tx)
    }
}

impl From<RegisterSpec> for Transaction {
    fn from(tx: RegisterSpec) -> Self {
        Transaction::RegisterSpec(tx)
    }
}
