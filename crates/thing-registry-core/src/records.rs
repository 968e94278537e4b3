//! Records the registry writes to the ledger.
//!
//! Records are encoded as CBOR via serde. Byte fields are [`Bytes`], which
//! serialize as CBOR byte strings, so a decoded record carries exactly the
//! bytes that were written.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Nonce, ResourceKind};

/// A value stored under a ledger key.
pub trait Record: Serialize + DeserializeOwned {
    /// The namespace this record lives in.
    const KIND: ResourceKind;

    /// Encode to CBOR bytes.
    fn to_bytes(&self) -> Result<Bytes, CoreError> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf)
            .map_err(|e| CoreError::EncodingError(e.to_string()))?;
        Ok(buf.into())
    }

    /// Decode from CBOR bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        ciborium::from_reader(bytes).map_err(|e| CoreError::DecodingError(e.to_string()))
    }
}

/// A named principal bound to a public key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrantRecord {
    pub name: String,
    /// The key exactly as supplied at registration (compressed or uncompressed SEC1).
    pub public_key: Bytes,
}

impl Record for RegistrantRecord {
    const KIND: ResourceKind = ResourceKind::Registrant;
}

/// A registered thing, keyed by its nonce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThingRecord {
    pub aliases: Vec<String>,
    pub registrant_name: String,
    pub data: String,
    pub spec_name: String,
}

impl Record for ThingRecord {
    const KIND: ResourceKind = ResourceKind::Thing;
}

/// Secondary index entry: alias -> thing nonce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRecord {
    pub nonce: Nonce,
}

impl Record for AliasRecord {
    const KIND: ResourceKind = ResourceKind::Alias;
}

/// A named schema/document blob, keyed by spec name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecRecord {
    pub registrant_name: String,
    pub data: String,
}

impl Record for SpecRecord {
    const KIND: ResourceKind = ResourceKind::Spec;
}
