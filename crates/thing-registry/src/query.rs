//! Read-only projections of registry state.
//!
//! Queries never validate or write. Views serialize byte fields as lowercase
//! hex so hosts can hand them straight to JSON clients.

use bytes::Bytes;
use serde::Serialize;

use thing_registry_core::{
    AliasRecord, Nonce, RegistrantRecord, ResourceKind, SpecRecord, ThingRecord,
};
use thing_registry_store::Ledger;

use crate::error::{RegistryError, Result};
use crate::registry::Registry;

/// A registry view that can be rendered as JSON.
pub trait View: Serialize {
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrantView {
    pub name: String,
    /// The key exactly as registered.
    #[serde(serialize_with = "hex_bytes::serialize")]
    pub public_key: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThingView {
    #[serde(serialize_with = "hex_bytes::serialize")]
    pub nonce: Nonce,
    pub aliases: Vec<String>,
    pub registrant_name: String,
    pub data: String,
    pub spec_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecView {
    pub spec_name: String,
    pub registrant_name: String,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasView {
    pub alias: String,
    #[serde(serialize_with = "hex_bytes::serialize")]
    pub nonce: Nonce,
}

impl View for RegistrantView {}
impl View for ThingView {}
impl View for SpecView {}
impl View for AliasView {}

impl<L: Ledger> Registry<L> {
    // ─────────────────────────────────────────────────────────────────────────
    // Query Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Get a registrant by name.
    pub fn query_registrant(&self, name: &str) -> Result<RegistrantView> {
        let record: RegistrantRecord = self
            .read_record(&self.keys().registrant_key(name))?
            .ok_or_else(|| not_found(ResourceKind::Registrant, name))?;
        Ok(RegistrantView {
            name: record.name,
            public_key: record.public_key,
        })
    }

    /// Get a thing by nonce.
    pub fn query_thing(&self, nonce: &Nonce) -> Result<ThingView> {
        let record: ThingRecord = self
            .read_record(&self.keys().thing_key(nonce))?
            .ok_or_else(|| not_found(ResourceKind::Thing, &nonce.to_hex()))?;
        Ok(ThingView {
            nonce: nonce.clone(),
            aliases: record.aliases,
            registrant_name: record.registrant_name,
            data: record.data,
            spec_name: record.spec_name,
        })
    }

    /// Get a thing by the hex form of its nonce, as hosts pass it.
    pub fn query_thing_hex(&self, nonce_hex: &str) -> Result<ThingView> {
        if nonce_hex.is_empty() {
            return Err(RegistryError::MalformedInput("empty nonce".into()));
        }
        let nonce =
            Nonce::from_hex(nonce_hex).map_err(|e| RegistryError::MalformedInput(e.to_string()))?;
        self.query_thing(&nonce)
    }

    /// Get a spec by name.
    pub fn query_spec(&self, spec_name: &str) -> Result<SpecView> {
        let record: SpecRecord = self
            .read_record(&self.keys().spec_key(spec_name))?
            .ok_or_else(|| not_found(ResourceKind::Spec, spec_name))?;
        Ok(SpecView {
            spec_name: spec_name.to_string(),
            registrant_name: record.registrant_name,
            data: record.data,
        })
    }

    /// Get the nonce an alias points at.
    pub fn query_alias(&self, alias: &str) -> Result<AliasView> {
        let record: AliasRecord = self
            .read_record(&self.keys().alias_key(alias))?
            .ok_or_else(|| not_found(ResourceKind::Alias, alias))?;
        Ok(AliasView {
            alias: alias.to_string(),
            nonce: record.nonce,
        })
    }

    /// Follow an alias to its thing.
    pub fn resolve_alias(&self, alias: &str) -> Result<(AliasView, ThingView)> {
        let view = self.query_alias(alias)?;
        let thing = self.query_thing(&view.nonce)?;
        Ok((view, thing))
    }
}

fn not_found(kind: ResourceKind, key: &str) -> RegistryError {
    RegistryError::NotFound {
        kind,
        key: key.to_string(),
    }
}

mod hex_bytes {
    use serde::Serializer;

    pub fn serialize<S, T>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: AsRef<[u8]>,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }
}
