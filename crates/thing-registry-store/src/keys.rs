//! Ledger key derivation.
//!
//! Each kind of record lives under its own string prefix. Prefixes must not
//! overlap: if one were a prefix of another, a registrant name could land on
//! the same key as an alias or spec and the uniqueness checks would read the
//! wrong namespace.

use serde::{Deserialize, Serialize};

use thing_registry_core::{Nonce, ResourceKind};

use crate::error::{Result, StoreError};

/// Key prefixes for the four record namespaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyNamespaces {
    pub registrant: String,
    pub thing: String,
    pub alias: String,
    pub spec: String,
}

impl Default for KeyNamespaces {
    fn default() -> Self {
        Self {
            registrant: "registrant/".into(),
            thing: "thing/".into(),
            alias: "alias/".into(),
            spec: "spec/".into(),
        }
    }
}

impl KeyNamespaces {
    /// Check that every prefix is non-empty and none is a prefix of another.
    pub fn validate(&self) -> Result<()> {
        let prefixes = self.prefixes();

        for (kind, prefix) in &prefixes {
            if prefix.is_empty() {
                return Err(StoreError::InvalidNamespaces(format!(
                    "{} prefix is empty",
                    kind
                )));
            }
        }

        for (i, (kind_a, a)) in prefixes.iter().enumerate() {
            for (kind_b, b) in prefixes.iter().skip(i + 1) {
                if a.starts_with(b.as_str()) || b.starts_with(a.as_str()) {
                    return Err(StoreError::InvalidNamespaces(format!(
                        "{} prefix {:?} overlaps {} prefix {:?}",
                        kind_a, a, kind_b, b
                    )));
                }
            }
        }

        Ok(())
    }

    /// Key of the registrant record for `name`.
    pub fn registrant_key(&self, name: &str) -> Vec<u8> {
        join(&self.registrant, name)
    }

    /// Key of the thing record for `nonce` (prefix + lowercase hex).
    pub fn thing_key(&self, nonce: &Nonce) -> Vec<u8> {
        join(&self.thing, &nonce.to_hex())
    }

    /// Key of the alias record for `alias`.
    pub fn alias_key(&self, alias: &str) -> Vec<u8> {
        join(&self.alias, alias)
    }

    /// Key of the spec record for `spec_name`.
    pub fn spec_key(&self, spec_name: &str) -> Vec<u8> {
        join(&self.spec, spec_name)
    }

    fn prefixes(&self) -> [(ResourceKind, &String); 4] {
        [
            (ResourceKind::Registrant, &self.registrant),
            (ResourceKind::Thing, &self.thing),
            (ResourceKind::Alias, &self.alias),
            (ResourceKind::Spec, &self.spec),
        ]
    }
}

fn join(prefix: &str, suffix: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(prefix.len() + suffix.len());
    key.extend_from_slice(prefix.as_bytes());
    key.extend_from_slice(suffix.as_bytes());
    key
}
