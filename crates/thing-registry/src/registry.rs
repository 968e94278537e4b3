//! The Registry: validate-then-apply engine for registry transactions.
//!
//! Every operation runs all structural checks, ledger reads, and signature
//! verification first, staging writes into a [`WriteBatch`]. The batch reaches
//! the ledger in a single [`Ledger::commit`] only after the last check passes.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use thing_registry_core::validation::{validate_registrant, validate_spec, validate_thing};
use thing_registry_core::{
    verify_signature, AliasRecord, Record, RegisterRegistrant, RegisterSpec, RegisterThing,
    RegistrantRecord, ResourceKind, SpecRecord, ThingRecord, Transaction, TransactionKind,
};
use thing_registry_store::{KeyNamespaces, Ledger, StoreError, WriteBatch};

use crate::error::{RegistryError, Result};

/// Configuration for the Registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Key prefixes for each record namespace.
    pub namespaces: KeyNamespaces,
}

/// Outcome of a committed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub kind: TransactionKind,
    /// Number of ledger keys the commit wrote.
    pub keys_written: usize,
}

/// The main Registry struct.
///
/// Holds the host's ledger and the key layout. Methods take `&self`; the host
/// is responsible for delivering transactions one at a time.
pub struct Registry<L: Ledger> {
    ledger: L,
    config: RegistryConfig,
}

impl<L: Ledger> Registry<L> {
    /// Create a registry over `ledger`.
    ///
    /// Fails if the configured namespaces are empty or overlap.
    pub fn new(ledger: L, config: RegistryConfig) -> Result<Self> {
        config.namespaces.validate()?;
        Ok(Self { ledger, config })
    }

    /// Create a registry with the default key layout.
    pub fn with_defaults(ledger: L) -> Self {
        Self {
            ledger,
            config: RegistryConfig::default(),
        }
    }

    /// Get the ledger reference.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub(crate) fn keys(&self) -> &KeyNamespaces {
        &self.config.namespaces
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transaction Entry Points
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply any transaction.
    pub fn submit(&self, tx: &Transaction) -> Result<Applied> {
        match tx {
            Transaction::RegisterRegistrant(tx) => self.register_registrant(tx),
            Transaction::RegisterThing(tx) => self.register_thing(tx),
            Transaction::RegisterSpec(tx) => self.register_spec(tx),
        }
    }

    /// Claim a name and bind it to the supplied public key.
    pub fn register_registrant(&self, tx: &RegisterRegistrant) -> Result<Applied> {
        self.apply(TransactionKind::RegisterRegistrant, || {
            self.stage_registrant(tx)
        })
    }

    /// Register a thing and one alias record per declared alias.
    pub fn register_thing(&self, tx: &RegisterThing) -> Result<Applied> {
        self.apply(TransactionKind::RegisterThing, || self.stage_thing(tx))
    }

    /// Register a named spec.
    pub fn register_spec(&self, tx: &RegisterSpec) -> Result<Applied> {
        self.apply(TransactionKind::RegisterSpec, || self.stage_spec(tx))
    }

    /// Run the validation phase, then commit its batch.
    fn apply<F>(&self, kind: TransactionKind, stage: F) -> Result<Applied>
    where
        F: FnOnce() -> Result<WriteBatch>,
    {
        let batch = stage().map_err(|err| {
            debug!(%kind, error = %err, "transaction rejected");
            err
        })?;

        let keys_written = batch.len();
        if let Err(err) = self.ledger.commit(batch) {
            warn!(%kind, error = %err, "commit failed after validation passed");
            return Err(RegistryError::CommitFailed(err));
        }

        debug!(%kind, keys_written, "transaction committed");
        Ok(Applied { kind, keys_written })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation Phase
    // ─────────────────────────────────────────────────────────────────────────

    fn stage_registrant(&self, tx: &RegisterRegistrant) -> Result<WriteBatch> {
        validate_registrant(tx)?;

        let key = self.keys().registrant_key(&tx.name);
        if self.ledger.contains(&key)? {
            return Err(RegistryError::AlreadyExists {
                kind: ResourceKind::Registrant,
                key: tx.name.clone(),
            });
        }
        if self.ledger.contains(&self.keys().alias_key(&tx.name))? {
            return Err(RegistryError::AliasCollision(tx.name.clone()));
        }

        // Self-certifying: checked against the key being registered.
        verify_signature(&tx.public_key, &tx.signature, &tx.signed_message())?;

        let record = RegistrantRecord {
            name: tx.name.clone(),
            public_key: tx.public_key.clone(),
        };
        let mut batch = WriteBatch::new();
        batch.stage(key, encode(&record)?);
        Ok(batch)
    }

    fn stage_thing(&self, tx: &RegisterThing) -> Result<WriteBatch> {
        validate_thing(tx)?;

        let thing_key = self.keys().thing_key(&tx.nonce);
        if self.ledger.contains(&thing_key)? {
            return Err(RegistryError::AlreadyExists {
                kind: ResourceKind::Thing,
                key: tx.nonce.to_hex(),
            });
        }

        let registrant: RegistrantRecord = self
            .read_record(&self.keys().registrant_key(&tx.registrant_name))?
            .ok_or_else(|| RegistryError::UnknownRegistrant(tx.registrant_name.clone()))?;

        let mut batch = WriteBatch::new();
        let alias_record = encode(&AliasRecord {
            nonce: tx.nonce.clone(),
        })?;
        for alias in &tx.aliases {
            if self.ledger.contains(&self.keys().registrant_key(alias))? {
                return Err(RegistryError::AliasCollision(alias.clone()));
            }
            let alias_key = self.keys().alias_key(alias);
            if batch.contains(&alias_key) || self.ledger.contains(&alias_key)? {
                return Err(RegistryError::AlreadyExists {
                    kind: ResourceKind::Alias,
                    key: alias.clone(),
                });
            }
            batch.stage(alias_key, alias_record.clone());
        }

        verify_signature(&registrant.public_key, &tx.signature, &tx.signed_message())?;

        let record = ThingRecord {
            aliases: tx.aliases.clone(),
            registrant_name: tx.registrant_name.clone(),
            data: tx.data.clone(),
            spec_name: tx.spec_name.clone(),
        };
        batch.stage(thing_key, encode(&record)?);
        Ok(batch)
    }

    fn stage_spec(&self, tx: &RegisterSpec) -> Result<WriteBatch> {
        validate_spec(tx)?;

        let spec_key = self.keys().spec_key(&tx.spec_name);
        if self.ledger.contains(&spec_key)? {
            return Err(RegistryError::AlreadyExists {
                kind: ResourceKind::Spec,
                key: tx.spec_name.clone(),
            });
        }

        let registrant: RegistrantRecord = self
            .read_record(&self.keys().registrant_key(&tx.registrant_name))?
            .ok_or_else(|| RegistryError::UnknownRegistrant(tx.registrant_name.clone()))?;

        verify_signature(&registrant.public_key, &tx.signature, &tx.signed_message())?;

        let record = SpecRecord {
            registrant_name: tx.registrant_name.clone(),
            data: tx.data.clone(),
        };
        let mut batch = WriteBatch::new();
        batch.stage(spec_key, encode(&record)?);
        Ok(batch)
    }

    /// Read and decode the record under `key`.
    ///
    /// An undecodable value is a storage failure, not an absent record.
    pub(crate) fn read_record<R: Record>(&self, key: &[u8]) -> Result<Option<R>> {
        let Some(bytes) = self.ledger.get(key)? else {
            return Ok(None);
        };
        R::from_bytes(&bytes).map(Some).map_err(|e| {
            RegistryError::Storage(StoreError::InvalidData {
                key: String::from_utf8_lossy(key).into_owned(),
                reason: format!("undecodable {} record: {}", R::KIND, e),
            })
        })
    }
}

fn encode<R: Record>(record: &R) -> Result<Bytes> {
    record
        .to_bytes()
        .map_err(|e| RegistryError::Storage(StoreError::Serialization(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use thing_registry_core::{Field, Keypair, Nonce, SignatureError};
    use thing_registry_store::MemoryLedger;

    fn alice() -> Keypair {
        Keypair::from_secret_bytes(&[0x42; 32]).unwrap()
    }

    fn bob() -> Keypair {
        Keypair::from_secret_bytes(&[0x07; 32]).unwrap()
    }

    fn make_registry() -> Registry<MemoryLedger> {
        Registry::with_defaults(MemoryLedger::new())
    }

    fn register(registry: &Registry<MemoryLedger>, name: &str, keypair: &Keypair) {
        let tx = RegisterRegistrant::new(name, keypair.public_key_bytes(), "").sign(keypair);
        registry.register_registrant(&tx).unwrap();
    }

    fn thing(nonce: &[u8], owner: &str, aliases: &[&str], keypair: &Keypair) -> RegisterThing {
        let aliases = aliases.iter().map(|a| a.to_string()).collect();
        RegisterThing::new(Nonce::from(nonce), owner, aliases, "s1", "d").sign(keypair)
    }

    #[test]
    fn test_register_registrant() {
        let registry = make_registry();
        let keypair = alice();
        let tx = RegisterRegistrant::new("Alice", keypair.public_key_bytes(), "hi").sign(&keypair);

        let applied = registry.register_registrant(&tx).unwrap();
        assert_eq!(applied.kind, TransactionKind::RegisterRegistrant);
        assert_eq!(applied.keys_written, 1);

        let stored: RegistrantRecord = registry
            .read_record(&registry.keys().registrant_key("Alice"))
            .unwrap()
            .unwrap();
        assert_eq!(stored.public_key, keypair.public_key_bytes());
    }

    #[test]
    fn test_duplicate_registrant_leaves_ledger_unchanged() {
        let registry = make_registry();
        register(&registry, "Alice", &alice());
        let before = registry.ledger().snapshot().unwrap();

        let keypair = bob();
        let tx = RegisterRegistrant::new("Alice", keypair.public_key_bytes(), "").sign(&keypair);
        let err = registry.register_registrant(&tx).unwrap_err();

        assert!(matches!(
            err,
            RegistryError::AlreadyExists { kind: ResourceKind::Registrant, .. }
        ));
        assert_eq!(registry.ledger().snapshot().unwrap(), before);
    }

    #[test]
    fn test_registrant_signature_checked_against_supplied_key() {
        let registry = make_registry();
        let tx = RegisterRegistrant::new("Alice", alice().public_key_bytes(), "").sign(&bob());

        let err = registry.register_registrant(&tx).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::SignatureInvalid(SignatureError::SignatureMismatch)
        ));
        assert!(registry.ledger().is_empty().unwrap());
    }

    #[test]
    fn test_registrant_garbage_public_key() {
        let registry = make_registry();
        let tx = RegisterRegistrant::new("Alice", vec![0x02, 0x00], "").sign(&alice());

        let err = registry.register_registrant(&tx).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::SignatureInvalid(SignatureError::InvalidPublicKey)
        ));
    }

    #[test]
    fn test_registrant_missing_fields() {
        let registry = make_registry();
        let tx = RegisterRegistrant::new("Alice", Bytes::new(), "");
        assert!(matches!(
            registry.register_registrant(&tx),
            Err(RegistryError::MissingField(Field::PublicKey))
        ));
    }

    #[test]
    fn test_registrant_name_taken_by_alias() {
        let registry = make_registry();
        register(&registry, "Alice", &alice());
        registry
            .register_thing(&thing(b"\x01", "Alice", &["Bob"], &alice()))
            .unwrap();

        let keypair = bob();
        let tx = RegisterRegistrant::new("Bob", keypair.public_key_bytes(), "").sign(&keypair);
        assert!(matches!(
            registry.register_registrant(&tx),
            Err(RegistryError::AliasCollision(name)) if name == "Bob"
        ));
    }

    #[test]
    fn test_register_thing_writes_aliases_and_thing() {
        let registry = make_registry();
        register(&registry, "Alice", &alice());

        let applied = registry
            .register_thing(&thing(b"\x01\x02", "Alice", &["Foo", "Bar"], &alice()))
            .unwrap();
        assert_eq!(applied.keys_written, 3);

        let alias: AliasRecord = registry
            .read_record(&registry.keys().alias_key("Foo"))
            .unwrap()
            .unwrap();
        assert_eq!(alias.nonce, Nonce::from(vec![1, 2]));
    }

    #[test]
    fn test_thing_unknown_registrant() {
        let registry = make_registry();
        let err = registry
            .register_thing(&thing(b"\x01", "Ghost", &["Foo"], &alice()))
            .unwrap_err();

        assert!(matches!(err, RegistryError::UnknownRegistrant(name) if name == "Ghost"));
        assert!(registry.ledger().is_empty().unwrap());
    }

    #[test]
    fn test_thing_alias_collides_with_registrant() {
        let registry = make_registry();
        register(&registry, "Alice", &alice());
        register(&registry, "Bob", &bob());
        let before = registry.ledger().snapshot().unwrap();

        let err = registry
            .register_thing(&thing(b"\x01", "Alice", &["Foo", "Bob", "Baz"], &alice()))
            .unwrap_err();

        assert!(matches!(err, RegistryError::AliasCollision(alias) if alias == "Bob"));
        assert_eq!(registry.ledger().snapshot().unwrap(), before);
    }

    #[test]
    fn test_duplicate_alias_in_one_transaction() {
        let registry = make_registry();
        register(&registry, "Alice", &alice());

        let err = registry
            .register_thing(&thing(b"\x01", "Alice", &["Foo", "Foo"], &alice()))
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::AlreadyExists { kind: ResourceKind::Alias, key } if key == "Foo"
        ));
    }

    #[test]
    fn test_alias_unique_across_things() {
        let registry = make_registry();
        register(&registry, "Alice", &alice());
        registry
            .register_thing(&thing(b"\x01", "Alice", &["Foo"], &alice()))
            .unwrap();

        let err = registry
            .register_thing(&thing(b"\x02", "Alice", &["Bar", "Foo"], &alice()))
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::AlreadyExists { kind: ResourceKind::Alias, .. }
        ));
        assert!(!registry
            .ledger()
            .contains(&registry.keys().alias_key("Bar"))
            .unwrap());
    }

    #[test]
    fn test_thing_signed_by_other_key() {
        let registry = make_registry();
        register(&registry, "Alice", &alice());

        let err = registry
            .register_thing(&thing(b"\x01", "Alice", &["Foo"], &bob()))
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::SignatureInvalid(SignatureError::SignatureMismatch)
        ));
    }

    #[test]
    fn test_thing_without_aliases() {
        let registry = make_registry();
        register(&registry, "Alice", &alice());

        let applied = registry
            .register_thing(&thing(b"\x09", "Alice", &[], &alice()))
            .unwrap();
        assert_eq!(applied.keys_written, 1);
    }

    #[test]
    fn test_register_spec() {
        let registry = make_registry();
        register(&registry, "Alice", &alice());

        let tx = RegisterSpec::new("s1", "Alice", "schema").sign(&alice());
        registry.register_spec(&tx).unwrap();

        let again = RegisterSpec::new("s1", "Alice", "other").sign(&alice());
        assert!(matches!(
            registry.register_spec(&again),
            Err(RegistryError::AlreadyExists { kind: ResourceKind::Spec, .. })
        ));
    }

    #[test]
    fn test_spec_signed_in_wrong_field_order_rejected() {
        let registry = make_registry();
        register(&registry, "Alice", &alice());

        let mut tx = RegisterSpec::new("s1", "Alice", "schema");
        tx.signature = alice().sign(b"Alice:s1:schema").into_bytes();

        assert!(matches!(
            registry.register_spec(&tx),
            Err(RegistryError::SignatureInvalid(SignatureError::SignatureMismatch))
        ));
    }

    #[test]
    fn test_spec_unknown_registrant() {
        let registry = make_registry();
        let tx = RegisterSpec::new("s1", "Alice", "schema").sign(&alice());
        assert!(matches!(
            registry.register_spec(&tx),
            Err(RegistryError::UnknownRegistrant(_))
        ));
    }

    #[test]
    fn test_submit_dispatches_by_kind() {
        let registry = make_registry();
        let keypair = alice();
        let tx: Transaction = RegisterRegistrant::new("Alice", keypair.public_key_bytes(), "")
            .sign(&keypair)
            .into();

        let applied = registry.submit(&tx).unwrap();
        assert_eq!(applied.kind, tx.kind());

        let spec: Transaction = RegisterSpec::new("s1", "Alice", "").sign(&keypair).into();
        assert_eq!(
            registry.submit(&spec).unwrap().kind,
            TransactionKind::RegisterSpec
        );
    }

    #[test]
    fn test_corrupt_registrant_record_is_storage_error() {
        let registry = make_registry();
        registry
            .ledger()
            .put(&registry.keys().registrant_key("Alice"), Bytes::from_static(&[0xff]))
            .unwrap();

        let err = registry
            .register_thing(&thing(b"\x01", "Alice", &[], &alice()))
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Storage(StoreError::InvalidData { .. })
        ));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_overlapping_namespaces_rejected() {
        let config = RegistryConfig {
            namespaces: KeyNamespaces {
                alias: "registrant/a".into(),
                ..KeyNamespaces::default()
            },
        };
        let result = Registry::new(MemoryLedger::new(), config);
        assert!(matches!(
            result,
            Err(RegistryError::Storage(StoreError::InvalidNamespaces(_)))
        ));
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: RegistryConfig =
            serde_json::from_str(r#"{"namespaces":{"thing":"t:"}}"#).unwrap();
        assert_eq!(config.namespaces.thing, "t:");
        assert_eq!(config.namespaces.alias, "alias/");
        assert!(Registry::new(MemoryLedger::new(), config).is_ok());
    }
}
