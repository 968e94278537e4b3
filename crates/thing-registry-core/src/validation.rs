//! Structural checks: everything that can be rejected without the ledger.

use crate::error::{Field, ValidationError};
use crate::transaction::{RegisterRegistrant, RegisterSpec, RegisterThing, Transaction};

/// Validate a transaction's structure (no ledger reads, no signature check).
///
/// Required fields are checked in the order the host declares them, so the
/// first empty field is the one reported.
pub fn validate_structure(tx: &Transaction) -> Result<(), ValidationError> {
    match tx {
        Transaction::RegisterRegistrant(tx) => validate_registrant(tx),
        Transaction::RegisterThing(tx) => validate_thing(tx),
        Transaction::RegisterSpec(tx) => validate_spec(tx),
    }
}

pub fn validate_registrant(tx: &RegisterRegistrant) -> Result<(), ValidationError> {
    require(Field::Name, tx.name.is_empty())?;
    require(Field::PublicKey, tx.public_key.is_empty())?;
    require(Field::Signature, tx.signature.is_empty())
}

pub fn validate_thing(tx: &RegisterThing) -> Result<(), ValidationError> {
    require(Field::RegistrantName, tx.registrant_name.is_empty())?;
    require(Field::Nonce, tx.nonce.is_empty())?;
    require(Field::Signature, tx.signature.is_empty())?;
    // An empty alias would index the bare namespace prefix.
    require(Field::Alias, tx.aliases.iter().any(String::is_empty))
}

pub fn validate_spec(tx: &RegisterSpec) -> Result<(), ValidationError> {
    require(Field::SpecName, tx.spec_name.is_empty())?;
    require(Field::RegistrantName, tx.registrant_name.is_empty())?;
    require(Field::Signature, tx.signature.is_empty())
}

fn require(field: Field, missing: bool) -> Result<(), ValidationError> {
    if missing {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}
