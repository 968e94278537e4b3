//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use bytes::Bytes;
use thing_registry_core::{
    sha256, Keypair, Nonce, PublicKey, RegisterRegistrant, RegisterSpec, RegisterThing,
};

/// A named principal with a signing key.
///
/// Builds transactions already signed with its own key.
#[derive(Debug)]
pub struct Party {
    pub name: String,
    pub keypair: Keypair,
}

impl Party {
    /// Create a party whose key is derived from its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let seed = sha256(name.as_bytes());
        Self::with_seed(name, seed)
    }

    /// Create with a deterministic keypair from seed.
    ///
    /// The secret scalar is `SHA-256(seed)`, so any seed yields a valid key.
    pub fn with_seed(name: impl Into<String>, seed: [u8; 32]) -> Self {
        let secret = sha256(&seed);
        Self {
            name: name.into(),
            keypair: Keypair::from_secret_bytes(&secret)
                .expect("SHA-256 output is a valid secp256k1 scalar"),
        }
    }

    pub fn public_key(&self) -> PublicKey {
        self.keypair.public_key()
    }

    /// Compressed SEC1 public key bytes.
    pub fn public_key_bytes(&self) -> Bytes {
        self.keypair.public_key_bytes()
    }

    /// Signed registration of this party's name and key.
    pub fn register(&self, data: &str) -> RegisterRegistrant {
        RegisterRegistrant::new(self.name.as_str(), self.public_key_bytes(), data)
            .sign(&self.keypair)
    }

    /// Signed registration of a thing owned by this party.
    pub fn register_thing(
        &self,
        nonce: Nonce,
        aliases: &[&str],
        spec_name: &str,
        data: &str,
    ) -> RegisterThing {
        let aliases = aliases.iter().map(|a| a.to_string()).collect();
        RegisterThing::new(nonce, self.name.as_str(), aliases, spec_name, data)
            .sign(&self.keypair)
    }

    /// Signed registration of a spec owned by this party.
    pub fn register_spec(&self, spec_name: &str, data: &str) -> RegisterSpec {
        RegisterSpec::new(spec_name, self.name.as_str(), data).sign(&self.keypair)
    }
}

/// Create multiple parties for multi-party tests.
///
/// Names are `party-0`, `party-1`, ...; keys are deterministic.
pub fn multi_party_fixtures(count: usize) -> Vec<Party> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[..8].copy_from_slice(&(i as u64).to_be_bytes());
            Party::with_seed(format!("party-{}", i), seed)
        })
        .collect()
}

/// The nonce used by the reference scenario.
pub fn scenario_nonce() -> Nonce {
    Nonce::from(vec![
        0x1f, 0x7b, 0x16, 0x9c, 0x84, 0x6f, 0x21, 0x8a, 0xb5, 0x52, 0xfa, 0x82, 0xfb, 0xf8, 0x67,
        0x58,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use thing_registry_core::verify_signature;

    #[test]
    fn test_party_deterministic_from_name() {
        let a = Party::new("Alice");
        let b = Party::new("Alice");
        assert_eq!(a.public_key(), b.public_key());
        assert_ne!(a.public_key(), Party::new("Bob").public_key());
    }

    #[test]
    fn test_party_transactions_verify() {
        let alice = Party::new("Alice");
        let tx = alice.register_thing(scenario_nonce(), &["Foo", "Bar"], "s1", "d");

        assert_eq!(tx.signed_message(), b"Alice:Foo:Bar:d:s1");
        assert!(
            verify_signature(&alice.public_key_bytes(), &tx.signature, &tx.signed_message())
                .is_ok()
        );
    }

    #[test]
    fn test_multi_party_distinct() {
        let parties = multi_party_fixtures(4);
        assert_eq!(parties.len(), 4);
        assert_eq!(parties[3].name, "party-3");

        for (i, a) in parties.iter().enumerate() {
            for b in parties.iter().skip(i + 1) {
                assert_ne!(a.public_key(), b.public_key());
            }
        }
    }

    #[test]
    fn test_scenario_nonce_hex() {
        assert_eq!(scenario_nonce().to_hex(), "1f7b169c846f218ab552fa82fbf86758");
    }
}
