//! Proptest generators for property-based testing.

use proptest::prelude::*;

use thing_registry_core::{Keypair, Nonce, RegisterRegistrant, RegisterThing};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_filter_map("invalid secret scalar", |secret| {
        Keypair::from_secret_bytes(&secret).ok()
    })
}

/// Generate a registrant name.
pub fn name() -> impl Strategy<Value = String> {
    "[A-Z][a-z0-9]{0,11}".prop_map(String::from)
}

/// Generate an alias. Lowercase, so it never equals a generated name.
pub fn alias() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,15}".prop_map(String::from)
}

/// Generate up to `max` distinct aliases, in arbitrary order.
pub fn aliases(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(alias(), 0..=max)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

/// Generate a non-empty nonce.
pub fn nonce() -> impl Strategy<Value = Nonce> {
    prop::collection::vec(any::<u8>(), 1..=32).prop_map(Nonce::from)
}

/// Generate free-form data, delimiters included.
pub fn data() -> impl Strategy<Value = String> {
    "[ -~]{0,48}".prop_map(String::from)
}

/// Parameters for a registrant and one thing it registers.
#[derive(Debug, Clone)]
pub struct ThingParams {
    pub keypair: Keypair,
    pub registrant_name: String,
    pub nonce: Nonce,
    pub aliases: Vec<String>,
    pub spec_name: String,
    pub data: String,
}

impl Arbitrary for ThingParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (keypair(), name(), nonce(), aliases(4), alias(), data())
            .prop_map(
                |(keypair, registrant_name, nonce, aliases, spec_name, data)| ThingParams {
                    keypair,
                    registrant_name,
                    nonce,
                    aliases,
                    spec_name,
                    data,
                },
            )
            .boxed()
    }
}

impl ThingParams {
    /// Signed registration of the registrant.
    pub fn registrant_tx(&self) -> RegisterRegistrant {
        RegisterRegistrant::new(
            self.registrant_name.as_str(),
            self.keypair.public_key_bytes(),
            "",
        )
        .sign(&self.keypair)
    }

    /// Signed registration of the thing.
    pub fn thing_tx(&self) -> RegisterThing {
        RegisterThing::new(
            self.nonce.clone(),
            self.registrant_name.as_str(),
            self.aliases.clone(),
            self.spec_name.as_str(),
            self.data.as_str(),
        )
        .sign(&self.keypair)
    }
}
