//! Golden test vectors for canonical signing messages.
//!
//! A signer in any language must produce exactly these bytes for these
//! fields, or its signatures will not verify.

use serde::Serialize;
use thing_registry_core::{Nonce, RegisterRegistrant, RegisterSpec, RegisterThing, Transaction};

/// A golden test vector.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Unsigned transaction.
    pub transaction: Transaction,
    /// Expected canonical message.
    pub expected_message: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "registrant",
            transaction: RegisterRegistrant::new("Alice", vec![0x02; 33], "d").into(),
            expected_message: "Alice:d",
        },
        GoldenVector {
            name: "registrant with empty data",
            transaction: RegisterRegistrant::new("Alice", vec![0x02; 33], "").into(),
            expected_message: "Alice:",
        },
        GoldenVector {
            name: "registrant name containing delimiter",
            transaction: RegisterRegistrant::new("a:b", vec![0x02; 33], "c").into(),
            expected_message: "a:b:c",
        },
        GoldenVector {
            name: "thing with two aliases",
            transaction: RegisterThing::new(
                Nonce::from(vec![0x1f, 0x7b]),
                "Alice",
                vec!["Foo".into(), "Bar".into()],
                "s1",
                "d",
            )
            .into(),
            expected_message: "Alice:Foo:Bar:d:s1",
        },
        GoldenVector {
            name: "thing alias order preserved",
            transaction: RegisterThing::new(
                Nonce::from(vec![0x1f, 0x7b]),
                "Alice",
                vec!["Bar".into(), "Foo".into()],
                "s1",
                "d",
            )
            .into(),
            expected_message: "Alice:Bar:Foo:d:s1",
        },
        GoldenVector {
            name: "thing without aliases",
            transaction: RegisterThing::new(Nonce::from(vec![0x01]), "Alice", vec![], "s1", "d")
                .into(),
            expected_message: "Alice:d:s1",
        },
        GoldenVector {
            name: "thing with empty data and spec",
            transaction: RegisterThing::new(
                Nonce::from(vec![0x01]),
                "Alice",
                vec!["Foo".into()],
                "",
                "",
            )
            .into(),
            expected_message: "Alice:Foo::",
        },
        GoldenVector {
            name: "spec",
            transaction: RegisterSpec::new("s1", "Alice", "schema").into(),
            expected_message: "s1:Alice:schema",
        },
        GoldenVector {
            name: "spec with JSON data",
            transaction: RegisterSpec::new("temp/v1", "Alice", r#"{"unit":"C"}"#).into(),
            expected_message: r#"temp/v1:Alice:{"unit":"C"}"#,
        },
    ]
}

/// Check every vector's canonical message.
///
/// Returns `(name, matches, actual message)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let actual = String::from_utf8_lossy(&v.transaction.signed_message()).into_owned();
            let matches = actual == v.expected_message;
            (v.name.to_string(), matches, actual)
        })
        .collect()
}

/// Render every vector as pretty JSON, for sharing with other signers.
pub fn vectors_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&all_vectors())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_match() {
        for (name, matches, actual) in verify_all_vectors() {
            assert!(matches, "vector '{}' produced {:?}", name, actual);
        }
    }

    #[test]
    fn test_vector_names_unique() {
        let vectors = all_vectors();
        let mut names: Vec<_> = vectors.iter().map(|v| v.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), vectors.len());
    }

    #[test]
    fn test_vectors_json_tagged_by_kind() {
        let json = vectors_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["transaction"]["kind"], "register_registrant");
        assert_eq!(value[7]["transaction"]["kind"], "register_spec");
    }
}
