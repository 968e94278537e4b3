//! Error types for the Thing Registry Core.

use std::fmt;

use thiserror::Error;

/// Errors from parsing keys and signatures or checking a signature.
///
/// All three are non-retryable: resubmitting the same bytes fails the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("invalid signature encoding")]
    InvalidSignatureEncoding,

    #[error("signature verification failed")]
    SignatureMismatch,
}

/// Core errors that can occur outside of signature checking.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error("invalid secret key")]
    InvalidSecretKey,

    #[error("malformed hex: {0}")]
    MalformedHex(String),

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("decoding error: {0}")]
    DecodingError(String),
}

/// A transaction field that must not be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    PublicKey,
    Signature,
    Nonce,
    RegistrantName,
    SpecName,
    Alias,
}

impl Field {
    /// The field name as hosts spell it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::PublicKey => "publicKey",
            Field::Signature => "signature",
            Field::Nonce => "nonce",
            Field::RegistrantName => "registrantName",
            Field::SpecName => "specName",
            Field::Alias => "alias",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural validation errors, detected before touching the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required field `{0}` is empty")]
    MissingField(Field),
}
