//! Error types for the Registry.

use std::fmt;

use thing_registry_core::{Field, ResourceKind, SignatureError, ValidationError};
use thing_registry_store::StoreError;
use thiserror::Error;

/// Errors that can occur during registry operations.
///
/// Every check fails fast: the first error aborts the transaction and the
/// ledger is left exactly as it was.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A required field was empty.
    #[error("missing field: {0}")]
    MissingField(Field),

    /// A field could not be decoded into its expected binary shape.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A registrant name, thing nonce, alias, or spec name is already taken.
    #[error("{kind} already exists: {key}")]
    AlreadyExists { kind: ResourceKind, key: String },

    /// The referenced registrant is not registered.
    #[error("unknown registrant: {0}")]
    UnknownRegistrant(String),

    /// An alias and a registrant name would share the same string.
    #[error("alias collides with registrant name: {0}")]
    AliasCollision(String),

    /// Public key, signature encoding, or verification failed.
    #[error("invalid signature: {0}")]
    SignatureInvalid(#[from] SignatureError),

    /// Ledger read failed, or a stored record could not be decoded.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// The batch could not be committed after every check passed.
    ///
    /// Fatal for the transaction. A ledger whose commit is not atomic may
    /// hold part of the batch, so resubmitting can fail with `AlreadyExists`.
    #[error("commit failed: {0}")]
    CommitFailed(StoreError),

    /// Query target is absent.
    #[error("{kind} not found: {key}")]
    NotFound { kind: ResourceKind, key: String },
}

impl RegistryError {
    /// The coarse error kind reported to hosts.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::MissingField(_) => ErrorKind::MissingField,
            RegistryError::MalformedInput(_) => ErrorKind::MalformedInput,
            RegistryError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            RegistryError::UnknownRegistrant(_) => ErrorKind::UnknownRegistrant,
            RegistryError::AliasCollision(_) => ErrorKind::AliasCollision,
            RegistryError::SignatureInvalid(_) => ErrorKind::SignatureInvalid,
            RegistryError::Storage(_) | RegistryError::CommitFailed(_) => ErrorKind::StorageError,
            RegistryError::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    /// Whether resubmitting the same transaction could succeed.
    ///
    /// True only for transient ledger failures seen before anything was
    /// written. Commit failures and undecodable records are never retryable.
    /// The registry itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RegistryError::Storage(err) if err.is_transient())
    }
}

impl From<ValidationError> for RegistryError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingField(field) => RegistryError::MissingField(field),
        }
    }
}

/// Host-facing error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingField,
    MalformedInput,
    AlreadyExists,
    UnknownRegistrant,
    AliasCollision,
    SignatureInvalid,
    StorageError,
    NotFound,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MissingField => "MissingField",
            ErrorKind::MalformedInput => "MalformedInput",
            ErrorKind::AlreadyExists => "AlreadyExists",
            ErrorKind::UnknownRegistrant => "UnknownRegistrant",
            ErrorKind::AliasCollision => "AliasCollision",
            ErrorKind::SignatureInvalid => "SignatureInvalid",
            ErrorKind::StorageError => "StorageError",
            ErrorKind::NotFound => "NotFound",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type for Registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
