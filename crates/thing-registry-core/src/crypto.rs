//! Cryptographic primitives for the Thing Registry.
//!
//! ECDSA over secp256k1 with SHA-256 message digests and DER-encoded
//! signatures, wrapped in strong types. Hosts only ever call
//! [`verify_signature`]; [`Keypair`] exists for clients and tests.

use std::fmt;

use bytes::Bytes;
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::signature::DigestSigner;
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use sha2::{Digest, Sha256};

use crate::error::{CoreError, SignatureError};

/// Compute the SHA-256 digest of the given data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Verify a DER-encoded ECDSA signature over `message` against a SEC1-encoded
/// secp256k1 public key.
///
/// The key is parsed first, then the signature, and only then is the digest
/// checked, so malformed input is always reported as such.
pub fn verify_signature(
    public_key: &[u8],
    signature: &[u8],
    message: &[u8],
) -> Result<(), SignatureError> {
    let key = PublicKey::from_sec1_bytes(public_key)?;
    key.verify(message, signature)
}

/// A secp256k1 public key, compressed (33 bytes) or uncompressed (65 bytes)
/// on the wire.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(VerifyingKey);

impl PublicKey {
    /// Parse a SEC1-encoded point.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        VerifyingKey::from_sec1_bytes(bytes)
            .map(Self)
            .map_err(|_| SignatureError::InvalidPublicKey)
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let bytes = hex::decode(s).map_err(|e| CoreError::MalformedHex(e.to_string()))?;
        Ok(Self::from_sec1_bytes(&bytes)?)
    }

    /// SEC1 compressed encoding (33 bytes, `02`/`03` prefix).
    pub fn to_compressed_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(self.0.to_encoded_point(true).as_bytes())
    }

    /// SEC1 uncompressed encoding (65 bytes, `04` prefix).
    pub fn to_uncompressed_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(self.0.to_encoded_point(false).as_bytes())
    }

    /// Compressed encoding as hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed_bytes())
    }

    /// Verify a DER-encoded signature over the SHA-256 digest of `message`.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), SignatureError> {
        let sig =
            Signature::from_der(signature).map_err(|_| SignatureError::InvalidSignatureEncoding)?;
        // Accept high-S signatures the same way as low-S ones.
        let sig = sig.normalize_s().unwrap_or(sig);

        let digest = sha256(message);
        self.0
            .verify_prehash(&digest, &sig)
            .map_err(|_| SignatureError::SignatureMismatch)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}...)", &self.to_hex()[..16])
    }
}

/// A DER-encoded ECDSA signature.
#[derive(Clone, PartialEq, Eq)]
pub struct DerSignature(Bytes);

impl DerSignature {
    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Unwrap into the raw bytes.
    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Debug for DerSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        write!(f, "DerSignature({}...)", &hex[..hex.len().min(16)])
    }
}

impl AsRef<[u8]> for DerSignature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<DerSignature> for Bytes {
    fn from(sig: DerSignature) -> Self {
        sig.0
    }
}

/// A secp256k1 signing keypair.
///
/// This wraps k256's SigningKey.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            signing_key: SigningKey::random(&mut rng),
        }
    }

    /// Create from a 32-byte secret scalar.
    ///
    /// Fails if the scalar is zero or not below the curve order.
    pub fn from_secret_bytes(secret: &[u8; 32]) -> Result<Self, CoreError> {
        let signing_key =
            SigningKey::from_slice(secret).map_err(|_| CoreError::InvalidSecretKey)?;
        Ok(Self { signing_key })
    }

    /// Get the public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(*self.signing_key.verifying_key())
    }

    /// Compressed SEC1 encoding of the public key.
    pub fn public_key_bytes(&self) -> Bytes {
        self.public_key().to_compressed_bytes()
    }

    /// Sign the SHA-256 digest of a message, DER-encoded.
    pub fn sign(&self, message: &[u8]) -> DerSignature {
        let sig: Signature = self.signing_key.sign_digest(Sha256::new_with_prefix(message));
        DerSignature(Bytes::copy_from_slice(sig.to_der().as_bytes()))
    }

    /// Get the raw secret scalar bytes.
    pub fn secret_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes().into()
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.public_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keypair(seed: u8) -> Keypair {
        Keypair::from_secret_bytes(&[seed; 32]).unwrap()
    }

    #[test]
    fn test_keypair_sign_verify() {
        let keypair = keypair(0x42);
        let message = b"Alice:d";
        let signature = keypair.sign(message);

        verify_signature(&keypair.public_key_bytes(), signature.as_bytes(), message)
            .expect("valid signature should verify");

        // Tampered message should fail
        let result = verify_signature(&keypair.public_key_bytes(), signature.as_bytes(), b"Alice:D");
        assert_eq!(result, Err(SignatureError::SignatureMismatch));
    }

    #[test]
    fn test_uncompressed_key_verifies() {
        let keypair = keypair(0x07);
        let signature = keypair.sign(b"hello");
        let uncompressed = keypair.public_key().to_uncompressed_bytes();

        assert_eq!(uncompressed.len(), 65);
        assert_eq!(uncompressed[0], 0x04);
        assert!(verify_signature(&uncompressed, signature.as_bytes(), b"hello").is_ok());
    }

    #[test]
    fn test_compressed_key_shape() {
        let bytes = keypair(0x07).public_key_bytes();
        assert_eq!(bytes.len(), 33);
        assert!(bytes[0] == 0x02 || bytes[0] == 0x03);
    }

    #[test]
    fn test_wrong_key_rejected() {
        let signer = keypair(0x01);
        let other = keypair(0x02);
        let signature = signer.sign(b"message");

        let result = verify_signature(&other.public_key_bytes(), signature.as_bytes(), b"message");
        assert_eq!(result, Err(SignatureError::SignatureMismatch));
    }

    #[test]
    fn test_invalid_public_key() {
        let signature = keypair(0x01).sign(b"message");

        let result = verify_signature(&[0x02; 12], signature.as_bytes(), b"message");
        assert_eq!(result, Err(SignatureError::InvalidPublicKey));

        // Malformed key is reported even when the signature is garbage too
        let result = verify_signature(&[0xff; 33], &[0x00; 3], b"message");
        assert_eq!(result, Err(SignatureError::InvalidPublicKey));
    }

    #[test]
    fn test_invalid_signature_encoding() {
        let keypair = keypair(0x01);
        let result = verify_signature(&keypair.public_key_bytes(), b"not der", b"message");
        assert_eq!(result, Err(SignatureError::InvalidSignatureEncoding));

        // Raw 64-byte r||s is not DER
        let result = verify_signature(&keypair.public_key_bytes(), &[0x11; 64], b"message");
        assert_eq!(result, Err(SignatureError::InvalidSignatureEncoding));
    }

    #[test]
    fn test_every_flipped_byte_rejected() {
        let keypair = keypair(0x33);
        let message = b"Alice:Foo:Bar:d:s1";
        let signature = keypair.sign(message);
        let pk = keypair.public_key_bytes();

        for i in 0..signature.as_bytes().len() {
            let mut tampered = signature.as_bytes().to_vec();
            tampered[i] ^= 0x01;
            assert!(
                verify_signature(&pk, &tampered, message).is_err(),
                "flipping byte {} must invalidate the signature",
                i
            );
        }
    }

    #[test]
    fn test_high_s_signature_accepted() {
        let keypair = keypair(0x21);
        let message = b"spec:Alice:schema";
        let der = keypair.sign(message);

        // Negate s to get the equivalent high-S signature
        let sig = Signature::from_der(der.as_bytes()).unwrap();
        let (r, s) = sig.split_scalars();
        let high = Signature::from_scalars(r, -*s).unwrap();
        assert!(high.normalize_s().is_some());

        let high_der = high.to_der();
        assert!(verify_signature(&keypair.public_key_bytes(), high_der.as_bytes(), message).is_ok());
    }

    #[test]
    fn test_keypair_deterministic_from_secret() {
        let kp1 = keypair(0x42);
        let kp2 = keypair(0x42);
        assert_eq!(kp1.public_key(), kp2.public_key());
        assert_eq!(kp1.secret_bytes(), [0x42; 32]);
    }

    #[test]
    fn test_zero_secret_rejected() {
        assert!(matches!(
            Keypair::from_secret_bytes(&[0u8; 32]),
            Err(CoreError::InvalidSecretKey)
        ));
    }

    #[test]
    fn test_public_key_hex_roundtrip() {
        let pk = Keypair::generate().public_key();
        let recovered = PublicKey::from_hex(&pk.to_hex()).unwrap();
        assert_eq!(pk, recovered);
    }

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
