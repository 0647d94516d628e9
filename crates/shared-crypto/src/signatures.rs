//! # Ed25519 Identities
//!
//! Submitter identities are Ed25519 public keys; messages are signed over
//! the canonical encoding of a field vector.
//!
//! ## Security Properties
//!
//! - No RNG dependency (deterministic nonce from message)
//! - Strict verification (rejects small-order keys and non-canonical `S`)
//! - Message signatures and nullifier signatures use distinct domain tags

use crate::hashing::encode_fields;
use crate::{CryptoError, Field};
use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use std::fmt;
use zeroize::Zeroizing;

/// Domain tag prepended to every message signature payload.
pub const SIGNATURE_DOMAIN: &[u8] = b"secret-messages/signature/v1";

/// Submitter identity: a 32-byte compressed Ed25519 public key.
///
/// Deserialization goes through `from_bytes`, so decoded identities are
/// always valid curve points.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "[u8; 32]")]
pub struct Identity([u8; 32]);

impl TryFrom<[u8; 32]> for Identity {
    type Error = CryptoError;

    fn try_from(bytes: [u8; 32]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl Identity {
    /// Create from bytes, rejecting encodings that are not curve points.
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        VerifyingKey::from_bytes(&bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(bytes))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Canonical field encoding: exactly one field holding the compressed key.
    pub fn to_fields(&self) -> Vec<Field> {
        vec![Field::from_bytes(self.0)]
    }

    /// Verify a signature over a field vector.
    pub fn verify_fields(&self, fields: &[Field], signature: &Signature) -> Result<(), CryptoError> {
        self.verify_tagged(SIGNATURE_DOMAIN, fields, signature)
    }

    pub(crate) fn verify_tagged(
        &self,
        domain: &[u8],
        fields: &[Field],
        signature: &Signature,
    ) -> Result<(), CryptoError> {
        let verifying_key =
            VerifyingKey::from_bytes(&self.0).map_err(|_| CryptoError::InvalidPublicKey)?;
        let sig = ed25519_dalek::Signature::from_bytes(&signature.0);

        verifying_key
            .verify_strict(&tagged_payload(domain, fields), &sig)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self)
    }
}

/// Ed25519 signature (64 bytes).
#[serde_as]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(#[serde_as(as = "Bytes")] [u8; 64]);

impl Signature {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

/// Ed25519 keypair backing an identity.
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret seed (32 bytes).
    pub fn from_seed(seed: [u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(&seed);
        Self { signing_key }
    }

    /// Get the identity (public key).
    pub fn identity(&self) -> Identity {
        Identity(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a field vector (deterministic - no RNG needed).
    pub fn sign_fields(&self, fields: &[Field]) -> Signature {
        self.sign_tagged(SIGNATURE_DOMAIN, fields)
    }

    pub(crate) fn sign_tagged(&self, domain: &[u8], fields: &[Field]) -> Signature {
        let sig = self.signing_key.sign(&tagged_payload(domain, fields));
        Signature(sig.to_bytes())
    }

    /// Get secret seed (for serialization). Wiped when dropped.
    pub fn to_seed(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.signing_key.to_bytes())
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("identity", &self.identity())
            .finish_non_exhaustive()
    }
}

fn tagged_payload(domain: &[u8], fields: &[Field]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(domain.len() + 8 + fields.len() * 32);
    payload.extend_from_slice(domain);
    payload.extend_from_slice(&encode_fields(fields));
    payload
}
