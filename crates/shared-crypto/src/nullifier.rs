//! # Nullifiers
//!
//! A nullifier is a signed statement by an identity over a context. Its
//! map key is a deterministic function of (identity, context), so each
//! identity owns exactly one key per context and can consume it once in
//! an authenticated used/unused map.
//!
//! Only the holder of the secret key can produce a nullifier that passes
//! `verify`; anyone can recompute its `key` from the public parts.

use crate::signatures::{Identity, KeyPair, Signature};
use crate::{hash_fields, CryptoError, Field};
use serde::{Deserialize, Serialize};

/// Domain tag for nullifier signatures.
pub const NULLIFIER_DOMAIN: &[u8] = b"secret-messages/nullifier/v1";

/// First field of every nullifier key preimage ("nullifier" in ASCII, truncated).
pub const NULLIFIER_KEY_TAG: Field = Field::from_u64(0x6e75_6c6c_6966_6965);

/// A signed nullifier for one identity in one context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nullifier {
    public_key: Identity,
    context: Vec<Field>,
    signature: Signature,
}

impl Nullifier {
    /// Create a nullifier for `context`, signed by `keypair`.
    pub fn create(keypair: &KeyPair, context: &[Field]) -> Self {
        Self {
            public_key: keypair.identity(),
            context: context.to_vec(),
            signature: keypair.sign_tagged(NULLIFIER_DOMAIN, context),
        }
    }

    /// Identity that produced this nullifier.
    pub fn public_key(&self) -> Identity {
        self.public_key
    }

    /// Context the nullifier was produced for.
    pub fn context(&self) -> &[Field] {
        &self.context
    }

    /// Check the nullifier was produced for `expected_context` by its key holder.
    pub fn verify(&self, expected_context: &[Field]) -> Result<(), CryptoError> {
        if self.context.as_slice() != expected_context {
            return Err(CryptoError::NullifierContextMismatch);
        }
        self.public_key
            .verify_tagged(NULLIFIER_DOMAIN, &self.context, &self.signature)
    }

    /// Check the nullifier belongs to `caller` and commits to the caller's own fields.
    pub fn verify_for(&self, caller: &Identity) -> Result<(), CryptoError> {
        if self.public_key != *caller {
            return Err(CryptoError::NullifierIdentityMismatch);
        }
        self.verify(&caller.to_fields())
    }

    /// Map key consumed by this nullifier.
    pub fn key(&self) -> Field {
        let mut preimage = Vec::with_capacity(3);
        preimage.push(NULLIFIER_KEY_TAG);
        preimage.extend(self.public_key.to_fields());
        preimage.push(hash_fields(&self.context));
        hash_fields(&preimage)
    }
}
