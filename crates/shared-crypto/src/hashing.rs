//! # Field Hashing
//!
//! BLAKE3-backed `hash(fields) -> field`, the single collision-resistant
//! hash used for identity leaves, Merkle nodes, message commitments and
//! nullifier keys.
//!
//! ## Encoding
//!
//! `tag || len(fields) as u64 BE || field_0 || ... || field_n`, each field
//! as 32 big-endian bytes. The length prefix keeps `[a, b]` and `[a || b]`
//! from colliding across call sites.

use crate::Field;
use blake3::Hasher;

/// BLAKE3 hash output (256-bit).
pub type Hash = [u8; 32];

/// Domain tag for `hash_fields`.
pub const FIELD_HASH_DOMAIN: &[u8] = b"secret-messages/field-hash/v1";

/// Stateful BLAKE3 hasher.
pub struct Blake3Hasher {
    inner: Hasher,
}

impl Blake3Hasher {
    /// Create new hasher.
    pub fn new() -> Self {
        Self {
            inner: Hasher::new(),
        }
    }

    /// Update with data.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self
    }

    /// Absorb a field element.
    pub fn update_field(&mut self, field: &Field) -> &mut Self {
        self.inner.update(field.as_bytes());
        self
    }

    /// Finalize and return hash.
    pub fn finalize(&self) -> Hash {
        let hash = self.inner.finalize();
        *hash.as_bytes()
    }
}

impl Default for Blake3Hasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash a vector of field elements into one field element.
pub fn hash_fields(fields: &[Field]) -> Field {
    let mut hasher = Blake3Hasher::new();
    hasher.update(FIELD_HASH_DOMAIN);
    hasher.update(&(fields.len() as u64).to_be_bytes());
    for field in fields {
        hasher.update_field(field);
    }
    Field::from_bytes(hasher.finalize())
}

/// Canonical byte encoding of a field vector (used as signed payload).
pub fn encode_fields(fields: &[Field]) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + fields.len() * crate::FIELD_BYTES);
    out.extend_from_slice(&(fields.len() as u64).to_be_bytes());
    for field in fields {
        out.extend_from_slice(field.as_bytes());
    }
    out
}
