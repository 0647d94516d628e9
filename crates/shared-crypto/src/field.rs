//! # Field Elements
//!
//! 256-bit protocol values stored as 32 big-endian bytes.
//!
//! Roots, leaves, map keys, messages and identity encodings are all carried
//! as `Field`. Bit `i` counts from the least significant bit, so the
//! message flag vector lives in the low bits of the last byte.

use crate::CryptoError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Encoded size of a field element in bytes.
pub const FIELD_BYTES: usize = 32;

/// A 256-bit field element (big-endian).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Field([u8; FIELD_BYTES]);

impl Field {
    /// Additive identity. Also the empty leaf of every tree and map.
    pub const ZERO: Field = Field([0u8; FIELD_BYTES]);

    /// The value one.
    pub const ONE: Field = Field::from_u64(1);

    /// Create from a `u64`.
    pub const fn from_u64(value: u64) -> Self {
        let be = value.to_be_bytes();
        let mut bytes = [0u8; FIELD_BYTES];
        let mut i = 0;
        while i < 8 {
            bytes[FIELD_BYTES - 8 + i] = be[i];
            i += 1;
        }
        Field(bytes)
    }

    /// Create from raw big-endian bytes.
    pub const fn from_bytes(bytes: [u8; FIELD_BYTES]) -> Self {
        Field(bytes)
    }

    /// Create from a big-endian slice of exactly `FIELD_BYTES` bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: [u8; FIELD_BYTES] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidFieldLength {
                    expected: FIELD_BYTES,
                    actual: bytes.len(),
                })?;
        Ok(Field(array))
    }

    /// Parse from a hex string (optional `0x` prefix).
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|e| CryptoError::InvalidInput(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; FIELD_BYTES] {
        &self.0
    }

    /// Copy out raw bytes.
    pub fn to_bytes(self) -> [u8; FIELD_BYTES] {
        self.0
    }

    /// The least significant 64 bits.
    pub fn low_u64(&self) -> u64 {
        let mut tail = [0u8; 8];
        tail.copy_from_slice(&self.0[FIELD_BYTES - 8..]);
        u64::from_be_bytes(tail)
    }

    /// Value of bit `index` (0 = least significant). Out-of-range bits are zero.
    pub fn bit(&self, index: usize) -> bool {
        if index >= FIELD_BYTES * 8 {
            return false;
        }
        let byte = self.0[FIELD_BYTES - 1 - index / 8];
        (byte >> (index % 8)) & 1 == 1
    }

    /// Check for zero.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; FIELD_BYTES]
    }
}

impl From<u64> for Field {
    fn from(value: u64) -> Self {
        Field::from_u64(value)
    }
}

impl From<[u8; FIELD_BYTES]> for Field {
    fn from(bytes: [u8; FIELD_BYTES]) -> Self {
        Field(bytes)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field({})", self)
    }
}
