//! # Shared Crypto - Protocol Primitives
//!
//! Cryptographic building blocks consumed by the secrets contract.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `field` | 256-bit big-endian element | Protocol values, roots, keys |
//! | `hashing` | BLAKE3 (domain separated) | Leaves, Merkle nodes, commitments |
//! | `signatures` | Ed25519 | Identities, message signatures |
//! | `nullifier` | Ed25519 + BLAKE3 | One-shot per-identity map keys |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, no RNG dependency
//! - **BLAKE3**: Domain-separated, length-prefixed field hashing
//! - **Nullifier keys**: Fixed per (identity, context), independent of the signature bytes

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod field;
pub mod hashing;
pub mod nullifier;
pub mod signatures;

// Re-exports
pub use errors::CryptoError;
pub use field::{Field, FIELD_BYTES};
pub use hashing::{encode_fields, hash_fields, Blake3Hasher};
pub use nullifier::Nullifier;
pub use signatures::{Identity, KeyPair, Signature};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
