//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Invalid public key
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Nullifier was signed by a different identity than claimed
    #[error("Nullifier public key does not match the caller")]
    NullifierIdentityMismatch,

    /// Nullifier was derived for a different context
    #[error("Nullifier context mismatch")]
    NullifierContextMismatch,

    /// Invalid field encoding
    #[error("Invalid field encoding: expected {expected} bytes, got {actual}")]
    InvalidFieldLength {
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Invalid input for cryptographic operation
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
