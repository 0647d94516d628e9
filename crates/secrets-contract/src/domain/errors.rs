//! # Contract Errors
//!
//! Every variant is a precondition violation that rejects the whole
//! transition before anything is committed. No partial-success mode exists.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContractError {
    /// Registry already holds its maximum number of addresses.
    #[error("Eligible address registry is full (max {max})")]
    CapacityExceeded { max: u64 },

    /// The caller's nullifier has already been consumed.
    #[error("Nullifier already used")]
    NullifierReuse,

    /// The nullifier was not produced by the caller for the caller's own fields.
    #[error("Nullifier proof rejected")]
    BadNullifierProof,

    /// The message is not signed by the caller.
    #[error("Message signature rejected")]
    BadSignature,

    /// The membership witness does not place the caller under the registry root.
    #[error("Caller is not an eligible address")]
    NotEligible,

    /// A witness is inconsistent with the root it claims (stale or forged).
    #[error("Witness does not match the stored root")]
    BadWitness,

    /// Administrative call without a valid admin authorization.
    #[error("Unauthorized administrative call")]
    Unauthorized,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Lock poisoned")]
    LockPoisoned,
}
