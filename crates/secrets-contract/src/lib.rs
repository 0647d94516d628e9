//! # Secrets Contract
//!
//! Anonymous-eligibility secret message contract.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Accept at most one message per registered identity without storing who
//! sent it:
//! - Capacity-bounded registry of eligible identities (Merkle tree root)
//! - Nullifier ledger giving each identity exactly one submission
//! - Deterministic canonicalization of the six message flags
//! - Write-once message store (Merkle map root)
//!
//! ## Security Features
//!
//! | Defense | Description |
//! |---------|-------------|
//! | Slot binding | New addresses only at slot `count`, which must be empty |
//! | Nullifier keys | One key per identity, consumed once, never reset |
//! | Root equality | Every witness is checked against the committed root |
//! | Admin signatures | Privileged setters need a nonce-bound admin signature |
//! | All-or-nothing | Transitions stage a full candidate state before commit |
//!
//! ## Module Structure
//!
//! ```text
//! secrets-contract/
//! ├── domain/          # State, canonicalizer, registry, ledger, transitions
//! ├── ports/           # SecretsContractApi, ContractStore
//! ├── adapters/        # InMemoryContractStore
//! ├── config.rs        # ContractConfig
//! └── service.rs       # SecretsContractService
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::InMemoryContractStore;
pub use config::{ContractConfig, MAX_ADDRESS_TREE_HEIGHT};
pub use domain::{
    canonicalize, canonicalize_bits, identity_leaf, AdminAuthorization, AdminOperation,
    CanonicalMessage, ContractError, ContractState, MessageReceipt, MessageSubmission,
    NullifierLedger, RegistryUpdate, ADDRESS_TREE_HEIGHT, EMPTY_LEAF, MAX_ELIGIBLE_ADDRESSES,
};
pub use ports::{ContractStore, SecretsContractApi};
pub use service::SecretsContractService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
