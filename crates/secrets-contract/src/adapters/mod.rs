//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits for contract persistence.

mod memory_store;

pub use memory_store::InMemoryContractStore;
