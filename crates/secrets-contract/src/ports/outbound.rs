//! # Outbound Ports
//!
//! Persistence of the committed contract state.

use crate::domain::{ContractError, ContractState};
use shared_crypto::Field;
use std::sync::Arc;

/// Contract state storage - outbound port.
///
/// The state holds only roots and counters. The store also keeps the
/// consumed nullifier keys so the ledger can be rebuilt on restart, and
/// the registry tree height the roots were built at.
pub trait ContractStore: Send + Sync {
    /// Last committed state, or `None` if nothing was ever committed.
    fn load_state(&self) -> Result<Option<ContractState>, ContractError>;

    /// Every nullifier key consumed so far.
    fn used_nullifiers(&self) -> Result<Vec<Field>, ContractError>;

    /// Registry tree height recorded by the last `reset`.
    fn address_tree_height(&self) -> Result<Option<usize>, ContractError>;

    /// Atomically replace the state and record `consumed_nullifier`.
    fn commit(
        &self,
        state: &ContractState,
        consumed_nullifier: Option<Field>,
    ) -> Result<(), ContractError>;

    /// Replace the state, forget all consumed nullifiers and record the
    /// registry tree height.
    fn reset(&self, state: &ContractState, address_tree_height: usize)
        -> Result<(), ContractError>;
}

impl<T: ContractStore + ?Sized> ContractStore for Arc<T> {
    fn load_state(&self) -> Result<Option<ContractState>, ContractError> {
        (**self).load_state()
    }

    fn used_nullifiers(&self) -> Result<Vec<Field>, ContractError> {
        (**self).used_nullifiers()
    }

    fn address_tree_height(&self) -> Result<Option<usize>, ContractError> {
        (**self).address_tree_height()
    }

    fn commit(
        &self,
        state: &ContractState,
        consumed_nullifier: Option<Field>,
    ) -> Result<(), ContractError> {
        (**self).commit(state, consumed_nullifier)
    }

    fn reset(
        &self,
        state: &ContractState,
        address_tree_height: usize,
    ) -> Result<(), ContractError> {
        (**self).reset(state, address_tree_height)
    }
}
