use crate::domain::{ContractError, ContractState};
use crate::ports::ContractStore;
use shared_crypto::Field;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

#[derive(Default)]
struct StoredContract {
    state: Option<ContractState>,
    used_nullifiers: HashSet<Field>,
    address_tree_height: Option<usize>,
}

/// In-memory implementation of ContractStore for testing
#[derive(Default)]
pub struct InMemoryContractStore {
    inner: RwLock<StoredContract>,
    fail_commits: AtomicBool,
}

impl InMemoryContractStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `commit` fail with a storage error.
    pub fn set_fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }
}

impl ContractStore for InMemoryContractStore {
    fn load_state(&self) -> Result<Option<ContractState>, ContractError> {
        let inner = self.inner.read().map_err(|_| ContractError::LockPoisoned)?;
        Ok(inner.state)
    }

    fn used_nullifiers(&self) -> Result<Vec<Field>, ContractError> {
        let inner = self.inner.read().map_err(|_| ContractError::LockPoisoned)?;
        Ok(inner.used_nullifiers.iter().copied().collect())
    }

    fn address_tree_height(&self) -> Result<Option<usize>, ContractError> {
        let inner = self.inner.read().map_err(|_| ContractError::LockPoisoned)?;
        Ok(inner.address_tree_height)
    }

    fn commit(
        &self,
        state: &ContractState,
        consumed_nullifier: Option<Field>,
    ) -> Result<(), ContractError> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(ContractError::Storage("commit disabled".to_string()));
        }

        let mut inner = self.inner.write().map_err(|_| ContractError::LockPoisoned)?;
        if let Some(key) = consumed_nullifier {
            if !inner.used_nullifiers.insert(key) {
                return Err(ContractError::NullifierReuse);
            }
        }
        inner.state = Some(*state);
        Ok(())
    }

    fn reset(
        &self,
        state: &ContractState,
        address_tree_height: usize,
    ) -> Result<(), ContractError> {
        let mut inner = self.inner.write().map_err(|_| ContractError::LockPoisoned)?;
        inner.used_nullifiers.clear();
        inner.address_tree_height = Some(address_tree_height);
        inner.state = Some(*state);
        Ok(())
    }
}
