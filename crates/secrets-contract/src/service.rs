//! # Secret Messages Contract Service
//!
//! Serializes every transition against one committed `ContractState`.
//!
//! ## Commit Protocol
//!
//! 1. Lock the contract core (one transition at a time)
//! 2. Stage the transition against the committed state and ledger
//! 3. Commit the candidate through the `ContractStore`
//! 4. Only then swap the candidate in and mark the nullifier used
//!
//! A failure at step 2 or 3 leaves both the store and the in-memory
//! state untouched.

use crate::config::ContractConfig;
use crate::domain::transition::{
    stage_add_eligible_address, stage_admin, stage_execute_nullifier, stage_submission,
};
use crate::domain::{
    canonicalize, AdminAuthorization, AdminOperation, CanonicalMessage, ContractError,
    ContractState, MessageReceipt, MessageSubmission, NullifierLedger, RegistryUpdate,
    StagedTransition,
};
use crate::ports::{ContractStore, SecretsContractApi};
use parking_lot::Mutex;
use shared_crypto::{Field, Identity, Nullifier};
use shared_merkle::MerkleWitness;
use tracing::{debug, error, info, instrument, warn};

/// Committed state plus the nullifier map it commits to.
struct ContractCore {
    state: ContractState,
    ledger: NullifierLedger,
}

pub struct SecretsContractService<S: ContractStore> {
    config: ContractConfig,
    store: S,
    core: Mutex<ContractCore>,
}

impl<S: ContractStore> SecretsContractService<S> {
    /// Open the contract, resuming from `store` if it holds a state.
    pub fn new(config: ContractConfig, store: S) -> Result<Self, ContractError> {
        config.validate()?;

        let core = match store.load_state()? {
            Some(state) => {
                Self::check_resumed(&config, &state, store.address_tree_height()?)?;

                let ledger = NullifierLedger::from_used_keys(store.used_nullifiers()?);
                if ledger.root() != state.nullifier_root {
                    error!(
                        "[secrets] Stored nullifier keys do not match root {}",
                        state.nullifier_root
                    );
                    return Err(ContractError::Storage(
                        "nullifier keys inconsistent with stored root".to_string(),
                    ));
                }
                info!(
                    "[secrets] Resumed contract: {} addresses, {} messages",
                    state.eligible_addresses_count, state.message_count
                );
                ContractCore { state, ledger }
            }
            None => {
                let state = ContractState::initial(&config)?;
                store.reset(&state, config.address_tree_height)?;
                info!(
                    "[secrets] Initialized contract (capacity {}, tree height {})",
                    config.max_eligible_addresses, config.address_tree_height
                );
                ContractCore {
                    state,
                    ledger: NullifierLedger::new(),
                }
            }
        };

        Ok(Self {
            config,
            store,
            core: Mutex::new(core),
        })
    }

    /// A stored state must have been built for the registry shape in `config`.
    fn check_resumed(
        config: &ContractConfig,
        state: &ContractState,
        stored_height: Option<usize>,
    ) -> Result<(), ContractError> {
        if stored_height != Some(config.address_tree_height) {
            error!(
                "[secrets] Stored tree height {:?} differs from configured {}",
                stored_height, config.address_tree_height
            );
            return Err(ContractError::InvalidConfig(format!(
                "address_tree_height {} does not match stored height {:?}",
                config.address_tree_height, stored_height
            )));
        }

        if state.eligible_addresses_count > config.max_eligible_addresses {
            error!(
                "[secrets] Stored count {} exceeds configured capacity {}",
                state.eligible_addresses_count, config.max_eligible_addresses
            );
            return Err(ContractError::InvalidConfig(format!(
                "stored eligible_addresses_count {} exceeds max_eligible_addresses {}",
                state.eligible_addresses_count, config.max_eligible_addresses
            )));
        }

        Ok(())
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    pub fn is_nullifier_used(&self, key: &Field) -> bool {
        self.core.lock().ledger.is_used(key)
    }

    fn apply<T, F>(&self, operation: &str, stage: F) -> Result<T, ContractError>
    where
        F: FnOnce(&ContractState, &NullifierLedger) -> Result<StagedTransition<T>, ContractError>,
    {
        let mut core = self.core.lock();

        let staged = stage(&core.state, &core.ledger).map_err(|e| {
            warn!("[secrets] {} rejected: {}", operation, e);
            e
        })?;

        self.store
            .commit(&staged.next, staged.consumed_nullifier)
            .map_err(|e| {
                error!("[secrets] {} failed to commit: {}", operation, e);
                e
            })?;

        if let Some(key) = staged.consumed_nullifier {
            core.ledger.mark_used(&key);
            debug!("[secrets] Nullifier {} marked used", key);
        }
        core.state = staged.next;

        info!(
            "[secrets] {} committed: {} addresses, {} messages",
            operation, core.state.eligible_addresses_count, core.state.message_count
        );
        Ok(staged.output)
    }

    fn apply_admin(
        &self,
        operation: AdminOperation,
        authorization: &AdminAuthorization,
    ) -> Result<ContractState, ContractError> {
        let config = &self.config;
        self.apply("admin operation", |state, _| {
            stage_admin(state, config, &operation, authorization)
        })
    }
}

impl<S: ContractStore> SecretsContractApi for SecretsContractService<S> {
    fn init(&self) -> Result<ContractState, ContractError> {
        let mut core = self.core.lock();
        let state = ContractState::initial(&self.config)?;
        self.store.reset(&state, self.config.address_tree_height)?;

        core.state = state;
        core.ledger = NullifierLedger::new();
        warn!("[secrets] Contract re-initialized, nullifier ledger cleared");
        Ok(state)
    }

    #[instrument(skip(self, witness), fields(identity = %identity))]
    fn add_eligible_address(
        &self,
        identity: &Identity,
        witness: &MerkleWitness,
    ) -> Result<RegistryUpdate, ContractError> {
        let config = &self.config;
        self.apply("add eligible address", |state, _| {
            stage_add_eligible_address(state, config, identity, witness)
        })
    }

    #[instrument(skip(self, nullifier), fields(caller = %caller))]
    fn execute_nullifier(
        &self,
        caller: &Identity,
        nullifier: &Nullifier,
    ) -> Result<Field, ContractError> {
        self.apply("execute nullifier", |state, ledger| {
            stage_execute_nullifier(state, ledger, caller, nullifier)
        })
    }

    #[instrument(skip(self, submission), fields(caller = %caller))]
    fn save_valid_secret_messages(
        &self,
        caller: &Identity,
        submission: &MessageSubmission,
    ) -> Result<MessageReceipt, ContractError> {
        let config = &self.config;
        self.apply("save secret message", |state, ledger| {
            stage_submission(state, config, ledger, caller, submission)
        })
    }

    fn get_valid_message(&self, message: &Field) -> CanonicalMessage {
        canonicalize(message)
    }

    fn set_eligible_addresses_root(
        &self,
        root: Field,
        authorization: &AdminAuthorization,
    ) -> Result<ContractState, ContractError> {
        self.apply_admin(AdminOperation::SetEligibleAddressesRoot(root), authorization)
    }

    fn set_addresses_counter(
        &self,
        count: u64,
        authorization: &AdminAuthorization,
    ) -> Result<ContractState, ContractError> {
        self.apply_admin(AdminOperation::SetAddressesCounter(count), authorization)
    }

    fn state(&self) -> ContractState {
        self.core.lock().state
    }
}
