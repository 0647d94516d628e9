//! # Contract Harness
//!
//! Drives a `SecretsContractService` the way an off-chain client would:
//! it mirrors the registry tree and the message map locally so it can
//! hand the contract correct witnesses.

use secrets_contract::{
    identity_leaf, ContractConfig, ContractError, InMemoryContractStore, MessageReceipt,
    MessageSubmission, RegistryUpdate, SecretsContractApi, SecretsContractService,
};
use shared_crypto::{Field, Identity, KeyPair, Nullifier};
use shared_merkle::{MerkleMap, MerkleTree, MerkleWitness};
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

/// Install a `RUST_LOG`-driven subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct ContractHarness {
    pub service: SecretsContractService<InMemoryContractStore>,
    pub tree: MerkleTree,
    pub messages: MerkleMap,
    slots: HashMap<Identity, u64>,
    next_message_slot: u64,
}

impl ContractHarness {
    pub fn new() -> Self {
        Self::with_config(ContractConfig::default())
    }

    pub fn with_config(config: ContractConfig) -> Self {
        init_tracing();
        let tree = MerkleTree::new(config.address_tree_height).expect("valid height");
        let service = SecretsContractService::new(config, InMemoryContractStore::new())
            .expect("valid config");
        Self {
            service,
            tree,
            messages: MerkleMap::new(),
            slots: HashMap::new(),
            next_message_slot: 0,
        }
    }

    /// Register `identity` at the next slot, mirroring the leaf locally on success.
    pub fn register(&mut self, identity: &Identity) -> Result<RegistryUpdate, ContractError> {
        let slot = self.service.state().eligible_addresses_count;
        let witness = self.insertion_witness(slot);
        let update = self.service.add_eligible_address(identity, &witness)?;

        self.tree
            .set_leaf(slot, identity_leaf(identity))
            .expect("slot within tree");
        self.slots.insert(*identity, slot);
        Ok(update)
    }

    /// Witness for `slot` taken from the local tree. Valid for insertion
    /// only when `slot` is empty and the local tree matches the contract.
    pub fn insertion_witness(&self, slot: u64) -> MerkleWitness {
        self.tree.get_witness(slot).expect("slot within tree")
    }

    pub fn membership_witness(&self, identity: &Identity) -> MerkleWitness {
        let slot = self.slots.get(identity).copied().unwrap_or(0);
        self.tree.get_witness(slot).expect("slot within tree")
    }

    /// A well-formed submission from `sender` into the next free message slot.
    pub fn build_submission(&self, sender: &KeyPair, message: u64) -> MessageSubmission {
        let identity = sender.identity();
        let message = Field::from_u64(message);
        MessageSubmission {
            nullifier: Nullifier::create(sender, &identity.to_fields()),
            message,
            slot_witness: self
                .messages
                .get_witness(&Field::from_u64(self.next_message_slot)),
            signature: sender.sign_fields(&[message]),
            membership_witness: self.membership_witness(&identity),
        }
    }

    /// Submit `submission` as `sender`, mirroring the stored commitment on success.
    pub fn submit(
        &mut self,
        sender: &KeyPair,
        submission: &MessageSubmission,
    ) -> Result<MessageReceipt, ContractError> {
        let receipt = self
            .service
            .save_valid_secret_messages(&sender.identity(), submission)?;

        let canonical = self.service.get_valid_message(&submission.message);
        self.messages.set(&receipt.slot, canonical.commitment());
        self.next_message_slot += 1;
        Ok(receipt)
    }

    pub fn send(&mut self, sender: &KeyPair, message: u64) -> Result<MessageReceipt, ContractError> {
        let submission = self.build_submission(sender, message);
        self.submit(sender, &submission)
    }
}

impl Default for ContractHarness {
    fn default() -> Self {
        Self::new()
    }
}
