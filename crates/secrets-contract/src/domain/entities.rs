//! # Domain Entities
//!
//! Contract state and the caller-supplied inputs of each transition.
//!
//! ## Atomic Unit
//!
//! `ContractState` is only ever replaced whole. Transitions build a
//! candidate copy and the service swaps it in after every check passed.

use crate::config::ContractConfig;
use crate::domain::ContractError;
use serde::{Deserialize, Serialize};
use shared_crypto::{Field, KeyPair, Nullifier, Signature};
use shared_merkle::{MerkleMap, MerkleMapWitness, MerkleTree, MerkleWitness};

/// Default registry capacity.
pub const MAX_ELIGIBLE_ADDRESSES: u64 = 100;

/// Default registry tree height (256 slots).
pub const ADDRESS_TREE_HEIGHT: usize = 8;

/// Value of an unoccupied tree leaf or map slot.
pub const EMPTY_LEAF: Field = Field::ZERO;

/// Committed contract state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractState {
    /// Root of the eligible-address tree.
    pub eligible_addresses_root: Field,
    /// Number of registered addresses. Never exceeds the configured capacity.
    pub eligible_addresses_count: u64,
    /// Root of the nullifier used/unused map.
    pub nullifier_root: Field,
    /// Root of the slot -> message commitment map.
    pub message_root: Field,
    /// Number of accepted submissions.
    pub message_count: u64,
    /// Bootstrap counter: accepted admin calls, bound into each admin signature.
    pub admin_nonce: u64,
}

impl ContractState {
    /// Zeroed state with every root at its empty-structure value.
    pub fn initial(config: &ContractConfig) -> Result<Self, ContractError> {
        let eligible_addresses_root = MerkleTree::empty_root(config.address_tree_height)
            .map_err(|e| ContractError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            eligible_addresses_root,
            eligible_addresses_count: 0,
            nullifier_root: MerkleMap::empty_root(),
            message_root: MerkleMap::empty_root(),
            message_count: 0,
            admin_nonce: 0,
        })
    }
}

/// Result of adding an eligible address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryUpdate {
    pub root: Field,
    pub count: u64,
}

/// Inputs of `save_valid_secret_messages`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSubmission {
    /// Caller's nullifier over the caller's own identity fields.
    pub nullifier: Nullifier,
    /// Raw message; only the lowest six bits are meaningful.
    pub message: Field,
    /// Witness for the (currently empty) message slot.
    pub slot_witness: MerkleMapWitness,
    /// Caller's signature over `[message]`.
    pub signature: Signature,
    /// Witness placing the caller's leaf under the registry root.
    pub membership_witness: MerkleWitness,
}

/// Result of an accepted submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageReceipt {
    pub message_root: Field,
    pub message_count: u64,
    /// Map key the commitment was stored under.
    pub slot: Field,
    /// Canonicalized message (six flag bits).
    pub canonical_message: Field,
}

/// Privileged state overwrite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminOperation {
    SetEligibleAddressesRoot(Field),
    SetAddressesCounter(u64),
}

impl AdminOperation {
    const SET_ROOT_TAG: Field = Field::from_u64(1);
    const SET_COUNTER_TAG: Field = Field::from_u64(2);

    /// Signed payload: `[operation tag, value, admin nonce]`.
    pub fn payload(&self, admin_nonce: u64) -> Vec<Field> {
        let (tag, value) = match self {
            AdminOperation::SetEligibleAddressesRoot(root) => (Self::SET_ROOT_TAG, *root),
            AdminOperation::SetAddressesCounter(count) => {
                (Self::SET_COUNTER_TAG, Field::from_u64(*count))
            }
        };
        vec![tag, value, Field::from_u64(admin_nonce)]
    }
}

/// Admin signature authorizing one `AdminOperation` at one nonce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminAuthorization {
    pub signature: Signature,
}

impl AdminAuthorization {
    pub fn sign(admin: &KeyPair, operation: &AdminOperation, admin_nonce: u64) -> Self {
        Self {
            signature: admin.sign_fields(&operation.payload(admin_nonce)),
        }
    }
}
