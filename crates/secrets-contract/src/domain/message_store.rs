//! # Message Store
//!
//! Slot -> `hash(canonical message)` map. Slots are write-once: the slot
//! witness must show the slot empty under the stored message root.

use crate::domain::message::CanonicalMessage;
use crate::domain::{ContractError, ContractState, EMPTY_LEAF};
use shared_crypto::Field;
use shared_merkle::MerkleMapWitness;

/// Candidate message root and count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoredMessage {
    pub root: Field,
    pub slot: Field,
    pub count: u64,
}

pub fn store_message(
    state: &ContractState,
    slot_witness: &MerkleMapWitness,
    canonical: CanonicalMessage,
) -> Result<StoredMessage, ContractError> {
    if !slot_witness.is_well_formed() {
        return Err(ContractError::BadWitness);
    }

    let (empty_root, slot) = slot_witness.compute_root_and_key(&EMPTY_LEAF);
    if empty_root != state.message_root {
        return Err(ContractError::BadWitness);
    }

    let (root, _) = slot_witness.compute_root_and_key(&canonical.commitment());
    Ok(StoredMessage {
        root,
        slot,
        count: state.message_count + 1,
    })
}
