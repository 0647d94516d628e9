//! # Eligible Address Registry
//!
//! Capacity-bounded set of identities committed to a fixed-height tree.
//! Leaf `i` holds `hash(identity.to_fields())` of the `i`-th registered
//! identity; unused slots hold `EMPTY_LEAF`.
//!
//! ## Slot Binding
//!
//! The contract only stores the root and the count, so insertion relies on
//! a caller-supplied witness. The witness must point at slot `count` and
//! must show that slot empty under the stored root. A witness for any
//! other slot, or one built against an older root, is rejected.

use crate::config::ContractConfig;
use crate::domain::{ContractError, ContractState, RegistryUpdate, EMPTY_LEAF};
use shared_crypto::{hash_fields, Field, Identity};
use shared_merkle::MerkleWitness;

/// Leaf committed for an identity.
pub fn identity_leaf(identity: &Identity) -> Field {
    hash_fields(&identity.to_fields())
}

/// Compute the registry root and count after appending `identity`.
pub fn add_eligible_address(
    state: &ContractState,
    config: &ContractConfig,
    identity: &Identity,
    witness: &MerkleWitness,
) -> Result<RegistryUpdate, ContractError> {
    let count = state.eligible_addresses_count;
    if count >= config.max_eligible_addresses {
        return Err(ContractError::CapacityExceeded {
            max: config.max_eligible_addresses,
        });
    }

    if witness.height() != config.address_tree_height
        || witness.calculate_index() != count
        || witness.calculate_root(&EMPTY_LEAF) != state.eligible_addresses_root
    {
        return Err(ContractError::BadWitness);
    }

    Ok(RegistryUpdate {
        root: witness.calculate_root(&identity_leaf(identity)),
        count: count + 1,
    })
}

/// Check that `witness` places `identity` under the stored registry root.
pub fn verify_membership(
    state: &ContractState,
    config: &ContractConfig,
    identity: &Identity,
    witness: &MerkleWitness,
) -> Result<(), ContractError> {
    if witness.height() != config.address_tree_height
        || witness.calculate_root(&identity_leaf(identity)) != state.eligible_addresses_root
    {
        return Err(ContractError::NotEligible);
    }
    Ok(())
}
