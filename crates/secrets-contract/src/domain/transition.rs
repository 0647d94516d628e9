//! # State Transitions
//!
//! Each transition reads the committed state, runs every check, and
//! returns a `StagedTransition` holding the complete candidate state.
//! Nothing here mutates; a failed check simply returns the error and the
//! candidate is dropped.
//!
//! ## Submission Order
//!
//! 1. Consume the caller's nullifier
//! 2. Verify the caller's signature over `[message]`
//! 3. Verify registry membership
//! 4. Canonicalize the message
//! 5. Store the commitment in an empty slot
//! 6. Increment the message count

use crate::config::ContractConfig;
use crate::domain::message::canonicalize;
use crate::domain::message_store::store_message;
use crate::domain::nullifier_ledger::NullifierLedger;
use crate::domain::registry::{add_eligible_address, verify_membership};
use crate::domain::{
    AdminAuthorization, AdminOperation, ContractError, ContractState, MessageReceipt,
    MessageSubmission, RegistryUpdate,
};
use shared_crypto::{Field, Identity, Nullifier};
use shared_merkle::MerkleWitness;
use tracing::debug;

/// Candidate next state plus the side data needed to commit it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StagedTransition<T> {
    pub next: ContractState,
    /// Nullifier key consumed by this transition, if any.
    pub consumed_nullifier: Option<Field>,
    /// Value returned to the caller once committed.
    pub output: T,
}

impl<T> StagedTransition<T> {
    fn state_only(next: ContractState, output: T) -> Self {
        Self {
            next,
            consumed_nullifier: None,
            output,
        }
    }
}

pub fn stage_add_eligible_address(
    state: &ContractState,
    config: &ContractConfig,
    identity: &Identity,
    witness: &MerkleWitness,
) -> Result<StagedTransition<RegistryUpdate>, ContractError> {
    let update = add_eligible_address(state, config, identity, witness)?;

    let mut next = *state;
    next.eligible_addresses_root = update.root;
    next.eligible_addresses_count = update.count;
    Ok(StagedTransition::state_only(next, update))
}

/// Stage consumption of `caller`'s nullifier. Output is the new nullifier root.
pub fn stage_execute_nullifier(
    state: &ContractState,
    ledger: &NullifierLedger,
    caller: &Identity,
    nullifier: &Nullifier,
) -> Result<StagedTransition<Field>, ContractError> {
    let consumed = ledger.consume(nullifier, caller, &state.nullifier_root)?;

    let mut next = *state;
    next.nullifier_root = consumed.new_root;
    Ok(StagedTransition {
        next,
        consumed_nullifier: Some(consumed.key),
        output: consumed.new_root,
    })
}

pub fn stage_submission(
    state: &ContractState,
    config: &ContractConfig,
    ledger: &NullifierLedger,
    caller: &Identity,
    submission: &MessageSubmission,
) -> Result<StagedTransition<MessageReceipt>, ContractError> {
    let mut staged = stage_execute_nullifier(state, ledger, caller, &submission.nullifier)?;

    caller
        .verify_fields(&[submission.message], &submission.signature)
        .map_err(|e| {
            debug!("[secrets] Message signature from {} rejected: {}", caller, e);
            ContractError::BadSignature
        })?;

    verify_membership(&staged.next, config, caller, &submission.membership_witness)?;

    let canonical = canonicalize(&submission.message);
    let stored = store_message(&staged.next, &submission.slot_witness, canonical)?;

    staged.next.message_root = stored.root;
    staged.next.message_count = stored.count;

    Ok(StagedTransition {
        next: staged.next,
        consumed_nullifier: staged.consumed_nullifier,
        output: MessageReceipt {
            message_root: stored.root,
            message_count: stored.count,
            slot: stored.slot,
            canonical_message: canonical.to_field(),
        },
    })
}

/// Stage a privileged overwrite. Requires a signature by the configured
/// admin over the operation and the current admin nonce.
pub fn stage_admin(
    state: &ContractState,
    config: &ContractConfig,
    operation: &AdminOperation,
    authorization: &AdminAuthorization,
) -> Result<StagedTransition<ContractState>, ContractError> {
    let admin = config.admin.as_ref().ok_or(ContractError::Unauthorized)?;
    admin
        .verify_fields(&operation.payload(state.admin_nonce), &authorization.signature)
        .map_err(|_| ContractError::Unauthorized)?;

    let mut next = *state;
    match operation {
        AdminOperation::SetEligibleAddressesRoot(root) => {
            next.eligible_addresses_root = *root;
        }
        AdminOperation::SetAddressesCounter(count) => {
            if *count > config.max_eligible_addresses {
                return Err(ContractError::CapacityExceeded {
                    max: config.max_eligible_addresses,
                });
            }
            next.eligible_addresses_count = *count;
        }
    }
    next.admin_nonce += 1;

    Ok(StagedTransition::state_only(next, next))
}
