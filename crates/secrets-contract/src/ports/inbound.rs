//! # Inbound Ports
//!
//! API trait defining the transitions the contract exposes.

use crate::domain::{
    AdminAuthorization, CanonicalMessage, ContractError, ContractState, MessageReceipt,
    MessageSubmission, RegistryUpdate,
};
use shared_crypto::{Field, Identity, Nullifier};
use shared_merkle::MerkleWitness;

/// Secret message contract API - inbound port.
///
/// Every method that takes `&self` and returns `Result` is one atomic
/// transition: on `Err` the committed state is unchanged.
pub trait SecretsContractApi: Send + Sync {
    /// Reset to the zeroed state (full re-initialization).
    ///
    /// Unauthenticated and destructive: the registry and every consumed
    /// nullifier are wiped, so previous senders may submit again. Only a
    /// deployment step may call this; it is not a per-user transition.
    fn init(&self) -> Result<ContractState, ContractError>;

    /// Append `identity` at the next registry slot.
    fn add_eligible_address(
        &self,
        identity: &Identity,
        witness: &MerkleWitness,
    ) -> Result<RegistryUpdate, ContractError>;

    /// Consume `caller`'s nullifier. Returns the new nullifier root.
    fn execute_nullifier(
        &self,
        caller: &Identity,
        nullifier: &Nullifier,
    ) -> Result<Field, ContractError>;

    /// Accept one canonicalized message from an eligible, first-time caller.
    fn save_valid_secret_messages(
        &self,
        caller: &Identity,
        submission: &MessageSubmission,
    ) -> Result<MessageReceipt, ContractError>;

    /// Canonicalize without touching state.
    fn get_valid_message(&self, message: &Field) -> CanonicalMessage;

    /// Admin-only overwrite of the registry root.
    fn set_eligible_addresses_root(
        &self,
        root: Field,
        authorization: &AdminAuthorization,
    ) -> Result<ContractState, ContractError>;

    /// Admin-only overwrite of the registry count.
    fn set_addresses_counter(
        &self,
        count: u64,
        authorization: &AdminAuthorization,
    ) -> Result<ContractState, ContractError>;

    /// Snapshot of the committed state.
    fn state(&self) -> ContractState;
}
