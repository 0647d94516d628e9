//! # Nullifier Ledger
//!
//! Authenticated used/unused map keyed by nullifier key. A key moves from
//! `NULLIFIER_UNUSED` to `NULLIFIER_USED` at most once and never back.
//!
//! The ledger keeps the full map so it can produce witnesses for the
//! caller; the contract state only carries the root. `consume` is
//! read-only and returns the candidate root; `mark_used` applies the
//! change after the surrounding transition has committed.

use crate::domain::ContractError;
use shared_crypto::{Field, Identity, Nullifier};
use shared_merkle::{MerkleMap, MerkleMapWitness};
use tracing::debug;

pub const NULLIFIER_UNUSED: Field = Field::ZERO;
pub const NULLIFIER_USED: Field = Field::ONE;

/// A nullifier accepted by `consume`, not yet applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConsumedNullifier {
    pub key: Field,
    pub new_root: Field,
}

/// Check that `witness` shows `key` unused under `root`.
///
/// A witness showing the key already used yields `NullifierReuse`; any
/// other mismatch (wrong key, stale or forged siblings) yields `BadWitness`.
pub fn assert_unused(
    witness: &MerkleMapWitness,
    root: &Field,
    key: &Field,
) -> Result<(), ContractError> {
    if !witness.is_well_formed() {
        return Err(ContractError::BadWitness);
    }

    let (unused_root, witness_key) = witness.compute_root_and_key(&NULLIFIER_UNUSED);
    if witness_key != *key {
        return Err(ContractError::BadWitness);
    }
    if unused_root == *root {
        return Ok(());
    }

    let (used_root, _) = witness.compute_root_and_key(&NULLIFIER_USED);
    if used_root == *root {
        return Err(ContractError::NullifierReuse);
    }
    Err(ContractError::BadWitness)
}

/// Root after marking the witnessed key used.
pub fn set_used(witness: &MerkleMapWitness) -> Field {
    witness.compute_root_and_key(&NULLIFIER_USED).0
}

#[derive(Clone, Debug, Default)]
pub struct NullifierLedger {
    map: MerkleMap,
}

impl NullifierLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from the keys already consumed.
    pub fn from_used_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = Field>,
    {
        let mut ledger = Self::new();
        for key in keys {
            ledger.mark_used(&key);
        }
        ledger
    }

    pub fn root(&self) -> Field {
        self.map.get_root()
    }

    pub fn is_used(&self, key: &Field) -> bool {
        self.map.get(key) == NULLIFIER_USED
    }

    pub fn witness(&self, key: &Field) -> MerkleMapWitness {
        self.map.get_witness(key)
    }

    /// Validate `nullifier` for `caller` against `current_root`.
    pub fn consume(
        &self,
        nullifier: &Nullifier,
        caller: &Identity,
        current_root: &Field,
    ) -> Result<ConsumedNullifier, ContractError> {
        nullifier.verify_for(caller).map_err(|e| {
            debug!("[secrets] Nullifier proof for {} rejected: {}", caller, e);
            ContractError::BadNullifierProof
        })?;

        let key = nullifier.key();
        let witness = self.witness(&key);
        assert_unused(&witness, current_root, &key)?;

        Ok(ConsumedNullifier {
            key,
            new_root: set_used(&witness),
        })
    }

    pub fn mark_used(&mut self, key: &Field) {
        self.map.set(key, NULLIFIER_USED);
    }
}
