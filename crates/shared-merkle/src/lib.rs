//! # Shared Merkle
//!
//! Authenticated structures for the secrets contract.
//!
//! ## Structures
//!
//! | Type | Shape | Used For |
//! |------|-------|----------|
//! | `MerkleTree` | Fixed height, index-addressed leaves | Eligible address registry |
//! | `MerkleMap` | 256 levels, key bits select the path | Nullifier ledger, message store |
//!
//! Both are sparse: every level has a precomputed empty-subtree hash and
//! only modified nodes are stored. A witness recomputes a root from a leaf
//! without access to the full structure; callers compare that root against
//! a trusted one before believing anything the witness claims.
//!
//! Node hashing is `hash_fields([left, right])` from `shared-crypto`.

#![warn(clippy::all)]

pub mod errors;
pub mod map;
pub mod tree;

pub use errors::MerkleError;
pub use map::{MerkleMap, MerkleMapWitness, MAP_HEIGHT};
pub use tree::{MerkleTree, MerkleWitness, WitnessNode, MAX_TREE_HEIGHT};

use shared_crypto::{hash_fields, Field};

/// Hash two children into their parent.
pub fn hash_node(left: &Field, right: &Field) -> Field {
    hash_fields(&[*left, *right])
}

/// Empty-subtree hashes, `zeros[level]` for `level` in `0..=height`.
pub(crate) fn empty_subtree_hashes(height: usize) -> Vec<Field> {
    let mut zeros = Vec::with_capacity(height + 1);
    zeros.push(Field::ZERO);
    for level in 1..=height {
        let below = zeros[level - 1];
        zeros.push(hash_node(&below, &below));
    }
    zeros
}
