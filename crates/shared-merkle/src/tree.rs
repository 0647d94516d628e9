//! # Fixed-Height Merkle Tree
//!
//! Index-addressed sparse tree with `2^height` leaves.
//!
//! ```text
//!                 root            level = height
//!               /      \
//!            ...        ...
//!           /   \      /   \
//!         l0    l1   l2    l3     level = 0
//! ```
//!
//! A witness for leaf `i` lists one sibling per level, leaf upwards, with
//! `is_left` set when the node on the path is the left child. The index a
//! witness encodes is therefore recoverable from the `is_left` bits.

use crate::{empty_subtree_hashes, hash_node, MerkleError};
use serde::{Deserialize, Serialize};
use shared_crypto::Field;
use std::collections::HashMap;

/// Largest supported height (leaf indices must fit in `u64`).
pub const MAX_TREE_HEIGHT: usize = 63;

/// Sparse Merkle tree of fixed height.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    height: usize,
    // (level, index within level); level 0 holds leaves
    nodes: HashMap<(usize, u64), Field>,
    zeros: Vec<Field>,
}

impl MerkleTree {
    /// Create an empty tree with `2^height` leaves.
    pub fn new(height: usize) -> Result<Self, MerkleError> {
        if height == 0 || height > MAX_TREE_HEIGHT {
            return Err(MerkleError::InvalidHeight {
                height,
                max: MAX_TREE_HEIGHT,
            });
        }
        Ok(Self {
            height,
            nodes: HashMap::new(),
            zeros: empty_subtree_hashes(height),
        })
    }

    /// Root of an empty tree of `height` (no allocation of node storage).
    pub fn empty_root(height: usize) -> Result<Field, MerkleError> {
        Ok(Self::new(height)?.get_root())
    }

    /// Tree height (number of siblings in a witness).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of leaf slots.
    pub fn leaf_count(&self) -> u64 {
        1u64 << self.height
    }

    pub fn get_root(&self) -> Field {
        self.node(self.height, 0)
    }

    pub fn get_leaf(&self, index: u64) -> Result<Field, MerkleError> {
        self.check_index(index)?;
        Ok(self.node(0, index))
    }

    /// Set a leaf and rehash its path to the root.
    pub fn set_leaf(&mut self, index: u64, leaf: Field) -> Result<(), MerkleError> {
        self.check_index(index)?;

        let mut idx = index;
        let mut current = leaf;
        self.nodes.insert((0, idx), current);

        for level in 0..self.height {
            let sibling = self.node(level, idx ^ 1);
            current = if idx % 2 == 0 {
                hash_node(&current, &sibling)
            } else {
                hash_node(&sibling, &current)
            };
            idx >>= 1;
            self.nodes.insert((level + 1, idx), current);
        }
        Ok(())
    }

    pub fn get_witness(&self, index: u64) -> Result<MerkleWitness, MerkleError> {
        self.check_index(index)?;

        let mut idx = index;
        let mut path = Vec::with_capacity(self.height);
        for level in 0..self.height {
            path.push(WitnessNode {
                sibling: self.node(level, idx ^ 1),
                is_left: idx % 2 == 0,
            });
            idx >>= 1;
        }
        Ok(MerkleWitness { path })
    }

    fn node(&self, level: usize, index: u64) -> Field {
        self.nodes
            .get(&(level, index))
            .copied()
            .unwrap_or(self.zeros[level])
    }

    fn check_index(&self, index: u64) -> Result<(), MerkleError> {
        if index >= self.leaf_count() {
            return Err(MerkleError::IndexOutOfRange {
                index,
                leaf_count: self.leaf_count(),
            });
        }
        Ok(())
    }
}

/// One step of an inclusion path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessNode {
    /// Hash of the sibling subtree at this level.
    pub sibling: Field,
    /// Whether the node on the path is the left child.
    pub is_left: bool,
}

/// Inclusion proof for one leaf slot of a `MerkleTree`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleWitness {
    pub path: Vec<WitnessNode>,
}

impl MerkleWitness {
    pub fn height(&self) -> usize {
        self.path.len()
    }

    /// Root obtained by placing `leaf` at the slot this witness encodes.
    pub fn calculate_root(&self, leaf: &Field) -> Field {
        self.path.iter().fold(*leaf, |current, node| {
            if node.is_left {
                hash_node(&current, &node.sibling)
            } else {
                hash_node(&node.sibling, &current)
            }
        })
    }

    /// Leaf index encoded by the `is_left` bits. Bits past `MAX_TREE_HEIGHT` are ignored.
    pub fn calculate_index(&self) -> u64 {
        self.path
            .iter()
            .take(MAX_TREE_HEIGHT)
            .enumerate()
            .filter(|(_, node)| !node.is_left)
            .fold(0u64, |index, (level, _)| index | (1u64 << level))
    }
}
