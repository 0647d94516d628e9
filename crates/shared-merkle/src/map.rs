//! # Merkle Map
//!
//! Key-value map authenticated by a 256-level sparse tree. The 256 bits
//! of a key, least significant first, choose left or right at each level
//! from the leaf upwards; the leaf holds the value. Absent keys read as
//! `Field::ZERO`.
//!
//! A `MerkleMapWitness` recomputes both the root and the key it was built
//! for, so a caller can check "this key holds this value under this root"
//! from the witness alone.

use crate::{empty_subtree_hashes, hash_node};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_crypto::{Field, FIELD_BYTES};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Number of levels (one per key bit).
pub const MAP_HEIGHT: usize = 256;

fn map_zeros() -> &'static [Field] {
    static ZEROS: OnceLock<Vec<Field>> = OnceLock::new();
    ZEROS.get_or_init(|| empty_subtree_hashes(MAP_HEIGHT))
}

fn key_to_index(key: &Field) -> U256 {
    U256::from_big_endian(key.as_bytes())
}

fn index_to_key(index: U256) -> Field {
    let mut bytes = [0u8; FIELD_BYTES];
    index.to_big_endian(&mut bytes);
    Field::from_bytes(bytes)
}

/// Sparse 256-level Merkle map.
#[derive(Clone, Debug, Default)]
pub struct MerkleMap {
    nodes: HashMap<(usize, U256), Field>,
}

impl MerkleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root of the empty map.
    pub fn empty_root() -> Field {
        map_zeros()[MAP_HEIGHT]
    }

    pub fn get_root(&self) -> Field {
        self.node(MAP_HEIGHT, U256::zero())
    }

    pub fn get(&self, key: &Field) -> Field {
        self.node(0, key_to_index(key))
    }

    /// Set `key` to `value` and rehash its path.
    pub fn set(&mut self, key: &Field, value: Field) {
        let mut idx = key_to_index(key);
        let mut current = value;
        self.nodes.insert((0, idx), current);

        for level in 0..MAP_HEIGHT {
            let sibling = self.node(level, idx ^ U256::one());
            current = if idx.bit(0) {
                hash_node(&sibling, &current)
            } else {
                hash_node(&current, &sibling)
            };
            idx = idx >> 1usize;
            self.nodes.insert((level + 1, idx), current);
        }
    }

    pub fn get_witness(&self, key: &Field) -> MerkleMapWitness {
        let mut idx = key_to_index(key);
        let mut is_lefts = Vec::with_capacity(MAP_HEIGHT);
        let mut siblings = Vec::with_capacity(MAP_HEIGHT);

        for level in 0..MAP_HEIGHT {
            is_lefts.push(!idx.bit(0));
            siblings.push(self.node(level, idx ^ U256::one()));
            idx = idx >> 1usize;
        }
        MerkleMapWitness { is_lefts, siblings }
    }

    fn node(&self, level: usize, index: U256) -> Field {
        self.nodes
            .get(&(level, index))
            .copied()
            .unwrap_or(map_zeros()[level])
    }
}

/// Path from one map leaf to the root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleMapWitness {
    pub is_lefts: Vec<bool>,
    pub siblings: Vec<Field>,
}

impl MerkleMapWitness {
    /// Exactly one sibling and one direction per level.
    pub fn is_well_formed(&self) -> bool {
        self.is_lefts.len() == MAP_HEIGHT && self.siblings.len() == MAP_HEIGHT
    }

    /// Root and key obtained by placing `value` at the slot this witness encodes.
    pub fn compute_root_and_key(&self, value: &Field) -> (Field, Field) {
        let mut current = *value;
        let mut key = U256::zero();

        for (level, (is_left, sibling)) in self.is_lefts.iter().zip(&self.siblings).enumerate() {
            if *is_left {
                current = hash_node(&current, sibling);
            } else {
                current = hash_node(sibling, &current);
                if level < MAP_HEIGHT {
                    key = key | (U256::one() << level);
                }
            }
        }
        (current, index_to_key(key))
    }
}
