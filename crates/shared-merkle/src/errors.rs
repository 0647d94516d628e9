use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MerkleError {
    #[error("Invalid tree height: {height} (must be 1..={max})")]
    InvalidHeight { height: usize, max: usize },

    #[error("Leaf index {index} out of range (tree holds {leaf_count} leaves)")]
    IndexOutOfRange { index: u64, leaf_count: u64 },
}
