//! # Domain Module
//!
//! Contract state, the canonicalizer, the three authenticated structures
//! and the transitions that tie them together.

pub mod entities;
pub mod errors;
pub mod message;
pub mod message_store;
pub mod nullifier_ledger;
pub mod registry;
pub mod transition;

pub use entities::*;
pub use errors::*;
pub use message::{canonicalize, canonicalize_bits, CanonicalMessage, RewriteRule};
pub use nullifier_ledger::{ConsumedNullifier, NullifierLedger, NULLIFIER_UNUSED, NULLIFIER_USED};
pub use registry::identity_leaf;
pub use transition::StagedTransition;
