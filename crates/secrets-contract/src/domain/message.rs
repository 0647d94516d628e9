//! # Message Canonicalizer
//!
//! Pure, total rewrite of a six-bit flag vector. `flag1` is bit 0,
//! `flag6` is bit 5; higher bits are dropped before any rule runs.
//!
//! | Priority | Predicate (on the input) | Output |
//! |----------|--------------------------|--------|
//! | 1 | flag1 | `0b000001` |
//! | 2 | flag2 | input with flag3 set |
//! | 3 | flag4 | input with flag5 and flag6 cleared |
//! | 4 | otherwise | input |
//!
//! Predicates are evaluated once on the masked input and exactly one rule
//! fires, so the output never depends on rule order.

use serde::{Deserialize, Serialize};
use shared_crypto::{hash_fields, Field};

pub const FLAG_BITS: u32 = 6;
pub const FLAG_MASK: u8 = (1 << FLAG_BITS) - 1;

pub const FLAG_1: u8 = 1 << 0;
pub const FLAG_2: u8 = 1 << 1;
pub const FLAG_3: u8 = 1 << 2;
pub const FLAG_4: u8 = 1 << 3;
pub const FLAG_5: u8 = 1 << 4;
pub const FLAG_6: u8 = 1 << 5;

/// The rewrite selected for an input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RewriteRule {
    /// flag1 set: only flag1 survives.
    IsolateFlag1,
    /// flag2 set: flag3 forced on.
    ForceFlag3,
    /// flag4 set: flag5 and flag6 forced off.
    ClearFlags5And6,
    /// No rule applies.
    Unchanged,
}

impl RewriteRule {
    pub fn select(flags: u8) -> Self {
        match (flags & FLAG_1 != 0, flags & FLAG_2 != 0, flags & FLAG_4 != 0) {
            (true, _, _) => RewriteRule::IsolateFlag1,
            (false, true, _) => RewriteRule::ForceFlag3,
            (false, false, true) => RewriteRule::ClearFlags5And6,
            (false, false, false) => RewriteRule::Unchanged,
        }
    }

    pub fn apply(self, flags: u8) -> u8 {
        match self {
            RewriteRule::IsolateFlag1 => FLAG_1,
            RewriteRule::ForceFlag3 => flags | FLAG_3,
            RewriteRule::ClearFlags5And6 => flags & !(FLAG_5 | FLAG_6),
            RewriteRule::Unchanged => flags,
        }
    }
}

/// A canonicalized six-bit message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalMessage(u8);

impl CanonicalMessage {
    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn to_field(self) -> Field {
        Field::from_u64(u64::from(self.0))
    }

    /// Commitment stored in the message map.
    pub fn commitment(self) -> Field {
        hash_fields(&[self.to_field()])
    }
}

/// Canonicalize the low six bits of a flag vector.
pub fn canonicalize_bits(bits: u8) -> u8 {
    let flags = bits & FLAG_MASK;
    RewriteRule::select(flags).apply(flags)
}

/// Canonicalize a raw message field.
pub fn canonicalize(message: &Field) -> CanonicalMessage {
    let flags = (message.low_u64() & u64::from(FLAG_MASK)) as u8;
    CanonicalMessage(canonicalize_bits(flags))
}
