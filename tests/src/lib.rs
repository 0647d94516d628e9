//! # Secret-Messages Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # ContractHarness, tracing setup
//! ├── integration/      # End-to-end contract flows
//! │   └── flows.rs
//! └── exploits/         # Attack simulations
//!     ├── replay.rs     # Nullifier and signature replay
//!     ├── witnesses.rs  # Stale, forged and misplaced witnesses
//!     └── admin.rs      # Privileged setter abuse
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p secrets-tests
//!
//! # By category
//! cargo test -p secrets-tests integration::
//! cargo test -p secrets-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p secrets-tests
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod fixtures;
pub mod integration;
