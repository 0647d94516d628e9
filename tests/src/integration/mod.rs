//! # Integration Tests
//!
//! End-to-end flows through `SecretsContractService`.

pub mod flows;
