//! # Contract Configuration
//!
//! Registry capacity, registry tree height and the optional admin
//! identity allowed to use the privileged setters.
//!
//! # Example
//!
//! ```ignore
//! use secrets_contract::ContractConfig;
//!
//! let config = ContractConfig::default()
//!     .with_admin(admin.identity())
//!     .with_max_eligible_addresses(50);
//! config.validate().expect("Valid config");
//! ```

use crate::domain::{ContractError, ADDRESS_TREE_HEIGHT, MAX_ELIGIBLE_ADDRESSES};
use serde::{Deserialize, Serialize};
use shared_crypto::Identity;
use shared_merkle::MAX_TREE_HEIGHT;

/// Highest accepted registry tree height.
pub const MAX_ADDRESS_TREE_HEIGHT: usize = 32;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractConfig {
    /// Maximum number of eligible addresses (registry capacity).
    pub max_eligible_addresses: u64,
    /// Height of the eligible-address tree (`2^height` slots).
    pub address_tree_height: usize,
    /// Identity whose signatures authorize the privileged setters.
    /// `None` disables them entirely.
    pub admin: Option<Identity>,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            max_eligible_addresses: MAX_ELIGIBLE_ADDRESSES,
            address_tree_height: ADDRESS_TREE_HEIGHT,
            admin: None,
        }
    }
}

impl ContractConfig {
    /// Small registry for fast tests.
    pub fn for_testing() -> Self {
        Self {
            max_eligible_addresses: 4,
            address_tree_height: 3,
            admin: None,
        }
    }

    /// Parse from JSON and validate.
    pub fn from_json(json: &str) -> Result<Self, ContractError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ContractError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ContractError> {
        if self.max_eligible_addresses == 0 {
            return Err(ContractError::InvalidConfig(
                "max_eligible_addresses cannot be 0".to_string(),
            ));
        }

        if self.address_tree_height == 0
            || self.address_tree_height > MAX_ADDRESS_TREE_HEIGHT
            || self.address_tree_height > MAX_TREE_HEIGHT
        {
            return Err(ContractError::InvalidConfig(format!(
                "address_tree_height must be between 1 and {}, got {}",
                MAX_ADDRESS_TREE_HEIGHT, self.address_tree_height
            )));
        }

        let slots = 1u64 << self.address_tree_height;
        if self.max_eligible_addresses > slots {
            return Err(ContractError::InvalidConfig(format!(
                "max_eligible_addresses {} exceeds tree capacity {}",
                self.max_eligible_addresses, slots
            )));
        }

        Ok(())
    }

    pub fn with_admin(mut self, admin: Identity) -> Self {
        self.admin = Some(admin);
        self
    }

    pub fn with_max_eligible_addresses(mut self, max: u64) -> Self {
        self.max_eligible_addresses = max;
        self
    }

    pub fn with_address_tree_height(mut self, height: usize) -> Self {
        self.address_tree_height = height;
        self
    }
}
