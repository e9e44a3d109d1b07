//! DAO deployment configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use moove_types::{Address, DaoParams};
use moove_utils::LogFormat;

use crate::engine::DaoAddresses;
use crate::error::ConfigError;

/// Everything needed to deploy a DAO.
///
/// Can be loaded from a TOML file via [`DaoConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaoConfig {
    /// The team address; governs the DAO.
    #[serde(default = "default_owner")]
    pub owner: Address,

    #[serde(default = "default_dao_address")]
    pub dao_address: Address,

    #[serde(default = "default_token_address")]
    pub token_address: Address,

    #[serde(default = "default_staking_address")]
    pub staking_address: Address,

    #[serde(default = "default_treasury_address")]
    pub treasury_address: Address,

    #[serde(default)]
    pub log_format: LogFormat,

    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Constructor parameters for the token, staking and governance rules.
    #[serde(default)]
    pub params: DaoParams,
}

fn default_owner() -> Address {
    Address::new("0x0000000000000000000000000000000000000001")
}

fn default_dao_address() -> Address {
    Address::new("0x00000000000000000000000000000000000000da")
}

fn default_token_address() -> Address {
    Address::new("0x00000000000000000000000000000000000000a1")
}

fn default_staking_address() -> Address {
    Address::new("0x00000000000000000000000000000000000000a2")
}

fn default_treasury_address() -> Address {
    Address::new("0x00000000000000000000000000000000000000a3")
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl DaoConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn addresses(&self) -> DaoAddresses {
        DaoAddresses {
            dao: self.dao_address.clone(),
            owner: self.owner.clone(),
            token: self.token_address.clone(),
            staking: self.staking_address.clone(),
            treasury: self.treasury_address.clone(),
        }
    }
}

impl Default for DaoConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            dao_address: default_dao_address(),
            token_address: default_token_address(),
            staking_address: default_staking_address(),
            treasury_address: default_treasury_address(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            params: DaoParams::default(),
        }
    }
}
