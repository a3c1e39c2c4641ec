//! Configuration for the fee burner
//!
//! Loaded from TOML. Every field except the addresses has a default, so a
//! minimal file only names the deployment:
//!
//! ```toml
//! lrc_token = "0xbbbbca6a901c926f240b89eacb641d8aec7aeafd"
//! burn_address = "0x00000000000000000000000000000000000000fe"
//! order_owner = "0x00000000000000000000000000000000000000bb"
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// LRC token on Ethereum mainnet
pub const MAINNET_LRC: Address = address!("bbbbca6a901c926f240b89eacb641d8aec7aeafd");

/// Price poll cadence of the reference deployment (12 hours)
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 12 * 60 * 60;

/// Burn manager configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnerConfig {
    /// Token that is bought with fees and burned
    #[serde(default = "default_lrc_token")]
    pub lrc_token: Address,
    /// Owner whose fee balances are sold and burned
    pub burn_address: Address,
    /// Account sell orders are submitted under
    pub order_owner: Address,
    /// Seconds between price polls
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Fiat currency quotes are requested in
    #[serde(default = "default_quote_currency")]
    pub quote_currency: String,
    /// Symbol of the burn token in quote lists
    #[serde(default = "default_base_symbol")]
    pub base_symbol: String,
}

fn default_lrc_token() -> Address {
    MAINNET_LRC
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_quote_currency() -> String {
    "USD".to_string()
}

fn default_base_symbol() -> String {
    "LRC".to_string()
}

impl Default for BurnerConfig {
    fn default() -> Self {
        Self {
            lrc_token: default_lrc_token(),
            burn_address: Address::ZERO,
            order_owner: Address::ZERO,
            poll_interval_secs: default_poll_interval(),
            quote_currency: default_quote_currency(),
            base_symbol: default_base_symbol(),
        }
    }
}

impl BurnerConfig {
    /// Load and validate configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is usable
    ///
    /// # Returns
    ///
    /// * `Ok(())` - All addresses are set and the poll interval is non-zero
    /// * `Err(ConfigError::Invalid)` - Otherwise
    pub fn validate(&self) -> Result<(), ConfigError> {
        let addresses = [
            ("lrc_token", self.lrc_token),
            ("burn_address", self.burn_address),
            ("order_owner", self.order_owner),
        ];
        for (name, value) in addresses {
            if value == Address::ZERO {
                return Err(ConfigError::Invalid {
                    message: format!("{name} must not be the zero address"),
                });
            }
        }

        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                message: "poll_interval_secs must be greater than zero".to_string(),
            });
        }
        if self.base_symbol.is_empty() {
            return Err(ConfigError::Invalid {
                message: "base_symbol must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Poll cadence as a [`Duration`]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
