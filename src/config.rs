//! Runtime configuration: `config.json` plus environment overrides.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::error::{GiveawayError, Result};
use crate::felt::hex_to_felt;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_hash_gateway_url")]
    pub hash_gateway_url: String,
    #[serde(default)]
    pub giveaway_contract_address: String,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_max_codes_per_request")]
    pub max_codes_per_request: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_hash_gateway_url() -> String {
    "http://127.0.0.1:3001/api/hash-codes".to_string()
}

fn default_bind_address() -> String {
    "127.0.0.1:3001".to_string()
}

fn default_max_codes_per_request() -> usize {
    1000
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            hash_gateway_url: default_hash_gateway_url(),
            giveaway_contract_address: String::new(),
            bind_address: default_bind_address(),
            max_codes_per_request: default_max_codes_per_request(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Read `path` if it exists, then apply environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let raw = fs::read_to_string(path)?;
            serde_json::from_str(&raw)?
        } else {
            debug!("{} not found, using defaults", path.display());
            Self::default()
        };

        config.apply_env();
        Ok(config)
    }

    /// Parse a JSON document without touching the environment.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = env::var("HASH_GATEWAY_URL") {
            info!("Hash gateway URL overridden from environment");
            self.hash_gateway_url = url;
        }
        if let Ok(address) = env::var("GIVEAWAY_CONTRACT_ADDRESS") {
            self.giveaway_contract_address = address;
        }
        if let Ok(bind) = env::var("HASH_SERVICE_BIND") {
            self.bind_address = bind;
        }
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.hash_gateway_url)?;

        if !self.giveaway_contract_address.is_empty() {
            hex_to_felt(&self.giveaway_contract_address).map_err(|_| {
                GiveawayError::Config(format!(
                    "giveaway_contract_address is not a valid address: {}",
                    self.giveaway_contract_address
                ))
            })?;
        }
        if self.max_codes_per_request == 0 {
            return Err(GiveawayError::Config(
                "max_codes_per_request must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(GiveawayError::Config(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The giveaway contract address, required before building calls.
    pub fn contract_address(&self) -> Result<&str> {
        if self.giveaway_contract_address.is_empty() {
            return Err(GiveawayError::Config(
                "GIVEAWAY_CONTRACT_ADDRESS is not configured".to_string(),
            ));
        }
        Ok(&self.giveaway_contract_address)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
