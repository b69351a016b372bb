//! Claim-code hashing service
//!
//! Serves `POST /api/hash-codes` for the giveaway front end: plaintext claim
//! codes in, Poseidon commitments out.
//!
//! Usage:
//!   cargo run --bin hash_service [config.json]

use dotenv::dotenv;
use giveaway_codec::{hash_service, AppConfig};
use std::env;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    giveaway_codec::init_logging();

    // Load environment variables
    dotenv().ok();

    let config_path = env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config = AppConfig::load(&config_path)?;
    config.validate()?;

    info!("Configuration:");
    info!("  Bind address: {}", config.bind_address);
    info!("  Max codes per request: {}", config.max_codes_per_request);

    tokio::select! {
        result = hash_service::serve(&config) => {
            if let Err(e) = result {
                error!("Hash service failed: {}", e);
                return Err(e.into());
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, stopping hash service");
        }
    }

    Ok(())
}
