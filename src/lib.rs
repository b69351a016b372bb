pub mod calldata;
pub mod config;
pub mod error;
pub mod felt;
pub mod hash_gateway;
pub mod hash_service;
pub mod numeric;
pub mod registry;
pub mod types;
pub mod u256;

// Re-export commonly used types
pub use calldata::{
    Call, GiveawayDraft, Winner,
    approve_call, balance_of_call, claim_prize_call, create_giveaway_call,
    get_giveaway_id_by_name_call, get_giveaway_info_call, has_address_claimed_call,
    is_prize_claimed_call, reclaim_funds_call, transfer_call,
};
pub use config::AppConfig;
pub use error::{GiveawayError, Result};
pub use felt::{
    felt_to_hex, felt_to_string, hex_to_felt, selector_from_name, string_to_felt,
    try_felt_to_string, try_string_to_felt,
};
pub use hash_gateway::HashGatewayClient;
pub use hash_service::{hash_claim_code, HashServiceState};
pub use numeric::NumericInput;
pub use registry::{
    lookup_by_address, lookup_by_felt, lookup_by_symbol, normalize_address, supported_tokens,
    TokenDescriptor,
};
pub use types::{
    FundsReclaimedEvent, GiveawayInfo, GiveawayStatus, HashCodesRequest, HashCodesResponse,
    PrizeClaimedEvent, PublicGiveawayInfo,
};
pub use u256::{decode, encode, format_token_amount, parse_token_amount, try_decode, U256};

pub use starknet_crypto::Felt;

/// Initialize logging for the library
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}
