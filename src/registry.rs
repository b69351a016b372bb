//! Supported ERC-20 tokens on Starknet mainnet.

use serde::Serialize;
use starknet_crypto::Felt;

use crate::error::{GiveawayError, Result};
use crate::felt::{felt_to_hex, hex_to_felt};

/// Static description of a supported token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenDescriptor {
    pub symbol: &'static str,
    #[serde(rename = "address")]
    pub contract_address: &'static str,
    #[serde(rename = "name")]
    pub display_name: &'static str,
    pub decimals: u32,
    pub icon: &'static str,
}

impl TokenDescriptor {
    /// Contract address as a field element, ready for calldata.
    pub fn address_felt(&self) -> Result<Felt> {
        hex_to_felt(self.contract_address)
    }
}

static SUPPORTED_TOKENS: [TokenDescriptor; 5] = [
    TokenDescriptor {
        symbol: "STRK",
        contract_address: "0x04718f5a0fc34cc1af16a1cdee98ffb20c31f5cd61d6ab07201858f4287c938d",
        display_name: "Starknet Token",
        decimals: 18,
        icon: "💎",
    },
    TokenDescriptor {
        symbol: "USDC",
        contract_address: "0x053c91253bc9682c04929ca02ed00b3e423f6710d2ee7e0d5ebb06f3ecf368a8",
        display_name: "USD Coin",
        decimals: 6,
        icon: "💵",
    },
    TokenDescriptor {
        symbol: "USDT",
        contract_address: "0x068f5c6a61780768455de69077e07e89787839bf8166decfbf92b645209c0fb8",
        display_name: "Tether USD",
        decimals: 6,
        icon: "💲",
    },
    TokenDescriptor {
        symbol: "ETH",
        contract_address: "0x049d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7",
        display_name: "Ethereum",
        decimals: 18,
        icon: "Ξ",
    },
    TokenDescriptor {
        symbol: "WBTC",
        contract_address: "0x03fe2b97c1fd336e750087d68b9b867997fd64a2661ff3ca5a7c771641e8e7ac",
        display_name: "Wrapped Bitcoin",
        decimals: 8,
        icon: "₿",
    },
];

/// All supported tokens, in display order.
pub fn supported_tokens() -> &'static [TokenDescriptor] {
    &SUPPORTED_TOKENS
}

/// Canonical form of a contract address: lower-case, `0x`-prefixed, no
/// leading zeros (but at least one digit).
pub fn normalize_address(address: &str) -> String {
    let lowered = address.trim().to_lowercase();
    let digits = lowered.strip_prefix("0x").unwrap_or(&lowered);
    let stripped = digits.trim_start_matches('0');
    if stripped.is_empty() {
        "0x0".to_string()
    } else {
        format!("0x{}", stripped)
    }
}

pub fn lookup_by_symbol(symbol: &str) -> Option<&'static TokenDescriptor> {
    let symbol = symbol.trim();
    SUPPORTED_TOKENS
        .iter()
        .find(|token| token.symbol.eq_ignore_ascii_case(symbol))
}

pub fn lookup_by_address(address: &str) -> Option<&'static TokenDescriptor> {
    let wanted = normalize_address(address);
    SUPPORTED_TOKENS
        .iter()
        .find(|token| normalize_address(token.contract_address) == wanted)
}

/// Look up a token from an address read back from the chain.
pub fn lookup_by_felt(address: &Felt) -> Option<&'static TokenDescriptor> {
    lookup_by_address(&felt_to_hex(address))
}

/// Like [`lookup_by_symbol`] but a miss is an error.
pub fn require_symbol(symbol: &str) -> Result<&'static TokenDescriptor> {
    lookup_by_symbol(symbol).ok_or_else(|| GiveawayError::UnknownToken(symbol.to_string()))
}
