//! Cairo short-string packing and other felt helpers.
//!
//! A short string is up to 31 characters packed big-endian into a single
//! field element, one base-256 digit per character code. Zero is the empty
//! string.

use sha3::{Digest, Keccak256};
use starknet_crypto::Felt;
use tracing::warn;

use crate::error::{GiveawayError, Result};
use crate::numeric::NumericInput;

/// Maximum number of characters a short string can hold.
pub const SHORT_STRING_MAX_LEN: usize = 31;

/// Pack `text` into a field element, dropping everything past character 31.
///
/// Each UTF-16 code unit is one base-256 digit, so Latin-1 text packs one
/// byte per character. Code units above 0xFF carry into the previous digit
/// and do not unpack; `try_string_to_felt` rejects them.
pub fn string_to_felt(text: &str) -> Felt {
    let base = Felt::from(256u64);
    text.encode_utf16()
        .take(SHORT_STRING_MAX_LEN)
        .fold(Felt::ZERO, |value, unit| value * base + Felt::from(unit as u64))
}

/// Pack `text` into a field element, rejecting input that would not
/// survive the round trip.
pub fn try_string_to_felt(text: &str) -> Result<Felt> {
    if text.chars().any(|c| c as u32 > 0xFF) {
        return Err(GiveawayError::UnencodableChar(text.to_string()));
    }
    let len = text.chars().count();
    if len > SHORT_STRING_MAX_LEN {
        return Err(GiveawayError::TooLong { len });
    }
    Ok(string_to_felt(text))
}

/// Unpack a short string, reporting values that do not parse.
pub fn try_felt_to_string(raw: impl Into<NumericInput>) -> Result<String> {
    let value = raw.into().to_biguint()?;
    if value.bits() == 0 {
        return Ok(String::new());
    }

    let mut hex_str = value.to_str_radix(16);
    if hex_str.len() % 2 != 0 {
        hex_str.insert(0, '0');
    }
    let bytes = hex::decode(&hex_str).map_err(|e| GiveawayError::InvalidNumber(e.to_string()))?;
    if bytes.len() > 32 {
        return Err(GiveawayError::InvalidNumber(format!(
            "0x{} is wider than a field element",
            hex_str
        )));
    }

    let text: String = bytes
        .iter()
        .filter(|&&b| b != 0)
        .map(|&b| b as char)
        .collect();
    let trimmed = text.trim();

    if trimmed.is_empty() {
        // Nothing printable: show the number itself
        return Ok(value.to_string());
    }
    Ok(trimmed.to_string())
}

/// Display-side unpack: anything unparsable comes back as the raw input.
pub fn felt_to_string(raw: impl Into<NumericInput>) -> String {
    let raw = raw.into();
    match try_felt_to_string(raw.clone()) {
        Ok(text) => text,
        Err(e) => {
            warn!("Could not decode short string {}: {}", raw, e);
            raw.to_string()
        }
    }
}

/// Convert hex string to Felt
pub fn hex_to_felt(hex_str: &str) -> Result<Felt> {
    let trimmed = hex_str.trim();
    let cleaned = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(GiveawayError::InvalidNumber(format!("not a hex string: {:?}", hex_str)));
    }
    Felt::from_hex(&format!("0x{}", cleaned))
        .map_err(|e| GiveawayError::InvalidNumber(format!("{}: {}", hex_str, e)))
}

/// Convert Felt to hex string with 0x prefix
pub fn felt_to_hex(felt: &Felt) -> String {
    felt.to_hex_string()
}

/// Starknet keccak: Keccak-256 masked to the low 250 bits.
pub fn starknet_keccak(input: &[u8]) -> Felt {
    let mut hasher = Keccak256::new();
    hasher.update(input);
    let result = hasher.finalize();

    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&result);
    bytes[0] &= 0x03;
    Felt::from_bytes_be(&bytes)
}

/// Entrypoint selector for a contract function name.
pub fn selector_from_name(name: &str) -> Felt {
    starknet_keccak(name.as_bytes())
}
