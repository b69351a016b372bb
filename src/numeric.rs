//! Normalization of raw numeric values coming back from the chain.
//!
//! View calls and events hand back numbers as decimal strings, `0x` hex
//! strings or field elements depending on the SDK path they came through.
//! Everything is funnelled through [`NumericInput::to_biguint`] before any
//! arithmetic happens.

use num_bigint::BigUint;
use serde::{Deserialize, Deserializer};
use starknet_crypto::Felt;
use std::fmt;

use crate::error::{GiveawayError, Result};

/// A raw unsigned number in one of the accepted wire representations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumericInput {
    /// Decimal digits or a `0x`-prefixed hex string.
    Text(String),
    Big(BigUint),
    Felt(Felt),
}

impl NumericInput {
    /// Convert to the canonical big integer.
    pub fn to_biguint(&self) -> Result<BigUint> {
        match self {
            NumericInput::Text(text) => parse_unsigned(text),
            NumericInput::Big(value) => Ok(value.clone()),
            NumericInput::Felt(felt) => Ok(felt_to_biguint(felt)),
        }
    }
}

impl fmt::Display for NumericInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericInput::Text(text) => write!(f, "{}", text),
            NumericInput::Big(value) => write!(f, "{}", value),
            NumericInput::Felt(felt) => write!(f, "{}", felt.to_hex_string()),
        }
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(value: String) -> Self {
        NumericInput::Text(value)
    }
}

impl From<&String> for NumericInput {
    fn from(value: &String) -> Self {
        NumericInput::Text(value.clone())
    }
}

impl From<u64> for NumericInput {
    fn from(value: u64) -> Self {
        NumericInput::Big(BigUint::from(value))
    }
}

impl From<u128> for NumericInput {
    fn from(value: u128) -> Self {
        NumericInput::Big(BigUint::from(value))
    }
}

impl From<BigUint> for NumericInput {
    fn from(value: BigUint) -> Self {
        NumericInput::Big(value)
    }
}

impl From<Felt> for NumericInput {
    fn from(value: Felt) -> Self {
        NumericInput::Felt(value)
    }
}

impl<'de> Deserialize<'de> for NumericInput {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(u64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Ok(NumericInput::Text(text)),
            Raw::Int(value) => Ok(NumericInput::from(value)),
        }
    }
}

/// Parse a decimal or `0x`-prefixed hex string into an unsigned integer.
///
/// Signs, separators and empty digit strings are rejected.
pub fn parse_unsigned(text: &str) -> Result<BigUint> {
    let trimmed = text.trim();
    let (digits, radix) = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (trimmed, 10),
    };

    let valid = !digits.is_empty()
        && digits.chars().all(|c| {
            if radix == 16 {
                c.is_ascii_hexdigit()
            } else {
                c.is_ascii_digit()
            }
        });
    if !valid {
        return Err(GiveawayError::InvalidNumber(text.to_string()));
    }

    BigUint::parse_bytes(digits.as_bytes(), radix)
        .ok_or_else(|| GiveawayError::InvalidNumber(text.to_string()))
}

pub(crate) fn felt_to_biguint(felt: &Felt) -> BigUint {
    BigUint::from_bytes_be(&felt.to_bytes_be())
}

/// Convert a big integer to a field element.
///
/// Values wider than 32 bytes are rejected; values between the field prime
/// and 2^256 are reduced by the field arithmetic.
pub(crate) fn biguint_to_felt(value: &BigUint) -> Result<Felt> {
    let bytes = value.to_bytes_be();
    if bytes.len() > 32 {
        return Err(GiveawayError::InvalidNumber(format!(
            "{} does not fit in a field element",
            value
        )));
    }
    let mut padded = [0u8; 32];
    padded[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(Felt::from_bytes_be(&padded))
}
