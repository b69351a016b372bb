//! Token amounts <-> Cairo `u256` limb pairs.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::error::{GiveawayError, Result};
use crate::numeric::NumericInput;

/// Largest decimal precision whose scale factor still fits in 256 bits.
pub const MAX_DECIMALS: u32 = 77;

/// Cairo `core::integer::u256`, transmitted as two 128-bit limbs.
///
/// `value = low + high * 2^128`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct U256 {
    pub low: u128,
    pub high: u128,
}

impl U256 {
    pub const ZERO: U256 = U256 { low: 0, high: 0 };

    /// Split a big integer into limbs. Fails above 2^256 - 1.
    pub fn from_biguint(value: &BigUint) -> Result<Self> {
        let bytes = value.to_bytes_be();
        if bytes.len() > 32 {
            return Err(GiveawayError::InvalidAmount(format!(
                "{} exceeds the u256 range",
                value
            )));
        }
        let mut padded = [0u8; 32];
        padded[32 - bytes.len()..].copy_from_slice(&bytes);

        let mut high = [0u8; 16];
        let mut low = [0u8; 16];
        high.copy_from_slice(&padded[..16]);
        low.copy_from_slice(&padded[16..]);

        Ok(Self {
            low: u128::from_be_bytes(low),
            high: u128::from_be_bytes(high),
        })
    }

    /// Build from raw limbs as returned by a view call or event.
    pub fn from_limbs(low: impl Into<NumericInput>, high: impl Into<NumericInput>) -> Result<Self> {
        Ok(Self {
            low: limb_to_u128(&low.into())?,
            high: limb_to_u128(&high.into())?,
        })
    }

    pub fn to_biguint(&self) -> BigUint {
        (BigUint::from(self.high) << 128u32) + BigUint::from(self.low)
    }

    /// The two calldata elements, low limb first, as decimal strings.
    pub fn to_calldata(&self) -> [String; 2] {
        [self.low.to_string(), self.high.to_string()]
    }

    pub fn is_zero(&self) -> bool {
        self.low == 0 && self.high == 0
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_biguint())
    }
}

fn limb_to_u128(raw: &NumericInput) -> Result<u128> {
    let value = raw.to_biguint()?;
    let bytes = value.to_bytes_be();
    if bytes.len() > 16 {
        return Err(GiveawayError::InvalidNumber(format!(
            "limb {} does not fit in 128 bits",
            raw
        )));
    }
    let mut padded = [0u8; 16];
    padded[16 - bytes.len()..].copy_from_slice(&bytes);
    Ok(u128::from_be_bytes(padded))
}

fn check_decimals(decimals: u32) -> Result<()> {
    if decimals > MAX_DECIMALS {
        return Err(GiveawayError::InvalidDecimals(decimals));
    }
    Ok(())
}

/// Scale a human-entered decimal amount to the token's base unit.
///
/// Fractional digits beyond `decimals` are truncated, never rounded.
pub fn parse_token_amount(amount: &str, decimals: u32) -> Result<BigUint> {
    check_decimals(decimals)?;

    let trimmed = amount.trim();
    let invalid = || GiveawayError::InvalidAmount(amount.to_string());

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let decimals = decimals as usize;
    let mut digits = String::with_capacity(whole.len() + decimals + 1);
    digits.push_str(if whole.is_empty() { "0" } else { whole });
    let kept = &fraction[..fraction.len().min(decimals)];
    digits.push_str(kept);
    digits.extend(std::iter::repeat('0').take(decimals - kept.len()));

    BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)
}

/// Render a base-unit integer as a human-readable decimal string.
///
/// Trailing zeros are stripped. Non-zero values below 0.01 keep at most
/// six significant fractional digits.
pub fn format_token_amount(value: &BigUint, decimals: u32) -> Result<String> {
    check_decimals(decimals)?;

    let divisor = BigUint::from(10u32).pow(decimals);
    let whole = value / &divisor;
    let remainder = value % &divisor;

    let remainder_str = remainder.to_string();
    if remainder_str == "0" {
        return Ok(whole.to_string());
    }

    let width = decimals as usize;
    let padded = format!("{:0>width$}", remainder_str, width = width);
    let mut fraction = padded.trim_end_matches('0');

    let whole_str = whole.to_string();
    if whole_str == "0" && fraction.starts_with("00") {
        let leading_zeros = fraction.len() - fraction.trim_start_matches('0').len();
        let end = (leading_zeros + 6).min(fraction.len());
        fraction = fraction[..end].trim_end_matches('0');
    }

    Ok(format!("{}.{}", whole_str, fraction))
}

/// Encode a decimal token amount as a `u256` at the given precision.
pub fn encode(amount: &str, decimals: u32) -> Result<U256> {
    let scaled = parse_token_amount(amount, decimals)?;
    U256::from_biguint(&scaled)
}

/// Decode a limb pair back to a decimal amount, reporting malformed input.
pub fn try_decode(
    low: impl Into<NumericInput>,
    high: impl Into<NumericInput>,
    decimals: u32,
) -> Result<String> {
    check_decimals(decimals)?;
    let value = U256::from_limbs(low, high)?;
    format_token_amount(&value.to_biguint(), decimals)
}

/// Display-side decode: malformed limbs render as `"0"`.
pub fn decode(low: impl Into<NumericInput>, high: impl Into<NumericInput>, decimals: u32) -> String {
    let low = low.into();
    let high = high.into();
    match try_decode(low.clone(), high.clone(), decimals) {
        Ok(amount) => amount,
        Err(e) => {
            warn!("Falling back to 0 for u256 ({}, {}): {}", low, high, e);
            "0".to_string()
        }
    }
}
