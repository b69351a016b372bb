use chrono::Utc;
use serde::{Deserialize, Serialize};
use starknet_crypto::Felt;

use crate::error::{GiveawayError, Result};
use crate::felt::felt_to_string;
use crate::numeric::{biguint_to_felt, felt_to_biguint, NumericInput};
use crate::u256::{decode, U256};

/// Request body of the claim-code hashing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashCodesRequest {
    pub codes: Vec<String>,
}

/// Response body of the claim-code hashing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashCodesResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashed_codes: Option<Vec<String>>,
}

/// Error body returned by the hashing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Lifecycle of a giveaway as shown to its creator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GiveawayStatus {
    Active,
    Expired,
    Completed,
}

/// Result of the `get_giveaway_info` view call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiveawayInfo {
    /// Name as a packed short string
    pub name: Felt,
    pub creator: Felt,
    pub total_amount: U256,
    pub num_winners: u32,
    pub claimed_count: u32,
    pub claimed_amount: U256,
    /// Unix seconds
    pub expiry_time: u64,
    pub is_active: bool,
}

/// Number of felts in a serialized `Giveaway` struct.
const GIVEAWAY_INFO_LEN: usize = 10;

impl GiveawayInfo {
    /// Decode the flat felt array returned by the view call.
    ///
    /// Layout: `[name, creator, total.low, total.high, num_winners,
    /// claimed_count, claimed.low, claimed.high, expiry_time, is_active]`.
    pub fn from_felts(felts: &[Felt]) -> Result<Self> {
        if felts.len() < GIVEAWAY_INFO_LEN {
            return Err(GiveawayError::InvalidNumber(format!(
                "giveaway info needs {} felts, got {}",
                GIVEAWAY_INFO_LEN,
                felts.len()
            )));
        }

        Ok(Self {
            name: felts[0],
            creator: felts[1],
            total_amount: U256::from_limbs(felts[2], felts[3])?,
            num_winners: felt_to_u32(&felts[4], "num_winners")?,
            claimed_count: felt_to_u32(&felts[5], "claimed_count")?,
            claimed_amount: U256::from_limbs(felts[6], felts[7])?,
            expiry_time: felt_to_u64(&felts[8], "expiry_time")?,
            is_active: felts[9] != Felt::ZERO,
        })
    }

    pub fn display_name(&self) -> String {
        felt_to_string(self.name)
    }

    pub fn display_total(&self, decimals: u32) -> String {
        decode(self.total_amount.low, self.total_amount.high, decimals)
    }

    pub fn display_claimed(&self, decimals: u32) -> String {
        decode(self.claimed_amount.low, self.claimed_amount.high, decimals)
    }

    /// Status at `now` (unix seconds).
    pub fn status_at(&self, now: i64) -> GiveawayStatus {
        if self.claimed_count == self.num_winners {
            GiveawayStatus::Completed
        } else if now > self.expiry_time as i64 || !self.is_active {
            GiveawayStatus::Expired
        } else {
            GiveawayStatus::Active
        }
    }

    pub fn status(&self) -> GiveawayStatus {
        self.status_at(Utc::now().timestamp())
    }
}

/// Result of the `get_public_giveaway_info` view call (amounts withheld)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicGiveawayInfo {
    pub name: Felt,
    pub creator: Felt,
    pub num_winners: u32,
    pub claimed_count: u32,
    pub expiry_time: u64,
    pub is_active: bool,
}

impl PublicGiveawayInfo {
    /// Layout: `[name, creator, num_winners, claimed_count, expiry_time, is_active]`.
    pub fn from_felts(felts: &[Felt]) -> Result<Self> {
        if felts.len() < 6 {
            return Err(GiveawayError::InvalidNumber(format!(
                "public giveaway info needs 6 felts, got {}",
                felts.len()
            )));
        }

        Ok(Self {
            name: felts[0],
            creator: felts[1],
            num_winners: felt_to_u32(&felts[2], "num_winners")?,
            claimed_count: felt_to_u32(&felts[3], "claimed_count")?,
            expiry_time: felt_to_u64(&felts[4], "expiry_time")?,
            is_active: felts[5] != Felt::ZERO,
        })
    }

    pub fn display_name(&self) -> String {
        felt_to_string(self.name)
    }

    pub fn remaining_prizes(&self) -> u32 {
        self.num_winners.saturating_sub(self.claimed_count)
    }
}

fn felt_to_u64(felt: &Felt, field: &str) -> Result<u64> {
    let value = felt_to_biguint(felt);
    let digits = value.to_u64_digits();
    match digits.as_slice() {
        [] => Ok(0),
        [single] => Ok(*single),
        _ => Err(GiveawayError::InvalidNumber(format!(
            "{} does not fit in 64 bits: {}",
            field, value
        ))),
    }
}

fn felt_to_u32(felt: &Felt, field: &str) -> Result<u32> {
    let value = felt_to_u64(felt, field)?;
    u32::try_from(value)
        .map_err(|_| GiveawayError::InvalidNumber(format!("{} does not fit in 32 bits: {}", field, value)))
}

/// `PrizeClaimed` event emitted by `claim_prize`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrizeClaimedEvent {
    pub giveaway_id: Option<u32>,
    pub code_hash: Option<Felt>,
    pub winner: Option<Felt>,
    pub amount: U256,
}

impl PrizeClaimedEvent {
    /// Decode event data `[giveaway_id, code_hash, winner, amount.low, amount.high]`.
    ///
    /// The amount is always taken from the last two elements; the leading
    /// fields are only filled in when the full layout is present.
    pub fn from_data(data: &[NumericInput]) -> Result<Self> {
        let amount = trailing_u256(data, "PrizeClaimed")?;
        match data {
            [giveaway_id, code_hash, winner, _, _] => Ok(Self {
                giveaway_id: Some(input_to_u32(giveaway_id, "giveaway_id")?),
                code_hash: Some(input_to_felt(code_hash)?),
                winner: Some(input_to_felt(winner)?),
                amount,
            }),
            _ => Ok(Self {
                giveaway_id: None,
                code_hash: None,
                winner: None,
                amount,
            }),
        }
    }

    pub fn display_amount(&self, decimals: u32) -> String {
        decode(self.amount.low, self.amount.high, decimals)
    }
}

/// `FundsReclaimed` event emitted by `reclaim_funds`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundsReclaimedEvent {
    pub giveaway_id: Option<u32>,
    pub creator: Option<Felt>,
    pub amount: U256,
}

impl FundsReclaimedEvent {
    /// Decode event data `[giveaway_id, creator, amount.low, amount.high]`.
    pub fn from_data(data: &[NumericInput]) -> Result<Self> {
        let amount = trailing_u256(data, "FundsReclaimed")?;
        match data {
            [giveaway_id, creator, _, _] => Ok(Self {
                giveaway_id: Some(input_to_u32(giveaway_id, "giveaway_id")?),
                creator: Some(input_to_felt(creator)?),
                amount,
            }),
            _ => Ok(Self {
                giveaway_id: None,
                creator: None,
                amount,
            }),
        }
    }

    pub fn display_amount(&self, decimals: u32) -> String {
        decode(self.amount.low, self.amount.high, decimals)
    }
}

fn trailing_u256(data: &[NumericInput], event: &str) -> Result<U256> {
    match data {
        [.., low, high] => U256::from_limbs(low.clone(), high.clone()),
        _ => Err(GiveawayError::InvalidNumber(format!(
            "{} data needs at least 2 elements, got {}",
            event,
            data.len()
        ))),
    }
}

fn input_to_felt(input: &NumericInput) -> Result<Felt> {
    biguint_to_felt(&input.to_biguint()?)
}

fn input_to_u32(input: &NumericInput, field: &str) -> Result<u32> {
    felt_to_u32(&input_to_felt(input)?, field)
}
