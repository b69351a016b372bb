//! Calldata for the giveaway contract and the ERC-20 calls around it.
//!
//! Each builder produces the flat string array the contract-call SDK takes,
//! in the exact order the entrypoint declares its inputs. Nothing here
//! checks the entrypoint signature against the deployed class.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use starknet_crypto::Felt;
use std::collections::HashSet;
use tracing::debug;

use crate::error::{GiveawayError, Result};
use crate::felt::{felt_to_hex, hex_to_felt, selector_from_name, try_string_to_felt};
use crate::registry::{require_symbol, TokenDescriptor};
use crate::u256::{encode, parse_token_amount, U256};

/// A single contract invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    pub contract_address: String,
    pub entrypoint: String,
    pub calldata: Vec<String>,
}

impl Call {
    pub fn new(contract_address: &str, entrypoint: &str, calldata: Vec<String>) -> Result<Self> {
        // Reject addresses the SDK would choke on
        hex_to_felt(contract_address)?;
        Ok(Self {
            contract_address: contract_address.to_string(),
            entrypoint: entrypoint.to_string(),
            calldata,
        })
    }

    pub fn selector(&self) -> Felt {
        selector_from_name(&self.entrypoint)
    }
}

/// One prize slot of a giveaway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub code: String,
    /// Human-readable token amount, e.g. `"12.5"`
    pub amount: String,
}

/// Everything the creator enters before a giveaway is deployed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiveawayDraft {
    pub name: String,
    pub token_symbol: String,
    pub total_amount: String,
    pub winners: Vec<Winner>,
    pub expiry_hours: u64,
}

impl GiveawayDraft {
    pub fn token(&self) -> Result<&'static TokenDescriptor> {
        require_symbol(&self.token_symbol)
    }

    /// Check the draft before any code is hashed or any call is built.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| -> Result<()> { Err(GiveawayError::InvalidGiveaway(msg)) };

        if self.name.trim().is_empty() {
            return invalid("name is required".to_string());
        }
        try_string_to_felt(&self.name)?;

        let token = self.token()?;

        if self.winners.is_empty() {
            return invalid("at least one winner is required".to_string());
        }
        if self.expiry_hours == 0 {
            return invalid("expiry must be at least one hour".to_string());
        }

        let mut seen = HashSet::with_capacity(self.winners.len());
        let mut prize_sum = BigUint::from(0u32);
        for (index, winner) in self.winners.iter().enumerate() {
            if winner.code.is_empty() || winner.amount.trim().is_empty() {
                return invalid(format!("winner {} is missing a code or amount", index + 1));
            }
            try_string_to_felt(&winner.code)?;
            if !seen.insert(winner.code.as_str()) {
                return invalid(format!("duplicate claim code for winner {}", index + 1));
            }
            prize_sum += parse_token_amount(&winner.amount, token.decimals)?;
        }

        let total = parse_token_amount(&self.total_amount, token.decimals)?;
        if prize_sum != total {
            return invalid(format!(
                "prizes add up to {} base units but the total is {}",
                prize_sum, total
            ));
        }

        Ok(())
    }

    /// Claim codes in winner order, ready for the hash gateway.
    pub fn codes(&self) -> Vec<&str> {
        self.winners.iter().map(|w| w.code.as_str()).collect()
    }
}

fn push_u256(calldata: &mut Vec<String>, value: &U256) {
    calldata.extend(value.to_calldata());
}

/// `create_giveaway(name, token, total_amount, code_hashes, prize_amounts, expiry_hours)`
///
/// `code_hashes[i]` must be the commitment for `draft.winners[i].code`.
pub fn create_giveaway_call(contract: &str, draft: &GiveawayDraft, code_hashes: &[Felt]) -> Result<Call> {
    draft.validate()?;
    if code_hashes.len() != draft.winners.len() {
        return Err(GiveawayError::InvalidGiveaway(format!(
            "{} winners but {} code hashes",
            draft.winners.len(),
            code_hashes.len()
        )));
    }

    let token = draft.token()?;
    let total = encode(&draft.total_amount, token.decimals)?;

    let mut calldata = Vec::with_capacity(7 + code_hashes.len() + draft.winners.len() * 2);
    calldata.push(felt_to_hex(&try_string_to_felt(&draft.name)?));
    calldata.push(token.contract_address.to_string());
    push_u256(&mut calldata, &total);

    calldata.push(code_hashes.len().to_string());
    calldata.extend(code_hashes.iter().map(felt_to_hex));

    calldata.push(draft.winners.len().to_string());
    for winner in &draft.winners {
        push_u256(&mut calldata, &encode(&winner.amount, token.decimals)?);
    }

    calldata.push(draft.expiry_hours.to_string());

    debug!(
        "Built create_giveaway calldata: {} winners, {} elements",
        draft.winners.len(),
        calldata.len()
    );
    Call::new(contract, "create_giveaway", calldata)
}

/// ERC-20 `approve(spender, amount)` so the giveaway contract can pull the pool.
pub fn approve_call(token: &TokenDescriptor, spender: &str, amount: &str) -> Result<Call> {
    let value = encode(amount, token.decimals)?;
    let mut calldata = vec![felt_to_hex(&hex_to_felt(spender)?)];
    push_u256(&mut calldata, &value);
    Call::new(token.contract_address, "approve", calldata)
}

/// ERC-20 `transfer(recipient, amount)`.
pub fn transfer_call(token: &TokenDescriptor, recipient: &str, amount: &str) -> Result<Call> {
    let value = encode(amount, token.decimals)?;
    let mut calldata = vec![felt_to_hex(&hex_to_felt(recipient)?)];
    push_u256(&mut calldata, &value);
    Call::new(token.contract_address, "transfer", calldata)
}

/// ERC-20 `balanceOf(account)` view call.
pub fn balance_of_call(token: &TokenDescriptor, account: &str) -> Result<Call> {
    let calldata = vec![felt_to_hex(&hex_to_felt(account)?)];
    Call::new(token.contract_address, "balanceOf", calldata)
}

/// `claim_prize(name, code)`; the contract hashes `code` itself.
pub fn claim_prize_call(contract: &str, name: &str, code: &str) -> Result<Call> {
    let calldata = vec![
        felt_to_hex(&try_string_to_felt(name)?),
        felt_to_hex(&try_string_to_felt(code)?),
    ];
    Call::new(contract, "claim_prize", calldata)
}

/// `reclaim_funds(name)` after expiry, creator only.
pub fn reclaim_funds_call(contract: &str, name: &str) -> Result<Call> {
    let calldata = vec![felt_to_hex(&try_string_to_felt(name)?)];
    Call::new(contract, "reclaim_funds", calldata)
}

/// `get_giveaway_info(giveaway_id)` view call.
pub fn get_giveaway_info_call(contract: &str, giveaway_id: u32) -> Result<Call> {
    Call::new(contract, "get_giveaway_info", vec![giveaway_id.to_string()])
}

/// `get_giveaway_id_by_name(name)` view call, used to check a name is free.
pub fn get_giveaway_id_by_name_call(contract: &str, name: &str) -> Result<Call> {
    let calldata = vec![felt_to_hex(&try_string_to_felt(name)?)];
    Call::new(contract, "get_giveaway_id_by_name", calldata)
}

/// `is_prize_claimed(giveaway_id, code_hash)` view call.
pub fn is_prize_claimed_call(contract: &str, giveaway_id: u32, code_hash: &Felt) -> Result<Call> {
    let calldata = vec![giveaway_id.to_string(), felt_to_hex(code_hash)];
    Call::new(contract, "is_prize_claimed", calldata)
}

/// `has_address_claimed(giveaway_id, address)` view call.
pub fn has_address_claimed_call(contract: &str, giveaway_id: u32, address: &str) -> Result<Call> {
    let calldata = vec![giveaway_id.to_string(), felt_to_hex(&hex_to_felt(address)?)];
    Call::new(contract, "has_address_claimed", calldata)
}
