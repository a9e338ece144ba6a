use soroban_sdk::{Address, Env};

use crate::errors::Error;
use crate::rate::rate_for;
use crate::storage;
use crate::types::{InvestorCaps, SaleConfig, SaleState};
use crate::whitelist;

/// Open on `[opening_time, closing_time)`.
pub fn is_open(config: &SaleConfig, now: u64) -> bool {
    now >= config.opening_time && now < config.closing_time
}

pub fn has_closed(config: &SaleConfig, now: u64) -> bool {
    now >= config.closing_time
}

/// Validate a contribution and, only if every check passes, record it
/// against the epoch totals. Returns the token amount to mint.
pub fn validate_and_record(
    env: &Env,
    epoch: u32,
    config: &SaleConfig,
    state: &mut SaleState,
    caps: &InvestorCaps,
    beneficiary: &Address,
    amount: i128,
) -> Result<i128, Error> {
    let now = env.ledger().timestamp();
    if state.finalized || !is_open(config, now) {
        return Err(Error::NotOpen);
    }

    whitelist::require_whitelisted(env, beneficiary)?;

    // per-contribution bounds, not cumulative
    if amount < caps.min {
        return Err(Error::BelowInvestorMin);
    }
    if amount > caps.max {
        return Err(Error::AboveInvestorMax);
    }

    let raised = state
        .total_raised
        .checked_add(amount)
        .ok_or(Error::ArithmeticOverflow)?;
    if raised > config.cap {
        return Err(Error::CapExceeded);
    }

    let tokens = amount
        .checked_mul(rate_for(config, state.stage))
        .ok_or(Error::ArithmeticOverflow)?;
    let contributed = storage::get_contribution(env, epoch, beneficiary)
        .checked_add(amount)
        .ok_or(Error::ArithmeticOverflow)?;

    state.total_raised = raised;
    storage::set_contribution(env, epoch, beneficiary, contributed);
    Ok(tokens)
}
