//! Token distribution on a successful sale.
//!
//! Tokens minted during the sale make up the sale share of the final
//! supply. The final supply is derived from it and each reserve share is
//! minted into a time-locked vault for its fund:
//!
//! ```text
//! final_supply = already_minted * 100 / sale_pct
//! reserve_i    = final_supply * pct_i / 100
//! ```
//!
//! Both divisions truncate toward zero. The remainder is forfeited and
//! never re-minted, so `already_minted + sum(reserve_i) <= final_supply`.

use soroban_sdk::{Address, Env};

use crate::errors::Error;
use crate::interfaces::{MintableTokenClient, VaultClient};
use crate::storage;
use crate::types::{DistributionPolicy, SaleConfig, SaleState};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReserveSplit {
    pub final_supply: i128,
    pub founders: i128,
    pub foundation: i128,
    pub partners: i128,
}

impl ReserveSplit {
    pub fn total_reserved(&self) -> i128 {
        self.founders + self.foundation + self.partners
    }
}

impl DistributionPolicy {
    /// The four shares must add up to exactly 100 with a non-zero sale share.
    pub fn validate(&self) -> Result<(), Error> {
        let total = self.sale as u64
            + self.founders as u64
            + self.foundation as u64
            + self.partners as u64;
        if self.sale == 0 || total != 100 {
            return Err(Error::InvalidDistribution);
        }
        Ok(())
    }
}

pub fn split_reserves(
    policy: &DistributionPolicy,
    already_minted: i128,
) -> Result<ReserveSplit, Error> {
    let final_supply = already_minted
        .checked_mul(100)
        .ok_or(Error::ArithmeticOverflow)?
        / policy.sale as i128;
    let share = |pct: u32| -> Result<i128, Error> {
        Ok(final_supply
            .checked_mul(pct as i128)
            .ok_or(Error::ArithmeticOverflow)?
            / 100)
    };

    Ok(ReserveSplit {
        final_supply,
        founders: share(policy.founders)?,
        foundation: share(policy.foundation)?,
        partners: share(policy.partners)?,
    })
}

/// Mint the reserve shares into vaults that unlock at `release_time`.
/// Records the vault ids on `state`.
pub fn finalize_distribution(
    env: &Env,
    config: &SaleConfig,
    policy: &DistributionPolicy,
    state: &mut SaleState,
) -> Result<ReserveSplit, Error> {
    let token = MintableTokenClient::new(env, &config.mintable_token);
    let split = split_reserves(policy, token.total_supply())?;

    let timelock = storage::get_timelock(env)?;
    state.founders_timelock =
        lock_reserve(env, &timelock, config, &config.founders_fund, split.founders);
    state.foundation_timelock =
        lock_reserve(env, &timelock, config, &config.foundation_fund, split.foundation);
    state.partners_timelock =
        lock_reserve(env, &timelock, config, &config.partners_fund, split.partners);

    Ok(split)
}

fn lock_reserve(
    env: &Env,
    timelock: &Address,
    config: &SaleConfig,
    fund: &Address,
    amount: i128,
) -> Option<u64> {
    if amount <= 0 {
        return None;
    }
    MintableTokenClient::new(env, &config.mintable_token).mint(timelock, &amount);
    let vault_id = VaultClient::new(env, timelock).create_vault(
        &env.current_contract_address(),
        &config.mintable_token,
        fund,
        &amount,
        &config.release_time,
    );
    Some(vault_id)
}
