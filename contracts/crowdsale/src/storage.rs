use crate::errors::Error;
use crate::types::*;
use soroban_sdk::{Address, Env};

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Owner)
}

pub fn get_owner(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(Error::NotInitialized)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
}

pub fn get_payment_token(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::PaymentToken)
        .ok_or(Error::NotInitialized)
}

pub fn set_payment_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::PaymentToken, token);
}

pub fn get_escrow(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Escrow)
        .ok_or(Error::NotInitialized)
}

pub fn set_escrow(env: &Env, escrow: &Address) {
    env.storage().instance().set(&DataKey::Escrow, escrow);
}

pub fn get_timelock(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Timelock)
        .ok_or(Error::NotInitialized)
}

pub fn set_timelock(env: &Env, timelock: &Address) {
    env.storage().instance().set(&DataKey::Timelock, timelock);
}

pub fn get_investor_caps(env: &Env) -> Result<InvestorCaps, Error> {
    env.storage()
        .instance()
        .get(&DataKey::InvestorCaps)
        .ok_or(Error::NotInitialized)
}

pub fn set_investor_caps(env: &Env, caps: &InvestorCaps) {
    env.storage().instance().set(&DataKey::InvestorCaps, caps);
}

pub fn get_policy(env: &Env) -> Result<DistributionPolicy, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Policy)
        .ok_or(Error::NotInitialized)
}

pub fn set_policy(env: &Env, policy: &DistributionPolicy) {
    env.storage().instance().set(&DataKey::Policy, policy);
}

pub fn get_current_epoch(env: &Env) -> Result<u32, Error> {
    env.storage()
        .instance()
        .get(&DataKey::CurrentEpoch)
        .ok_or(Error::NotInitialized)
}

pub fn set_current_epoch(env: &Env, epoch: u32) {
    env.storage().instance().set(&DataKey::CurrentEpoch, &epoch);
}

pub fn get_epoch_config(env: &Env, epoch: u32) -> Result<SaleConfig, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::EpochConfig(epoch))
        .ok_or(Error::UnknownEpoch)
}

pub fn set_epoch_config(env: &Env, epoch: u32, config: &SaleConfig) {
    env.storage()
        .persistent()
        .set(&DataKey::EpochConfig(epoch), config);
}

pub fn get_epoch_state(env: &Env, epoch: u32) -> Result<SaleState, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::EpochState(epoch))
        .ok_or(Error::UnknownEpoch)
}

pub fn set_epoch_state(env: &Env, epoch: u32, state: &SaleState) {
    env.storage()
        .persistent()
        .set(&DataKey::EpochState(epoch), state);
}

pub fn get_contribution(env: &Env, epoch: u32, investor: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Contribution(epoch, investor.clone()))
        .unwrap_or(0)
}

pub fn set_contribution(env: &Env, epoch: u32, investor: &Address, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::Contribution(epoch, investor.clone()), &amount);
}

pub fn is_whitelisted(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Whitelisted(account.clone()))
        .unwrap_or(false)
}

pub fn set_whitelisted(env: &Env, account: &Address, whitelisted: bool) {
    let key = DataKey::Whitelisted(account.clone());
    if whitelisted {
        env.storage().persistent().set(&key, &true);
    } else {
        env.storage().persistent().remove(&key);
    }
}
