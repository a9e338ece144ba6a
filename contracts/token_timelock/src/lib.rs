#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, token, Address, Env,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TimelockError {
    InvalidAmount = 1,
    Unbacked = 2,
    VaultNotFound = 3,
    TimelockNotElapsed = 4,
    AlreadyReleased = 5,
    Overflow = 6,
}

#[contracttype]
pub enum DataKey {
    VaultCount,
    Vault(u64),
    Locked(Address),
}

/// Tokens held for `beneficiary` until `release_time`.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Vault {
    pub id: u64,
    pub creator: Address,
    pub token: Address,
    pub beneficiary: Address,
    pub amount: i128,
    pub release_time: u64,
    pub released: bool,
}

fn locked_of(env: &Env, token: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Locked(token.clone()))
        .unwrap_or(0)
}

fn set_locked(env: &Env, token: &Address, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::Locked(token.clone()), &amount);
}

#[contract]
pub struct TokenTimelock;

#[contractimpl]
impl TokenTimelock {
    /// Register a vault over tokens already sent to this contract. A
    /// `release_time` in the past makes the vault releasable immediately.
    pub fn create_vault(
        env: Env,
        creator: Address,
        token: Address,
        beneficiary: Address,
        amount: i128,
        release_time: u64,
    ) -> Result<u64, TimelockError> {
        creator.require_auth();

        if amount <= 0 {
            return Err(TimelockError::InvalidAmount);
        }

        let locked = locked_of(&env, &token)
            .checked_add(amount)
            .ok_or(TimelockError::Overflow)?;
        let balance = token::Client::new(&env, &token).balance(&env.current_contract_address());
        if balance < locked {
            return Err(TimelockError::Unbacked);
        }

        let id: u64 = env
            .storage()
            .instance()
            .get(&DataKey::VaultCount)
            .unwrap_or(0);
        let next_id = id.checked_add(1).ok_or(TimelockError::Overflow)?;
        let vault = Vault {
            id,
            creator,
            token: token.clone(),
            beneficiary: beneficiary.clone(),
            amount,
            release_time,
            released: false,
        };
        env.storage().persistent().set(&DataKey::Vault(id), &vault);
        env.storage().instance().set(&DataKey::VaultCount, &next_id);
        set_locked(&env, &token, locked);

        env.events().publish(
            (symbol_short!("locked"), id),
            (token, beneficiary, amount, release_time),
        );
        Ok(id)
    }

    /// Pay the full vault balance to its beneficiary. Callable by anyone.
    pub fn release(env: Env, id: u64) -> Result<i128, TimelockError> {
        let mut vault: Vault = env
            .storage()
            .persistent()
            .get(&DataKey::Vault(id))
            .ok_or(TimelockError::VaultNotFound)?;

        if vault.released {
            return Err(TimelockError::AlreadyReleased);
        }
        if env.ledger().timestamp() < vault.release_time {
            return Err(TimelockError::TimelockNotElapsed);
        }

        vault.released = true;
        env.storage().persistent().set(&DataKey::Vault(id), &vault);
        set_locked(&env, &vault.token, locked_of(&env, &vault.token) - vault.amount);

        token::Client::new(&env, &vault.token).transfer(
            &env.current_contract_address(),
            &vault.beneficiary,
            &vault.amount,
        );

        env.events().publish(
            (symbol_short!("released"), id),
            (vault.beneficiary, vault.amount),
        );
        Ok(vault.amount)
    }

    pub fn get_vault(env: Env, id: u64) -> Option<Vault> {
        env.storage().persistent().get(&DataKey::Vault(id))
    }

    pub fn vault_count(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::VaultCount)
            .unwrap_or(0)
    }

    pub fn locked_balance(env: Env, token: Address) -> i128 {
        locked_of(&env, &token)
    }
}
