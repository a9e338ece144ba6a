#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contractmeta, contracttype, symbol_short, Address,
    Env, String,
};

contractmeta!(
    key = "Description",
    val = "ICO Token - mintable, pausable sale token"
);

/// Every sale token uses 18 decimals.
pub const DECIMALS: u32 = 18;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TokenError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidAmount = 3,
    InsufficientBalance = 4,
    InsufficientAllowance = 5,
    Paused = 6,
    InvalidExpiration = 7,
    Overflow = 8,
}

#[derive(Clone)]
#[contracttype]
pub struct TokenMetadata {
    pub decimal: u32,
    pub name: String,
    pub symbol: String,
}

#[derive(Clone)]
#[contracttype]
pub struct AllowanceValue {
    pub amount: i128,
    pub expiration_ledger: u32,
}

#[derive(Clone)]
#[contracttype]
pub struct AllowanceKey {
    pub from: Address,
    pub spender: Address,
}

#[contracttype]
pub enum DataKey {
    Metadata,
    Owner,
    Paused,
    TotalSupply,
    Balance(Address),
    Allowance(AllowanceKey),
}

fn get_owner(env: &Env) -> Result<Address, TokenError> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(TokenError::NotInitialized)
}

fn require_owner(env: &Env) -> Result<Address, TokenError> {
    let owner = get_owner(env)?;
    owner.require_auth();
    Ok(owner)
}

fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

fn read_balance(env: &Env, id: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(id.clone()))
        .unwrap_or(0)
}

fn write_balance(env: &Env, id: &Address, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::Balance(id.clone()), &amount);
}

fn read_total_supply(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

fn read_allowance(env: &Env, from: &Address, spender: &Address) -> AllowanceValue {
    let key = DataKey::Allowance(AllowanceKey {
        from: from.clone(),
        spender: spender.clone(),
    });
    match env
        .storage()
        .temporary()
        .get::<_, AllowanceValue>(&key)
    {
        Some(allowance) if allowance.expiration_ledger >= env.ledger().sequence() => allowance,
        Some(allowance) => AllowanceValue {
            amount: 0,
            expiration_ledger: allowance.expiration_ledger,
        },
        None => AllowanceValue {
            amount: 0,
            expiration_ledger: 0,
        },
    }
}

fn mint_to(env: &Env, to: &Address, amount: i128) -> Result<(), TokenError> {
    if amount <= 0 {
        return Err(TokenError::InvalidAmount);
    }
    let balance = read_balance(env, to)
        .checked_add(amount)
        .ok_or(TokenError::Overflow)?;
    let supply = read_total_supply(env)
        .checked_add(amount)
        .ok_or(TokenError::Overflow)?;
    write_balance(env, to, balance);
    env.storage().instance().set(&DataKey::TotalSupply, &supply);
    Ok(())
}

fn move_balance(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), TokenError> {
    if amount < 0 {
        return Err(TokenError::InvalidAmount);
    }
    if is_paused(env) {
        return Err(TokenError::Paused);
    }
    let from_balance = read_balance(env, from);
    if from_balance < amount {
        return Err(TokenError::InsufficientBalance);
    }
    let to_balance = read_balance(env, to)
        .checked_add(amount)
        .ok_or(TokenError::Overflow)?;
    write_balance(env, from, from_balance - amount);
    write_balance(env, to, to_balance);
    Ok(())
}

#[contract]
pub struct IcoToken;

#[contractimpl]
impl IcoToken {
    pub fn initialize(
        env: Env,
        owner: Address,
        name: String,
        symbol: String,
        initial_supply: i128,
    ) -> Result<(), TokenError> {
        if env.storage().instance().has(&DataKey::Owner) {
            return Err(TokenError::AlreadyInitialized);
        }
        if initial_supply < 0 {
            return Err(TokenError::InvalidAmount);
        }

        let metadata = TokenMetadata {
            decimal: DECIMALS,
            name,
            symbol,
        };
        env.storage().instance().set(&DataKey::Metadata, &metadata);
        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage().instance().set(&DataKey::Paused, &false);
        env.storage().instance().set(&DataKey::TotalSupply, &0i128);

        if initial_supply > 0 {
            mint_to(&env, &owner, initial_supply)?;
        }

        env.events().publish((symbol_short!("init"),), (owner, initial_supply));
        Ok(())
    }

    /// Mint new tokens. Owner only; allowed while paused.
    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), TokenError> {
        require_owner(&env)?;
        mint_to(&env, &to, amount)?;
        env.events().publish((symbol_short!("mint"), to), amount);
        Ok(())
    }

    pub fn pause(env: Env) -> Result<(), TokenError> {
        require_owner(&env)?;
        env.storage().instance().set(&DataKey::Paused, &true);
        env.events().publish((symbol_short!("paused"),), ());
        Ok(())
    }

    pub fn unpause(env: Env) -> Result<(), TokenError> {
        require_owner(&env)?;
        env.storage().instance().set(&DataKey::Paused, &false);
        env.events().publish((symbol_short!("unpaused"),), ());
        Ok(())
    }

    pub fn paused(env: Env) -> bool {
        is_paused(&env)
    }

    pub fn transfer_ownership(env: Env, new_owner: Address) -> Result<(), TokenError> {
        let previous = require_owner(&env)?;
        env.storage().instance().set(&DataKey::Owner, &new_owner);
        env.events().publish((symbol_short!("owner"),), (previous, new_owner));
        Ok(())
    }

    pub fn owner(env: Env) -> Result<Address, TokenError> {
        get_owner(&env)
    }

    pub fn total_supply(env: Env) -> i128 {
        read_total_supply(&env)
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        read_balance(&env, &id)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), TokenError> {
        from.require_auth();
        move_balance(&env, &from, &to, amount)?;
        env.events().publish((symbol_short!("transfer"), from, to), amount);
        Ok(())
    }

    pub fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
        expiration_ledger: u32,
    ) -> Result<(), TokenError> {
        from.require_auth();
        if amount < 0 {
            return Err(TokenError::InvalidAmount);
        }
        if amount > 0 && expiration_ledger < env.ledger().sequence() {
            return Err(TokenError::InvalidExpiration);
        }

        let key = DataKey::Allowance(AllowanceKey {
            from: from.clone(),
            spender: spender.clone(),
        });
        let allowance = AllowanceValue {
            amount,
            expiration_ledger,
        };
        env.storage().temporary().set(&key, &allowance);
        if amount > 0 {
            let live_for = expiration_ledger
                .checked_sub(env.ledger().sequence())
                .ok_or(TokenError::InvalidExpiration)?;
            env.storage().temporary().extend_ttl(&key, live_for, live_for);
        }

        env.events().publish(
            (symbol_short!("approve"), from, spender),
            (amount, expiration_ledger),
        );
        Ok(())
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        read_allowance(&env, &from, &spender).amount
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), TokenError> {
        spender.require_auth();

        let allowance = read_allowance(&env, &from, &spender);
        if allowance.amount < amount {
            return Err(TokenError::InsufficientAllowance);
        }
        move_balance(&env, &from, &to, amount)?;

        let key = DataKey::Allowance(AllowanceKey {
            from: from.clone(),
            spender,
        });
        env.storage().temporary().set(
            &key,
            &AllowanceValue {
                amount: allowance.amount - amount,
                expiration_ledger: allowance.expiration_ledger,
            },
        );

        env.events().publish((symbol_short!("transfer"), from, to), amount);
        Ok(())
    }

    pub fn decimals(env: Env) -> Result<u32, TokenError> {
        Ok(Self::metadata(&env)?.decimal)
    }

    pub fn name(env: Env) -> Result<String, TokenError> {
        Ok(Self::metadata(&env)?.name)
    }

    pub fn symbol(env: Env) -> Result<String, TokenError> {
        Ok(Self::metadata(&env)?.symbol)
    }
}

impl IcoToken {
    fn metadata(env: &Env) -> Result<TokenMetadata, TokenError> {
        env.storage()
            .instance()
            .get(&DataKey::Metadata)
            .ok_or(TokenError::NotInitialized)
    }
}
