//! Minimal views of the contracts the crowdsale drives.

use soroban_sdk::{contractclient, Address, Env};

#[contractclient(name = "MintableTokenClient")]
pub trait MintableToken {
    fn mint(env: Env, to: Address, amount: i128);
    fn pause(env: Env);
    fn unpause(env: Env);
    fn paused(env: Env) -> bool;
    fn transfer_ownership(env: Env, new_owner: Address);
    fn total_supply(env: Env) -> i128;
    fn balance(env: Env, id: Address) -> i128;
}

#[contractclient(name = "EscrowClient")]
pub trait Escrow {
    fn open(env: Env, epoch: u32, beneficiary: Address);
    fn deposit(env: Env, epoch: u32, payee: Address, amount: i128);
    fn withdraw(env: Env, epoch: u32, payee: Address) -> i128;
    fn enable_refunds(env: Env, epoch: u32);
    fn close(env: Env, epoch: u32);
    fn beneficiary_withdraw(env: Env, epoch: u32) -> i128;
    fn deposits_of(env: Env, epoch: u32, payee: Address) -> i128;
}

#[contractclient(name = "VaultClient")]
pub trait Vaults {
    fn create_vault(
        env: Env,
        creator: Address,
        token: Address,
        beneficiary: Address,
        amount: i128,
        release_time: u64,
    ) -> u64;
}
