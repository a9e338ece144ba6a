use soroban_sdk::{symbol_short, Address, Env};

use crate::distribution::ReserveSplit;
use crate::types::CrowdsaleStage;

pub fn initialized(env: &Env, owner: &Address, token: &Address, wallet: &Address) {
    env.events().publish(
        (symbol_short!("init"),),
        (owner.clone(), token.clone(), wallet.clone()),
    );
}

pub fn stage_changed(env: &Env, epoch: u32, stage: CrowdsaleStage, rate: i128) {
    env.events().publish((symbol_short!("stage"), epoch), (stage, rate));
}

pub fn whitelist_added(env: &Env, account: &Address) {
    env.events().publish((symbol_short!("wl_add"), account.clone()), ());
}

pub fn whitelist_removed(env: &Env, account: &Address) {
    env.events().publish((symbol_short!("wl_remove"), account.clone()), ());
}

pub fn token_purchase(
    env: &Env,
    purchaser: &Address,
    beneficiary: &Address,
    amount: i128,
    tokens: i128,
    stage: CrowdsaleStage,
) {
    env.events().publish(
        (
            symbol_short!("purchase"),
            purchaser.clone(),
            beneficiary.clone(),
        ),
        (amount, tokens, stage),
    );
}

pub fn finalized(env: &Env, epoch: u32, total_raised: i128, goal_reached: bool) {
    env.events().publish(
        (symbol_short!("finalized"), epoch),
        (total_raised, goal_reached),
    );
}

pub fn distributed(env: &Env, epoch: u32, split: &ReserveSplit) {
    env.events().publish(
        (symbol_short!("distrib"), epoch),
        (split.final_supply, split.founders, split.foundation, split.partners),
    );
}

pub fn refunded(env: &Env, epoch: u32, investor: &Address, amount: i128) {
    env.events().publish((symbol_short!("refund"), epoch, investor.clone()), amount);
}

pub fn token_paused(env: &Env, token: &Address) {
    env.events().publish((symbol_short!("tk_pause"),), token.clone());
}

pub fn token_resumed(env: &Env, token: &Address) {
    env.events().publish((symbol_short!("tk_resume"),), token.clone());
}

pub fn tokens_released(env: &Env, epoch: u32, beneficiary: &Address, new_owner: &Address) {
    env.events().publish(
        (symbol_short!("tk_rel"), epoch),
        (beneficiary.clone(), new_owner.clone()),
    );
}

pub fn new_ico(env: &Env, epoch: u32, token: &Address, wallet: &Address) {
    env.events().publish((symbol_short!("new_ico"), epoch), (token.clone(), wallet.clone()));
}

pub fn ownership_transferred(env: &Env, previous: &Address, new_owner: &Address) {
    env.events().publish(
        (symbol_short!("owner"),),
        (previous.clone(), new_owner.clone()),
    );
}
