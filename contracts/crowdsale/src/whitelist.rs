use soroban_sdk::{Address, Env};

use crate::errors::Error;
use crate::events;
use crate::storage;

pub fn add(env: &Env, account: &Address) {
    storage::set_whitelisted(env, account, true);
    events::whitelist_added(env, account);
}

pub fn remove(env: &Env, account: &Address) {
    storage::set_whitelisted(env, account, false);
    events::whitelist_removed(env, account);
}

pub fn require_whitelisted(env: &Env, account: &Address) -> Result<(), Error> {
    if !storage::is_whitelisted(env, account) {
        return Err(Error::NotWhitelisted);
    }
    Ok(())
}
