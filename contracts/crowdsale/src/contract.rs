use crate::distribution;
use crate::errors::Error;
use crate::events;
use crate::funds;
use crate::interfaces::{EscrowClient, MintableTokenClient};
use crate::ledger;
use crate::rate::rate_for;
use crate::storage::*;
use crate::types::*;
use crate::whitelist;
use soroban_sdk::{contract, contractimpl, contractmeta, log, Address, Env};

// Metadata that is added on to every WASM custom section
contractmeta!(
    key = "Description",
    val = "Staged, capped, refundable crowdsale with time-locked reserves"
);

#[contract]
pub struct Crowdsale;

fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if *caller != get_owner(env)? {
        return Err(Error::NotAuthorized);
    }
    Ok(())
}

fn current(env: &Env) -> Result<(u32, SaleConfig, SaleState), Error> {
    let epoch = get_current_epoch(env)?;
    Ok((epoch, get_epoch_config(env, epoch)?, get_epoch_state(env, epoch)?))
}

#[contractimpl]
impl Crowdsale {
    /// Initialize the crowdsale and open epoch 0 in the PreIco stage.
    ///
    /// The escrow must already be initialized with this contract as owner,
    /// and this contract must own `config.mintable_token`.
    pub fn initialize(
        env: Env,
        owner: Address,
        payment_token: Address,
        escrow: Address,
        timelock: Address,
        investor_min_cap: i128,
        investor_max_cap: i128,
        policy: DistributionPolicy,
        config: SaleConfig,
    ) -> Result<(), Error> {
        if is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();

        let caps = InvestorCaps {
            min: investor_min_cap,
            max: investor_max_cap,
        };
        caps.validate()?;
        policy.validate()?;
        config.validate()?;

        set_owner(&env, &owner);
        set_payment_token(&env, &payment_token);
        set_escrow(&env, &escrow);
        set_timelock(&env, &timelock);
        set_investor_caps(&env, &caps);
        set_policy(&env, &policy);
        set_current_epoch(&env, 0);
        set_epoch_config(&env, 0, &config);
        set_epoch_state(&env, 0, &SaleState::new());

        EscrowClient::new(&env, &escrow).open(&0, &config.wallet);

        events::initialized(&env, &owner, &config.token, &config.wallet);
        Ok(())
    }

    // ---- whitelist ----

    pub fn add_whitelisted(env: Env, admin: Address, account: Address) -> Result<(), Error> {
        require_owner(&env, &admin)?;
        whitelist::add(&env, &account);
        Ok(())
    }

    pub fn remove_whitelisted(env: Env, admin: Address, account: Address) -> Result<(), Error> {
        require_owner(&env, &admin)?;
        whitelist::remove(&env, &account);
        Ok(())
    }

    pub fn is_whitelisted(env: Env, account: Address) -> bool {
        is_whitelisted(&env, &account)
    }

    // ---- stages ----

    pub fn set_crowdsale_stage(
        env: Env,
        admin: Address,
        stage: CrowdsaleStage,
    ) -> Result<(), Error> {
        require_owner(&env, &admin)?;
        let (epoch, config, mut state) = current(&env)?;
        if state.finalized {
            return Err(Error::AlreadyFinalized);
        }

        state.stage = stage;
        set_epoch_state(&env, epoch, &state);

        events::stage_changed(&env, epoch, stage, rate_for(&config, stage));
        Ok(())
    }

    pub fn stage(env: Env) -> Result<CrowdsaleStage, Error> {
        let (_, _, state) = current(&env)?;
        Ok(state.stage)
    }

    /// Rate of the current stage.
    pub fn rate(env: Env) -> Result<i128, Error> {
        let (_, config, state) = current(&env)?;
        Ok(rate_for(&config, state.stage))
    }

    pub fn get_pre_rate(env: Env) -> Result<i128, Error> {
        let (_, config, _) = current(&env)?;
        Ok(config.pre_rate)
    }

    pub fn get_ico_rate(env: Env) -> Result<i128, Error> {
        let (_, config, _) = current(&env)?;
        Ok(config.rate)
    }

    // ---- contributions ----

    /// Buy tokens for `beneficiary`, paid by `purchaser`. Returns the
    /// amount of tokens minted.
    pub fn buy_tokens(
        env: Env,
        purchaser: Address,
        beneficiary: Address,
        amount: i128,
    ) -> Result<i128, Error> {
        purchaser.require_auth();

        let (epoch, config, mut state) = current(&env)?;
        let caps = get_investor_caps(&env)?;

        let tokens = ledger::validate_and_record(
            &env,
            epoch,
            &config,
            &mut state,
            &caps,
            &beneficiary,
            amount,
        )?;
        set_epoch_state(&env, epoch, &state);

        MintableTokenClient::new(&env, &config.mintable_token).mint(&beneficiary, &tokens);
        funds::route_funds(
            &env,
            epoch,
            &config,
            state.stage,
            &purchaser,
            &beneficiary,
            amount,
        )?;

        events::token_purchase(&env, &purchaser, &beneficiary, amount, tokens, state.stage);
        Ok(tokens)
    }

    pub fn is_open(env: Env) -> Result<bool, Error> {
        let (_, config, _) = current(&env)?;
        Ok(ledger::is_open(&config, get_ledger_timestamp(&env)))
    }

    pub fn has_closed(env: Env) -> Result<bool, Error> {
        let (_, config, _) = current(&env)?;
        Ok(ledger::has_closed(&config, get_ledger_timestamp(&env)))
    }

    pub fn get_contributions(env: Env, investor: Address) -> Result<i128, Error> {
        Ok(get_contribution(&env, get_current_epoch(&env)?, &investor))
    }

    pub fn total_raised(env: Env) -> Result<i128, Error> {
        let (_, _, state) = current(&env)?;
        Ok(state.total_raised)
    }

    pub fn cap_reached(env: Env) -> Result<bool, Error> {
        let (_, config, state) = current(&env)?;
        Ok(state.total_raised >= config.cap)
    }

    /// Latched at finalization; derived from the amount raised before that.
    pub fn goal_reached(env: Env) -> Result<bool, Error> {
        let (_, config, state) = current(&env)?;
        if state.finalized {
            return Ok(state.goal_reached);
        }
        Ok(state.total_raised >= config.goal)
    }

    // ---- finalization ----

    /// Close out the current epoch. Callable by anyone once the sale has
    /// closed, exactly once. Returns whether the goal was reached.
    pub fn finalize(env: Env) -> Result<bool, Error> {
        let (epoch, config, mut state) = current(&env)?;
        if state.finalized {
            return Err(Error::AlreadyFinalized);
        }
        if !ledger::has_closed(&config, get_ledger_timestamp(&env)) {
            return Err(Error::NotClosed);
        }

        let reached = state.total_raised >= config.goal;
        state.finalized = true;
        state.goal_reached = reached;
        set_epoch_state(&env, epoch, &state);

        log!(
            &env,
            "finalize epoch {}: raised {}, goal reached {}",
            epoch,
            state.total_raised,
            reached
        );

        funds::finalize_funds(&env, epoch, reached)?;
        if reached {
            let policy = get_policy(&env)?;
            let split = distribution::finalize_distribution(&env, &config, &policy, &mut state)?;
            set_epoch_state(&env, epoch, &state);
            events::distributed(&env, epoch, &split);
        }

        events::finalized(&env, epoch, state.total_raised, reached);
        Ok(reached)
    }

    pub fn finalized(env: Env) -> Result<bool, Error> {
        let (_, _, state) = current(&env)?;
        Ok(state.finalized)
    }

    /// Refund `investor`'s escrowed contribution for the current epoch.
    pub fn claim_refund(env: Env, investor: Address) -> Result<i128, Error> {
        let epoch = get_current_epoch(&env)?;
        Self::claim_refund_for_epoch(env, investor, epoch)
    }

    /// Refund from an earlier epoch, so reconfiguring never strands deposits.
    pub fn claim_refund_for_epoch(env: Env, investor: Address, epoch: u32) -> Result<i128, Error> {
        if epoch > get_current_epoch(&env)? {
            return Err(Error::UnknownEpoch);
        }
        let state = get_epoch_state(&env, epoch)?;
        if !state.finalized || state.goal_reached {
            return Err(Error::RefundsNotEnabled);
        }

        let amount = funds::claim_refund(&env, epoch, &investor)?;
        events::refunded(&env, epoch, &investor, amount);
        Ok(amount)
    }

    // ---- token control ----

    pub fn pause_token(env: Env, admin: Address) -> Result<(), Error> {
        require_owner(&env, &admin)?;
        let (_, config, state) = current(&env)?;
        if state.tokens_released {
            return Err(Error::TokensAlreadyReleased);
        }
        MintableTokenClient::new(&env, &config.mintable_token).pause();
        events::token_paused(&env, &config.mintable_token);
        Ok(())
    }

    pub fn unpause_token(env: Env, admin: Address) -> Result<(), Error> {
        require_owner(&env, &admin)?;
        let (_, config, state) = current(&env)?;
        if state.tokens_released {
            return Err(Error::TokensAlreadyReleased);
        }
        MintableTokenClient::new(&env, &config.mintable_token).unpause();
        events::token_resumed(&env, &config.mintable_token);
        Ok(())
    }

    /// Make sale tokens transferable after a successful sale: unpause the
    /// token and hand its ownership to the wallet. Returns the
    /// beneficiary's now-transferable balance.
    pub fn withdraw_tokens(env: Env, admin: Address, beneficiary: Address) -> Result<i128, Error> {
        require_owner(&env, &admin)?;
        let (epoch, config, mut state) = current(&env)?;
        if !state.finalized {
            return Err(Error::NotFinalized);
        }
        if !state.goal_reached {
            return Err(Error::GoalNotReached);
        }
        if state.tokens_released {
            return Err(Error::TokensAlreadyReleased);
        }

        state.tokens_released = true;
        set_epoch_state(&env, epoch, &state);

        let token = MintableTokenClient::new(&env, &config.mintable_token);
        if token.paused() {
            token.unpause();
        }
        token.transfer_ownership(&config.wallet);

        events::tokens_released(&env, epoch, &beneficiary, &config.wallet);
        Ok(token.balance(&beneficiary))
    }

    // ---- reconfiguration ----

    /// Start a new sale epoch. The current one must be finalized.
    pub fn set_new_ico(env: Env, admin: Address, config: SaleConfig) -> Result<u32, Error> {
        require_owner(&env, &admin)?;
        let (epoch, _, state) = current(&env)?;
        if !state.finalized {
            return Err(Error::NotFinalized);
        }
        config.validate()?;

        let next = epoch.checked_add(1).ok_or(Error::ArithmeticOverflow)?;
        set_epoch_config(&env, next, &config);
        set_epoch_state(&env, next, &SaleState::new());
        set_current_epoch(&env, next);

        EscrowClient::new(&env, &get_escrow(&env)?).open(&next, &config.wallet);

        events::new_ico(&env, next, &config.token, &config.wallet);
        Ok(next)
    }

    /// Token of epoch `index`; index 0 is the first configuration.
    pub fn icos_address(env: Env, index: u32) -> Result<Address, Error> {
        Ok(get_epoch_config(&env, index)?.token)
    }

    pub fn ico_count(env: Env) -> Result<u32, Error> {
        Ok(get_current_epoch(&env)? + 1)
    }

    pub fn current_epoch(env: Env) -> Result<u32, Error> {
        get_current_epoch(&env)
    }

    // ---- ownership ----

    pub fn owner(env: Env) -> Result<Address, Error> {
        get_owner(&env)
    }

    pub fn transfer_ownership(env: Env, admin: Address, new_owner: Address) -> Result<(), Error> {
        require_owner(&env, &admin)?;
        set_owner(&env, &new_owner);
        events::ownership_transferred(&env, &admin, &new_owner);
        Ok(())
    }

    // ---- views ----

    pub fn get_config(env: Env) -> Result<SaleConfig, Error> {
        let (_, config, _) = current(&env)?;
        Ok(config)
    }

    pub fn get_state(env: Env) -> Result<SaleState, Error> {
        let (_, _, state) = current(&env)?;
        Ok(state)
    }

    pub fn get_epoch_config(env: Env, epoch: u32) -> Result<SaleConfig, Error> {
        get_epoch_config(&env, epoch)
    }

    pub fn get_epoch_state(env: Env, epoch: u32) -> Result<SaleState, Error> {
        get_epoch_state(&env, epoch)
    }

    pub fn wallet(env: Env) -> Result<Address, Error> {
        Ok(Self::get_config(env)?.wallet)
    }

    pub fn token(env: Env) -> Result<Address, Error> {
        Ok(Self::get_config(env)?.token)
    }

    pub fn get_mintable_token(env: Env) -> Result<Address, Error> {
        Ok(Self::get_config(env)?.mintable_token)
    }

    pub fn get_cap(env: Env) -> Result<i128, Error> {
        Ok(Self::get_config(env)?.cap)
    }

    pub fn get_goal(env: Env) -> Result<i128, Error> {
        Ok(Self::get_config(env)?.goal)
    }

    pub fn opening_time(env: Env) -> Result<u64, Error> {
        Ok(Self::get_config(env)?.opening_time)
    }

    pub fn closing_time(env: Env) -> Result<u64, Error> {
        Ok(Self::get_config(env)?.closing_time)
    }

    pub fn release_time(env: Env) -> Result<u64, Error> {
        Ok(Self::get_config(env)?.release_time)
    }

    pub fn founders_fund(env: Env) -> Result<Address, Error> {
        Ok(Self::get_config(env)?.founders_fund)
    }

    pub fn foundation_fund(env: Env) -> Result<Address, Error> {
        Ok(Self::get_config(env)?.foundation_fund)
    }

    pub fn partners_fund(env: Env) -> Result<Address, Error> {
        Ok(Self::get_config(env)?.partners_fund)
    }

    pub fn founders_timelock(env: Env) -> Result<Option<u64>, Error> {
        Ok(Self::get_state(env)?.founders_timelock)
    }

    pub fn foundation_timelock(env: Env) -> Result<Option<u64>, Error> {
        Ok(Self::get_state(env)?.foundation_timelock)
    }

    pub fn partners_timelock(env: Env) -> Result<Option<u64>, Error> {
        Ok(Self::get_state(env)?.partners_timelock)
    }

    pub fn investor_min_cap(env: Env) -> Result<i128, Error> {
        Ok(get_investor_caps(&env)?.min)
    }

    pub fn investor_max_cap(env: Env) -> Result<i128, Error> {
        Ok(get_investor_caps(&env)?.max)
    }

    pub fn get_policy(env: Env) -> Result<DistributionPolicy, Error> {
        get_policy(&env)
    }

    pub fn token_sale_percentage(env: Env) -> Result<u32, Error> {
        Ok(get_policy(&env)?.sale)
    }

    pub fn founders_percentage(env: Env) -> Result<u32, Error> {
        Ok(get_policy(&env)?.founders)
    }

    pub fn foundation_percentage(env: Env) -> Result<u32, Error> {
        Ok(get_policy(&env)?.foundation)
    }

    pub fn partners_percentage(env: Env) -> Result<u32, Error> {
        Ok(get_policy(&env)?.partners)
    }

    pub fn escrow(env: Env) -> Result<Address, Error> {
        get_escrow(&env)
    }

    pub fn timelock(env: Env) -> Result<Address, Error> {
        get_timelock(&env)
    }

    pub fn payment_token(env: Env) -> Result<Address, Error> {
        get_payment_token(&env)
    }
}
