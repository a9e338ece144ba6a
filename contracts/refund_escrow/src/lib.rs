#![no_std]

//! Refund escrow for crowdsale contributions.
//!
//! The escrow keeps one ledger per sale epoch. Deposits are recorded per
//! payee while a ledger is `Active`; the owning crowdsale then either
//! closes it (funds go to the beneficiary) or enables refunds (each payee
//! pulls back exactly what it deposited).

use soroban_sdk::{
    contract, contracterror, contractimpl, contractmeta, contracttype, symbol_short, token,
    Address, Env, Symbol,
};

contractmeta!(
    key = "Description",
    val = "Per-epoch refund escrow for crowdsale deposits"
);

const REENTRANCY_LOCK: Symbol = symbol_short!("relock");

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum EscrowError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    LedgerExists = 3,
    LedgerNotFound = 4,
    NotActive = 5,
    NotRefunding = 6,
    NotClosed = 7,
    InvalidAmount = 8,
    Unbacked = 9,
    NothingToWithdraw = 10,
    Reentrant = 11,
    Overflow = 12,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum EscrowState {
    Active,
    Refunding,
    Closed,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct EscrowLedger {
    pub beneficiary: Address,
    pub state: EscrowState,
    pub total_held: i128,
}

#[contracttype]
pub enum DataKey {
    Owner,
    PaymentToken,
    TotalHeld,
    Ledger(u32),
    Deposit(u32, Address),
}

fn require_not_reentrant(env: &Env) -> Result<(), EscrowError> {
    let locked: bool = env
        .storage()
        .temporary()
        .get(&REENTRANCY_LOCK)
        .unwrap_or(false);
    if locked {
        return Err(EscrowError::Reentrant);
    }
    env.storage().temporary().set(&REENTRANCY_LOCK, &true);
    Ok(())
}

fn clear_reentrancy(env: &Env) {
    env.storage().temporary().remove(&REENTRANCY_LOCK);
}

fn require_owner(env: &Env) -> Result<(), EscrowError> {
    let owner: Address = env
        .storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(EscrowError::NotInitialized)?;
    owner.require_auth();
    Ok(())
}

fn payment_token(env: &Env) -> Result<Address, EscrowError> {
    env.storage()
        .instance()
        .get(&DataKey::PaymentToken)
        .ok_or(EscrowError::NotInitialized)
}

fn total_held_all(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalHeld)
        .unwrap_or(0)
}

fn set_total_held_all(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::TotalHeld, &amount);
}

fn load_ledger(env: &Env, epoch: u32) -> Result<EscrowLedger, EscrowError> {
    env.storage()
        .persistent()
        .get(&DataKey::Ledger(epoch))
        .ok_or(EscrowError::LedgerNotFound)
}

fn save_ledger(env: &Env, epoch: u32, ledger: &EscrowLedger) {
    env.storage()
        .persistent()
        .set(&DataKey::Ledger(epoch), ledger);
}

fn read_deposit(env: &Env, epoch: u32, payee: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Deposit(epoch, payee.clone()))
        .unwrap_or(0)
}

fn write_deposit(env: &Env, epoch: u32, payee: &Address, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::Deposit(epoch, payee.clone()), &amount);
}

#[contract]
pub struct RefundEscrow;

#[contractimpl]
impl RefundEscrow {
    pub fn initialize(env: Env, owner: Address, payment_token: Address) -> Result<(), EscrowError> {
        if env.storage().instance().has(&DataKey::Owner) {
            return Err(EscrowError::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage()
            .instance()
            .set(&DataKey::PaymentToken, &payment_token);
        set_total_held_all(&env, 0);
        Ok(())
    }

    /// Open a fresh ledger for `epoch`, paying out to `beneficiary` on close.
    pub fn open(env: Env, epoch: u32, beneficiary: Address) -> Result<(), EscrowError> {
        require_owner(&env)?;
        if env.storage().persistent().has(&DataKey::Ledger(epoch)) {
            return Err(EscrowError::LedgerExists);
        }
        let ledger = EscrowLedger {
            beneficiary: beneficiary.clone(),
            state: EscrowState::Active,
            total_held: 0,
        };
        save_ledger(&env, epoch, &ledger);
        env.events().publish((symbol_short!("EscOpen"), epoch), beneficiary);
        Ok(())
    }

    /// Record `amount` already transferred into the escrow on behalf of `payee`.
    pub fn deposit(env: Env, epoch: u32, payee: Address, amount: i128) -> Result<(), EscrowError> {
        require_owner(&env)?;
        if amount <= 0 {
            return Err(EscrowError::InvalidAmount);
        }
        let mut ledger = load_ledger(&env, epoch)?;
        if ledger.state != EscrowState::Active {
            return Err(EscrowError::NotActive);
        }

        // every recorded holding must be covered by the escrow's balance
        let held = total_held_all(&env)
            .checked_add(amount)
            .ok_or(EscrowError::Overflow)?;
        let balance = token::Client::new(&env, &payment_token(&env)?)
            .balance(&env.current_contract_address());
        if balance < held {
            return Err(EscrowError::Unbacked);
        }

        let deposited = read_deposit(&env, epoch, &payee)
            .checked_add(amount)
            .ok_or(EscrowError::Overflow)?;
        ledger.total_held = ledger
            .total_held
            .checked_add(amount)
            .ok_or(EscrowError::Overflow)?;
        save_ledger(&env, epoch, &ledger);
        write_deposit(&env, epoch, &payee, deposited);
        set_total_held_all(&env, held);

        env.events().publish((symbol_short!("Deposited"), epoch, payee), amount);
        Ok(())
    }

    pub fn enable_refunds(env: Env, epoch: u32) -> Result<(), EscrowError> {
        require_owner(&env)?;
        let mut ledger = load_ledger(&env, epoch)?;
        if ledger.state != EscrowState::Active {
            return Err(EscrowError::NotActive);
        }
        ledger.state = EscrowState::Refunding;
        save_ledger(&env, epoch, &ledger);
        env.events().publish((symbol_short!("Refunding"), epoch), ());
        Ok(())
    }

    pub fn close(env: Env, epoch: u32) -> Result<(), EscrowError> {
        require_owner(&env)?;
        let mut ledger = load_ledger(&env, epoch)?;
        if ledger.state != EscrowState::Active {
            return Err(EscrowError::NotActive);
        }
        ledger.state = EscrowState::Closed;
        save_ledger(&env, epoch, &ledger);
        env.events().publish((symbol_short!("EscClosed"), epoch), ());
        Ok(())
    }

    /// Pay a refunding payee its full deposit. Owner only, exactly once.
    pub fn withdraw(env: Env, epoch: u32, payee: Address) -> Result<i128, EscrowError> {
        require_owner(&env)?;
        require_not_reentrant(&env)?;

        let ledger = load_ledger(&env, epoch)?;
        if ledger.state != EscrowState::Refunding {
            clear_reentrancy(&env);
            return Err(EscrowError::NotRefunding);
        }
        let amount = read_deposit(&env, epoch, &payee);
        if amount <= 0 {
            clear_reentrancy(&env);
            return Err(EscrowError::NothingToWithdraw);
        }

        // effects before the transfer
        write_deposit(&env, epoch, &payee, 0);
        let mut ledger = ledger;
        ledger.total_held -= amount;
        save_ledger(&env, epoch, &ledger);
        set_total_held_all(&env, total_held_all(&env) - amount);

        token::Client::new(&env, &payment_token(&env)?).transfer(
            &env.current_contract_address(),
            &payee,
            &amount,
        );

        env.events().publish((symbol_short!("Withdrawn"), epoch), (payee, amount));
        clear_reentrancy(&env);
        Ok(amount)
    }

    /// Send everything held for a closed ledger to its beneficiary.
    pub fn beneficiary_withdraw(env: Env, epoch: u32) -> Result<i128, EscrowError> {
        require_not_reentrant(&env)?;

        let mut ledger = load_ledger(&env, epoch)?;
        if ledger.state != EscrowState::Closed {
            clear_reentrancy(&env);
            return Err(EscrowError::NotClosed);
        }
        let amount = ledger.total_held;
        ledger.total_held = 0;
        save_ledger(&env, epoch, &ledger);
        set_total_held_all(&env, total_held_all(&env) - amount);

        if amount > 0 {
            token::Client::new(&env, &payment_token(&env)?).transfer(
                &env.current_contract_address(),
                &ledger.beneficiary,
                &amount,
            );
        }

        env.events().publish(
            (symbol_short!("BenWithdr"), epoch),
            (ledger.beneficiary, amount),
        );
        clear_reentrancy(&env);
        Ok(amount)
    }

    pub fn state(env: Env, epoch: u32) -> Result<EscrowState, EscrowError> {
        Ok(load_ledger(&env, epoch)?.state)
    }

    pub fn get_ledger(env: Env, epoch: u32) -> Option<EscrowLedger> {
        env.storage().persistent().get(&DataKey::Ledger(epoch))
    }

    pub fn deposits_of(env: Env, epoch: u32, payee: Address) -> i128 {
        read_deposit(&env, epoch, &payee)
    }

    pub fn withdrawal_allowed(env: Env, epoch: u32, payee: Address) -> bool {
        match load_ledger(&env, epoch) {
            Ok(ledger) => {
                ledger.state == EscrowState::Refunding && read_deposit(&env, epoch, &payee) > 0
            }
            Err(_) => false,
        }
    }

    pub fn total_held(env: Env, epoch: u32) -> i128 {
        load_ledger(&env, epoch)
            .map(|ledger| ledger.total_held)
            .unwrap_or(0)
    }
}
