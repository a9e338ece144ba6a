use soroban_sdk::{contracttype, Address, Env};

use crate::errors::Error;

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CrowdsaleStage {
    PreIco = 0,
    Ico = 1,
}

/// Parameters of one sale epoch. Replaced wholesale by `set_new_ico`.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SaleConfig {
    pub pre_rate: i128, // tokens per base unit during PreIco
    pub rate: i128,     // tokens per base unit during Ico
    pub wallet: Address,
    pub token: Address,
    pub mintable_token: Address,
    pub cap: i128,
    pub opening_time: u64,
    pub closing_time: u64,
    pub goal: i128,
    pub founders_fund: Address,
    pub foundation_fund: Address,
    pub partners_fund: Address,
    pub release_time: u64,
}

impl SaleConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.pre_rate <= 0 || self.rate <= 0 {
            return Err(Error::InvalidRate);
        }
        if self.cap <= 0 {
            return Err(Error::InvalidCap);
        }
        if self.goal < 0 {
            return Err(Error::InvalidGoal);
        }
        if self.goal > self.cap {
            return Err(Error::GoalExceedsCap);
        }
        if self.opening_time >= self.closing_time || self.closing_time >= self.release_time {
            return Err(Error::InvalidTimeRange);
        }
        Ok(())
    }
}

/// Mutable state of one sale epoch.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SaleState {
    pub stage: CrowdsaleStage,
    pub total_raised: i128,
    pub finalized: bool,
    pub goal_reached: bool, // latched at finalize
    pub tokens_released: bool,
    pub founders_timelock: Option<u64>,
    pub foundation_timelock: Option<u64>,
    pub partners_timelock: Option<u64>,
}

impl SaleState {
    pub fn new() -> Self {
        SaleState {
            stage: CrowdsaleStage::PreIco,
            total_raised: 0,
            finalized: false,
            goal_reached: false,
            tokens_released: false,
            founders_timelock: None,
            foundation_timelock: None,
            partners_timelock: None,
        }
    }
}

/// Bounds applied to every single contribution.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct InvestorCaps {
    pub min: i128,
    pub max: i128,
}

impl InvestorCaps {
    pub fn validate(&self) -> Result<(), Error> {
        if self.min <= 0 || self.min > self.max {
            return Err(Error::InvalidInvestorCaps);
        }
        Ok(())
    }
}

/// Percentage split of the final token supply.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct DistributionPolicy {
    pub sale: u32,
    pub founders: u32,
    pub foundation: u32,
    pub partners: u32,
}

impl DistributionPolicy {
    /// 70% sale, 10% each for founders, foundation and partners.
    pub fn standard() -> Self {
        DistributionPolicy {
            sale: 70,
            founders: 10,
            foundation: 10,
            partners: 10,
        }
    }
}

#[contracttype]
pub enum DataKey {
    Owner,
    PaymentToken,
    Escrow,
    Timelock,
    InvestorCaps,
    Policy,
    CurrentEpoch,
    EpochConfig(u32),
    EpochState(u32),
    Whitelisted(Address),
    Contribution(u32, Address),
}

pub fn get_ledger_timestamp(env: &Env) -> u64 {
    env.ledger().timestamp()
}
