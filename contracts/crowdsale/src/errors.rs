use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotAuthorized = 1,
    AlreadyInitialized = 2,
    NotInitialized = 3,
    UnknownEpoch = 4,
    ArithmeticOverflow = 5,

    NotWhitelisted = 10,
    NotOpen = 11,
    NotClosed = 12,
    NotFinalized = 13,

    BelowInvestorMin = 20,
    AboveInvestorMax = 21,
    CapExceeded = 22,

    AlreadyFinalized = 30,
    RefundsNotEnabled = 31,
    NothingToRefund = 32,
    GoalNotReached = 33,
    TokensAlreadyReleased = 34,

    InvalidRate = 40,
    InvalidTimeRange = 41,
    GoalExceedsCap = 42,
    InvalidCap = 43,
    InvalidGoal = 44,
    InvalidInvestorCaps = 45,
    InvalidDistribution = 46,
}

/// Coarse failure classes surfaced to callers.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Authorization,
    Gating,
    Timing,
    Cap,
    State,
    Config,
}

impl Error {
    pub fn class(&self) -> ErrorClass {
        match self {
            Error::NotAuthorized => ErrorClass::Authorization,
            Error::NotWhitelisted => ErrorClass::Gating,
            Error::NotOpen | Error::NotClosed | Error::NotFinalized => ErrorClass::Timing,
            Error::BelowInvestorMin
            | Error::AboveInvestorMax
            | Error::CapExceeded
            | Error::ArithmeticOverflow => ErrorClass::Cap,
            Error::AlreadyInitialized
            | Error::NotInitialized
            | Error::UnknownEpoch
            | Error::AlreadyFinalized
            | Error::RefundsNotEnabled
            | Error::NothingToRefund
            | Error::GoalNotReached
            | Error::TokensAlreadyReleased => ErrorClass::State,
            Error::InvalidRate
            | Error::InvalidTimeRange
            | Error::GoalExceedsCap
            | Error::InvalidCap
            | Error::InvalidGoal
            | Error::InvalidInvestorCaps
            | Error::InvalidDistribution => ErrorClass::Config,
        }
    }
}
