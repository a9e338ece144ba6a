
pub use fixtures::*;

/// Common test constants
pub mod constants {
    /// One unit of the base currency (7 decimals).
    pub const UNIT: i128 = 10_000_000;
    /// One whole sale token (18 decimals).
    pub const TOKEN_UNIT: i128 = 1_000_000_000_000_000_000;

    pub const WEEK: u64 = 7 * 24 * 60 * 60;
    pub const YEAR: u64 = 365 * 24 * 60 * 60;
    pub const START: u64 = 1_700_000_000;

    pub const PRE_RATE: i128 = 500;
    pub const RATE: i128 = 300;
    pub const CAP: i128 = 100 * UNIT;
    pub const GOAL: i128 = 50 * UNIT;
    pub const MIN_CAP: i128 = UNIT / 100;
    pub const MAX_CAP: i128 = 50 * UNIT;
    pub const INITIAL_SUPPLY: i128 = 1000 * TOKEN_UNIT;
    pub const INVESTOR_FUNDING: i128 = 1_000 * UNIT;
}
