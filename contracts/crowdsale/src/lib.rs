#![no_std]

mod contract;
mod distribution;
mod errors;
mod events;
mod funds;
mod interfaces;
mod ledger;
mod rate;
mod storage;
mod types;
mod whitelist;


pub use contract::{Crowdsale, CrowdsaleClient};
pub use distribution::{split_reserves, ReserveSplit};
pub use errors::{Error, ErrorClass};
pub use types::{CrowdsaleStage, DistributionPolicy, InvestorCaps, SaleConfig, SaleState};
