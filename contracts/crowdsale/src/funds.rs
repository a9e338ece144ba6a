//! Escrow coordination: where contributed base currency goes, and what
//! happens to it once the sale outcome is known.

use soroban_sdk::{token, Address, Env};

use crate::errors::Error;
use crate::interfaces::EscrowClient;
use crate::storage;
use crate::types::{CrowdsaleStage, SaleConfig};

/// PreIco funds go straight to the wallet and are never refundable. Ico
/// funds are held in escrow under the beneficiary until finalization.
pub fn route_funds(
    env: &Env,
    epoch: u32,
    config: &SaleConfig,
    stage: CrowdsaleStage,
    purchaser: &Address,
    beneficiary: &Address,
    amount: i128,
) -> Result<(), Error> {
    let payment = token::Client::new(env, &storage::get_payment_token(env)?);
    match stage {
        CrowdsaleStage::PreIco => {
            payment.transfer(purchaser, &config.wallet, &amount);
        }
        CrowdsaleStage::Ico => {
            let escrow_address = storage::get_escrow(env)?;
            payment.transfer(purchaser, &escrow_address, &amount);
            EscrowClient::new(env, &escrow_address).deposit(&epoch, beneficiary, &amount);
        }
    }
    Ok(())
}

pub fn finalize_funds(env: &Env, epoch: u32, goal_reached: bool) -> Result<(), Error> {
    let escrow = EscrowClient::new(env, &storage::get_escrow(env)?);
    if goal_reached {
        escrow.close(&epoch);
        escrow.beneficiary_withdraw(&epoch);
    } else {
        escrow.enable_refunds(&epoch);
    }
    Ok(())
}

/// Pay `investor` its escrowed deposit for `epoch`. The escrow zeroes the
/// entry before transferring, so a second claim finds nothing.
pub fn claim_refund(env: &Env, epoch: u32, investor: &Address) -> Result<i128, Error> {
    let escrow = EscrowClient::new(env, &storage::get_escrow(env)?);
    if escrow.deposits_of(&epoch, investor) <= 0 {
        return Err(Error::NothingToRefund);
    }
    Ok(escrow.withdraw(&epoch, investor))
}
