use crowdsale::{CrowdsaleStage, Error};
use refund_escrow::EscrowState;

use crate::utils::constants::*;
use crate::utils::{sale_config, Funds, SaleFixture};

/// Run the first round to a failed finalization with one escrowed deposit.
fn failed_first_round(sale: &SaleFixture) -> soroban_sdk::Address {
    let investor = sale.investor();
    sale.crowdsale
        .set_crowdsale_stage(&sale.owner, &CrowdsaleStage::Ico);
    sale.crowdsale.buy_tokens(&investor, &investor, &(5 * UNIT));
    sale.close_sale();
    assert!(!sale.crowdsale.finalize());
    investor
}

#[test]
fn test_second_round_after_failed_first() {
    let sale = SaleFixture::deploy();
    let early = failed_first_round(&sale);

    let (token2_id, token2) = sale.next_round_token("SecondRound");
    let funds2 = Funds::generate(&sale.env);
    sale.warp_to(sale.now() + WEEK);
    let config = sale_config(&sale.env, &sale.wallet, &token2_id, &funds2);
    assert_eq!(sale.crowdsale.set_new_ico(&sale.owner, &config), 1);

    assert_eq!(sale.crowdsale.icos_address(&0), sale.token_id);
    assert_eq!(sale.crowdsale.icos_address(&1), token2_id);
    assert_eq!(sale.escrow.state(&1), EscrowState::Active);
    assert!(sale.crowdsale.is_open());

    // the whitelist survives, the round's ledger does not
    assert!(sale.crowdsale.is_whitelisted(&early));
    assert_eq!(sale.crowdsale.get_contributions(&early), 0);

    // round two succeeds on its own token
    let investors = sale.investors(2);
    for investor in investors.iter() {
        sale.crowdsale.buy_tokens(investor, investor, &(30 * UNIT));
    }
    assert_eq!(token2.balance(&investors[0]), 30 * UNIT * PRE_RATE);
    assert_eq!(sale.token.balance(&investors[0]), 0);

    sale.close_sale();
    assert!(sale.crowdsale.finalize());
    let vault_id = sale.crowdsale.founders_timelock().unwrap();
    let vault = sale.timelock.get_vault(&vault_id).unwrap();
    assert_eq!(vault.token, token2_id);
    assert_eq!(vault.beneficiary, funds2.founders);

    // round one refunds remain claimable by epoch
    assert_eq!(
        sale.crowdsale.try_claim_refund(&early),
        Err(Ok(Error::RefundsNotEnabled))
    );
    assert_eq!(sale.crowdsale.claim_refund_for_epoch(&early, &0), 5 * UNIT);
    assert_eq!(sale.payment.balance(&early), INVESTOR_FUNDING);
}

#[test]
fn test_epoch_history_is_preserved() {
    let sale = SaleFixture::deploy();
    failed_first_round(&sale);

    let (token2_id, _) = sale.next_round_token("SecondRound");
    let config = sale_config(&sale.env, &sale.wallet, &token2_id, &sale.funds);
    sale.crowdsale.set_new_ico(&sale.owner, &config);

    let first = sale.crowdsale.get_epoch_state(&0);
    assert!(first.finalized);
    assert!(!first.goal_reached);
    assert_eq!(first.total_raised, 5 * UNIT);

    let current = sale.crowdsale.get_state();
    assert!(!current.finalized);
    assert_eq!(current.total_raised, 0);
    assert_eq!(current.stage, CrowdsaleStage::PreIco);

    assert_eq!(sale.crowdsale.current_epoch(), 1);
    assert_eq!(sale.crowdsale.ico_count(), 2);
    assert_eq!(
        sale.crowdsale.try_get_epoch_config(&2),
        Err(Ok(Error::UnknownEpoch))
    );
}

#[test]
fn test_cannot_reconfigure_running_round() {
    let sale = SaleFixture::deploy();
    let (token2_id, _) = sale.next_round_token("SecondRound");
    let config = sale_config(&sale.env, &sale.wallet, &token2_id, &sale.funds);

    assert_eq!(
        sale.crowdsale.try_set_new_ico(&sale.owner, &config),
        Err(Ok(Error::NotFinalized))
    );
    assert_eq!(sale.crowdsale.ico_count(), 1);
}
