use crowdsale::{split_reserves, CrowdsaleStage, DistributionPolicy, Error};
use refund_escrow::EscrowState;
use soroban_sdk::testutils::{Address as _, MockAuth, MockAuthInvoke};
use soroban_sdk::{Address, IntoVal};

use crate::utils::constants::*;
use crate::utils::SaleFixture;

#[test]
fn test_full_successful_sale_workflow() {
    let sale = SaleFixture::deploy();
    let investors = sale.investors(3);
    let wallet_start = sale.payment.balance(&sale.wallet);

    // pre-sale at the discounted rate, paid straight to the wallet
    sale.crowdsale
        .buy_tokens(&investors[0], &investors[0], &(20 * UNIT));
    assert_eq!(sale.payment.balance(&sale.wallet), wallet_start + 20 * UNIT);

    // main sale, held in escrow
    sale.crowdsale
        .set_crowdsale_stage(&sale.owner, &CrowdsaleStage::Ico);
    sale.crowdsale
        .buy_tokens(&investors[1], &investors[1], &(25 * UNIT));
    sale.crowdsale
        .buy_tokens(&investors[2], &investors[2], &(15 * UNIT));
    assert_eq!(sale.payment.balance(&sale.escrow_id), 40 * UNIT);
    assert_eq!(sale.crowdsale.total_raised(), 60 * UNIT);

    assert_eq!(sale.token.balance(&investors[0]), 20 * UNIT * PRE_RATE);
    assert_eq!(sale.token.balance(&investors[1]), 25 * UNIT * RATE);
    assert_eq!(sale.token.balance(&investors[2]), 15 * UNIT * RATE);

    // keep the token frozen until the sale wraps up
    sale.crowdsale.pause_token(&sale.owner);

    sale.close_sale();
    let already_minted = sale.token.total_supply();
    assert!(sale.crowdsale.finalize());

    // escrow swept to the wallet
    assert_eq!(sale.escrow.state(&0), EscrowState::Closed);
    assert_eq!(sale.payment.balance(&sale.escrow_id), 0);
    assert_eq!(sale.payment.balance(&sale.wallet), wallet_start + 60 * UNIT);

    let split = split_reserves(&DistributionPolicy::standard(), already_minted).unwrap();
    assert_eq!(
        sale.token.total_supply(),
        already_minted + split.total_reserved()
    );
    assert_eq!(sale.timelock.locked_balance(&sale.token_id), split.total_reserved());

    // hand the token over and let it trade
    sale.crowdsale.withdraw_tokens(&sale.owner, &investors[0]);
    assert_eq!(sale.token.owner(), sale.wallet);
    assert!(!sale.token.paused());
    sale.token.transfer(&investors[0], &investors[1], &UNIT);

    // reserves unlock after a year
    sale.warp_to(sale.crowdsale.release_time());
    let vaults = [
        sale.crowdsale.founders_timelock().unwrap(),
        sale.crowdsale.foundation_timelock().unwrap(),
        sale.crowdsale.partners_timelock().unwrap(),
    ];
    for (vault_id, fund) in vaults.iter().zip(sale.funds.all()) {
        sale.timelock.release(vault_id);
        assert_eq!(sale.token.balance(fund), split.founders);
    }
    assert_eq!(sale.timelock.locked_balance(&sale.token_id), 0);
}

#[test]
fn test_failed_sale_refunds_every_ico_investor() {
    let sale = SaleFixture::deploy();
    sale.crowdsale
        .set_crowdsale_stage(&sale.owner, &CrowdsaleStage::Ico);
    let investors = sale.investors(4);
    for (i, investor) in investors.iter().enumerate() {
        let amount = (i as i128 + 1) * 2 * UNIT;
        sale.crowdsale.buy_tokens(investor, investor, &amount);
    }
    assert_eq!(sale.crowdsale.total_raised(), 20 * UNIT);

    sale.close_sale();
    assert!(!sale.crowdsale.finalize());
    assert_eq!(sale.escrow.state(&0), EscrowState::Refunding);
    assert_eq!(sale.timelock.vault_count(), 0);

    for (i, investor) in investors.iter().enumerate() {
        let amount = (i as i128 + 1) * 2 * UNIT;
        assert_eq!(sale.crowdsale.claim_refund(investor), amount);
        assert_eq!(sale.payment.balance(investor), INVESTOR_FUNDING);
    }
    assert_eq!(sale.payment.balance(&sale.escrow_id), 0);
    assert_eq!(sale.escrow.total_held(&0), 0);
}

#[test]
fn test_refund_follows_beneficiary_not_payer() {
    let sale = SaleFixture::deploy();
    sale.crowdsale
        .set_crowdsale_stage(&sale.owner, &CrowdsaleStage::Ico);
    let payer = sale.investor();
    let beneficiary = sale.investor();

    sale.crowdsale.buy_tokens(&payer, &beneficiary, &(3 * UNIT));
    sale.close_sale();
    sale.crowdsale.finalize();

    assert_eq!(
        sale.crowdsale.try_claim_refund(&payer),
        Err(Ok(Error::NothingToRefund))
    );
    assert_eq!(sale.crowdsale.claim_refund(&beneficiary), 3 * UNIT);
    assert_eq!(
        sale.payment.balance(&beneficiary),
        INVESTOR_FUNDING + 3 * UNIT
    );
}

#[test]
fn test_purchase_requires_purchaser_auth() {
    let sale = SaleFixture::deploy();
    let investor = sale.investor();
    let thief = Address::generate(&sale.env);

    // the thief signs, but the funds would come from the investor
    let result = sale
        .crowdsale
        .mock_auths(&[MockAuth {
            address: &thief,
            invoke: &MockAuthInvoke {
                contract: &sale.crowdsale_id,
                fn_name: "buy_tokens",
                args: (&investor, &investor, UNIT).into_val(&sale.env),
                sub_invokes: &[],
            },
        }])
        .try_buy_tokens(&investor, &investor, &UNIT);
    assert!(result.is_err());

    sale.env.mock_all_auths();
    assert_eq!(sale.crowdsale.total_raised(), 0);
    assert_eq!(sale.payment.balance(&investor), INVESTOR_FUNDING);
}

#[test]
fn test_finalize_is_public() {
    let sale = SaleFixture::deploy();
    let investors = sale.investors(2);
    for investor in investors.iter() {
        sale.crowdsale.buy_tokens(investor, investor, &(30 * UNIT));
    }
    sale.close_sale();

    // no signatures at all
    assert!(sale.crowdsale.mock_auths(&[]).finalize());
    assert!(sale.crowdsale.finalized());
}

#[test]
fn test_escrow_rejects_callers_other_than_crowdsale() {
    let sale = SaleFixture::deploy();
    let outsider = Address::generate(&sale.env);

    let result = sale
        .escrow
        .mock_auths(&[MockAuth {
            address: &outsider,
            invoke: &MockAuthInvoke {
                contract: &sale.escrow_id,
                fn_name: "enable_refunds",
                args: (0u32,).into_val(&sale.env),
                sub_invokes: &[],
            },
        }])
        .try_enable_refunds(&0);
    assert!(result.is_err());

    sale.env.mock_all_auths();
    assert_eq!(sale.escrow.state(&0), EscrowState::Active);
}

#[test]
fn test_paused_token_blocks_vault_release_until_resumed() {
    let sale = SaleFixture::deploy();
    let investors = sale.investors(2);
    for investor in investors.iter() {
        sale.crowdsale.buy_tokens(investor, investor, &(30 * UNIT));
    }
    sale.crowdsale.pause_token(&sale.owner);
    sale.close_sale();
    sale.crowdsale.finalize();

    sale.warp_to(sale.crowdsale.release_time());
    let vault_id = sale.crowdsale.founders_timelock().unwrap();
    assert!(sale.timelock.try_release(&vault_id).is_err());
    assert!(!sale.timelock.get_vault(&vault_id).unwrap().released);

    sale.crowdsale.unpause_token(&sale.owner);
    let amount = sale.timelock.release(&vault_id);
    assert_eq!(sale.token.balance(&sale.funds.founders), amount);
}
