mod common;

use common::*;
use ledger_bank::BankError;
use ledger_storage::{BlockHeader, Context, MemoryStore};
use ledger_token::events::{ATTRIBUTE_KEY_ISSUER, ATTRIBUTE_KEY_SYMBOL, EVENT_TYPE_NEW_TOKEN};
use ledger_token::{
    handle_msg, MsgBurnToken, MsgInflateToken, MsgNewToken, TokenError, TokenMsg,
};
use ledger_types::{Amount, Coin, DecCoins, ErrorCode};

fn issue_btc(keeper: &Keeper, ctx: &mut Context<'_>) {
    let msg = MsgNewToken::new(&addr(1), &addr(2), 18, Coin::new("btc", 100u64));
    keeper.new_token(ctx, &msg).unwrap();
}

#[test]
fn new_token_charges_fee_mints_and_registers() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let keeper = keeper();
    seed_native(&keeper, &mut ctx);
    fund(&keeper, &mut ctx, &addr(1), "150000000stake");

    issue_btc(&keeper, &mut ctx);

    let bank = keeper.bank();
    assert_eq!(
        bank.get_balance(&ctx, &addr(1), NATIVE).unwrap(),
        Coin::new(NATIVE, 50_000_000u64)
    );
    assert_eq!(bank.get_balance(&ctx, &addr(2), "btc").unwrap(), Coin::new("btc", 100u64));
    assert_eq!(keeper.get_total_supply(&ctx, "btc").unwrap(), Amount::from(100u64));
    assert_eq!(keeper.get_issuer(&ctx, "btc").unwrap(), addr(1).to_string());
    assert_eq!(keeper.get_decimals(&ctx, "btc").unwrap(), 18);
    assert!(keeper.send_enabled(&ctx, "btc").unwrap());
    assert!(keeper.is_supported(&ctx, "btc").unwrap());

    let treasury = ledger_treasury::TreasuryKeeper::new(bank.clone());
    assert_eq!(
        treasury.get_fee_pool(&ctx).unwrap().community_pool,
        DecCoins::from_coins(&coins("100000000stake"))
    );

    let event = ctx
        .events()
        .iter()
        .find(|e| e.kind == EVENT_TYPE_NEW_TOKEN)
        .unwrap();
    assert_eq!(event.attribute(ATTRIBUTE_KEY_SYMBOL), Some("btc"));
    assert_eq!(event.attribute(ATTRIBUTE_KEY_ISSUER), Some(addr(1).to_string().as_str()));
}

#[test]
fn reissuing_a_denom_fails_without_side_effects() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let keeper = keeper();
    seed_native(&keeper, &mut ctx);
    fund(&keeper, &mut ctx, &addr(1), "300000000stake");
    issue_btc(&keeper, &mut ctx);
    let events_before = ctx.events().len();

    let msg = MsgNewToken::new(&addr(1), &addr(3), 6, Coin::new("btc", 5u64));
    let err = keeper.new_token(&mut ctx, &msg).unwrap_err();

    assert!(matches!(err, TokenError::DenomAlreadyExist(_)));
    assert_eq!((err.codespace(), err.code()), ("token", 2));
    assert_eq!(
        keeper.bank().get_balance(&ctx, &addr(1), NATIVE).unwrap(),
        Coin::new(NATIVE, 200_000_000u64)
    );
    assert_eq!(keeper.get_total_supply(&ctx, "btc").unwrap(), Amount::from(100u64));
    assert_eq!(keeper.get_decimals(&ctx, "btc").unwrap(), 18);
    assert_eq!(ctx.events().len(), events_before);
}

#[test]
fn unaffordable_fee_aborts_everything() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let keeper = keeper();
    seed_native(&keeper, &mut ctx);
    fund(&keeper, &mut ctx, &addr(1), "10stake");

    let msg = MsgNewToken::new(&addr(1), &addr(2), 6, Coin::new("btc", 100u64));
    let err = keeper.new_token(&mut ctx, &msg).unwrap_err();

    assert_eq!(err.code(), 5);
    assert!(!keeper.is_supported(&ctx, "btc").unwrap());
    assert!(keeper.get_total_supply(&ctx, "btc").unwrap().is_zero());
    assert_eq!(
        keeper.bank().get_balance(&ctx, &addr(1), NATIVE).unwrap(),
        Coin::new(NATIVE, 10u64)
    );
}

#[test]
fn only_the_issuer_may_inflate() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let keeper = keeper();
    seed_native(&keeper, &mut ctx);
    fund(&keeper, &mut ctx, &addr(1), "100000000stake");
    issue_btc(&keeper, &mut ctx);

    let stranger = MsgInflateToken::new(&addr(9), &addr(9), Coin::new("btc", 50u64));
    let err = handle_msg(&keeper, &mut ctx, &TokenMsg::InflateToken(stranger)).unwrap_err();
    assert!(matches!(err, TokenError::Unauthorized(_)));
    assert_eq!(err.code(), 4);
    assert_eq!(keeper.get_total_supply(&ctx, "btc").unwrap(), Amount::from(100u64));

    let issuer = MsgInflateToken::new(&addr(1), &addr(3), Coin::new("btc", 50u64));
    handle_msg(&keeper, &mut ctx, &TokenMsg::InflateToken(issuer)).unwrap();
    assert_eq!(keeper.get_total_supply(&ctx, "btc").unwrap(), Amount::from(150u64));
    assert_eq!(
        keeper.bank().get_balance(&ctx, &addr(3), "btc").unwrap(),
        Coin::new("btc", 50u64)
    );
}

#[test]
fn inflating_an_unknown_denom_fails() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let keeper = keeper();
    seed_native(&keeper, &mut ctx);

    let msg = MsgInflateToken::new(&addr(1), &addr(1), Coin::new("eth", 1u64));
    let err = keeper.inflate_token(&mut ctx, &msg).unwrap_err();
    assert!(matches!(err, TokenError::DenomNotExist(_)));
}

#[test]
fn inflating_the_native_denom_is_unauthorized() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let keeper = keeper();
    seed_native(&keeper, &mut ctx);

    let msg = MsgInflateToken::new(&addr(1), &addr(1), Coin::new(NATIVE, 1u64));
    let err = keeper.inflate_token(&mut ctx, &msg).unwrap_err();
    assert!(matches!(err, TokenError::Unauthorized(_)));
}

#[test]
fn any_holder_may_burn_their_balance() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let keeper = keeper();
    seed_native(&keeper, &mut ctx);
    fund(&keeper, &mut ctx, &addr(1), "100000000stake");
    issue_btc(&keeper, &mut ctx);

    let burn = MsgBurnToken::new(&addr(2), Coin::new("btc", 40u64));
    handle_msg(&keeper, &mut ctx, &TokenMsg::BurnToken(burn)).unwrap();
    assert_eq!(keeper.get_total_supply(&ctx, "btc").unwrap(), Amount::from(60u64));
    assert_eq!(
        keeper.bank().get_balance(&ctx, &addr(2), "btc").unwrap(),
        Coin::new("btc", 60u64)
    );

    let too_much = MsgBurnToken::new(&addr(2), Coin::new("btc", 61u64));
    let err = keeper.burn_token(&mut ctx, &too_much).unwrap_err();
    assert!(matches!(err, TokenError::Bank(BankError::InsufficientFunds(_))));
    assert_eq!(keeper.get_total_supply(&ctx, "btc").unwrap(), Amount::from(60u64));
}

#[test]
fn malformed_messages_fail_basic_validation() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let keeper = keeper();

    let overflow = MsgNewToken::new(&addr(1), &addr(2), 19, Coin::new("btc", 1u64));
    let err = keeper.new_token(&mut ctx, &overflow).unwrap_err();
    assert!(matches!(err, TokenError::DecimalsOverflow(_)));

    let mut bad_address = MsgBurnToken::new(&addr(1), Coin::new("btc", 1u64));
    bad_address.from_address = "nope".to_string();
    let err = keeper.burn_token(&mut ctx, &bad_address).unwrap_err();
    assert!(matches!(err, TokenError::InvalidAddress(_)));

    let zero = MsgBurnToken::new(&addr(1), Coin::new("btc", 0u64));
    let err = keeper.burn_token(&mut ctx, &zero).unwrap_err();
    assert!(matches!(err, TokenError::InvalidCoins(_)));
    assert!(ctx.events().is_empty());
}
