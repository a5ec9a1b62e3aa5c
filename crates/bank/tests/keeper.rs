mod common;

use common::*;
use ledger_auth::{Account, AccountKeeper, BaseAccount, DelayedVestingAccount, Permission};
use ledger_bank::invariants::{all_invariants, total_supply};
use ledger_bank::BankError;
use ledger_storage::{BlockHeader, Context, MemoryStore};
use ledger_types::{Coin, ErrorCode, Metadata};

#[test]
fn send_conserves_per_denom_totals() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let bank = keeper();
    fund(&bank, &mut ctx, &addr(1), "100btc,50stake");

    bank.send_coins(&mut ctx, &addr(1), &addr(2), &coins("30btc,5stake"))
        .unwrap();

    assert_eq!(bank.get_all_balances(&ctx, &addr(1)).unwrap(), coins("70btc,45stake"));
    assert_eq!(bank.get_all_balances(&ctx, &addr(2)).unwrap(), coins("30btc,5stake"));
    assert_eq!(bank.get_supplies(&ctx).unwrap().total, coins("100btc,50stake"));
    assert!(bank.accounts().get_account(&ctx, &addr(2)).unwrap().is_some());

    let (_, broken) = total_supply(&bank, &ctx).unwrap();
    assert!(!broken);
}

#[test]
fn failed_send_leaves_no_partial_debit() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let bank = keeper();
    fund(&bank, &mut ctx, &addr(1), "100btc,5stake");
    let events_before = ctx.events().len();

    let err = bank
        .send_coins(&mut ctx, &addr(1), &addr(2), &coins("10btc,6stake"))
        .unwrap_err();

    assert!(matches!(err, BankError::InsufficientFunds(_)));
    assert_eq!(err.code(), 5);
    assert_eq!(bank.get_balance(&ctx, &addr(1), "btc").unwrap(), Coin::new("btc", 100u64));
    assert!(bank.get_all_balances(&ctx, &addr(2)).unwrap().is_empty());
    assert_eq!(ctx.events().len(), events_before);
}

#[test]
fn invalid_amounts_are_rejected() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let bank = keeper();
    fund(&bank, &mut ctx, &addr(1), "100btc");

    bank.send_coins(&mut ctx, &addr(1), &addr(2), &ledger_types::Coins::empty())
        .unwrap();

    let bad: ledger_types::Coins = serde_json::from_str(r#"[{"denom":"btc","amount":"-1"}]"#).unwrap();
    let err = bank.send_coins(&mut ctx, &addr(1), &addr(2), &bad).unwrap_err();
    assert!(matches!(err, BankError::InvalidCoins(_)));
    assert_eq!(err.code(), 10);
}

#[test]
fn send_emits_transfer_events() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let bank = keeper();
    fund(&bank, &mut ctx, &addr(1), "10btc");
    ctx.take_events();

    bank.send_coins(&mut ctx, &addr(1), &addr(2), &coins("4btc")).unwrap();
    let transfer = ctx
        .events()
        .iter()
        .find(|e| e.kind == "transfer")
        .expect("transfer event");
    assert_eq!(transfer.attribute("amount"), Some("4btc"));
    assert_eq!(transfer.attribute("recipient"), Some(addr(2).to_string().as_str()));
    assert!(ctx.events().iter().any(|e| e.kind == "coin_spent"));
    assert!(ctx.events().iter().any(|e| e.kind == "coin_received"));
}

#[test]
fn mint_and_burn_move_supply_by_exactly_the_amount() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let bank = keeper();

    bank.mint_coins(&mut ctx, TOKEN, &coins("100btc")).unwrap();
    assert_eq!(bank.get_supply(&ctx, "btc").unwrap().total, Coin::new("btc", 100u64));

    bank.burn_coins(&mut ctx, TOKEN, &coins("40btc")).unwrap();
    assert_eq!(bank.get_supply(&ctx, "btc").unwrap().total, Coin::new("btc", 60u64));
    let token = bank.get_module_address(TOKEN);
    assert_eq!(bank.get_balance(&ctx, &token, "btc").unwrap(), Coin::new("btc", 60u64));

    let err = bank.burn_coins(&mut ctx, TOKEN, &coins("61btc")).unwrap_err();
    assert!(matches!(err, BankError::InsufficientFunds(_)));
    assert_eq!(bank.get_supply(&ctx, "btc").unwrap().total, Coin::new("btc", 60u64));

    let (_, broken) = all_invariants(&bank, &ctx).unwrap();
    assert!(!broken);
}

#[test]
#[should_panic(expected = "does not have permissions to mint tokens")]
fn minting_without_permission_panics() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let _ = keeper().mint_coins(&mut ctx, FEE_COLLECTOR, &coins("1btc"));
}

#[test]
#[should_panic(expected = "does not have permissions to burn tokens")]
fn burning_without_permission_panics() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let _ = keeper().burn_coins(&mut ctx, FEE_COLLECTOR, &coins("1btc"));
}

#[test]
#[should_panic(expected = "module account nowhere does not exist")]
fn unknown_module_panics() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let _ = keeper().send_coins_from_module_to_account(&mut ctx, "nowhere", &addr(1), &coins("1btc"));
}

#[test]
fn module_accounts_cannot_receive_user_sends() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let bank = keeper();
    fund(&bank, &mut ctx, &addr(1), "10stake");

    let token = bank.get_module_address(TOKEN);
    let err = bank
        .send_coins(&mut ctx, &addr(1), &token, &coins("1stake"))
        .unwrap_err();
    assert!(matches!(err, BankError::Unauthorized(_)));
    assert_eq!(err.code(), 4);
    assert_eq!(bank.get_all_balances(&ctx, &addr(1)).unwrap(), coins("10stake"));

    bank.mint_coins(&mut ctx, TOKEN, &coins("5btc")).unwrap();
    assert_eq!(bank.get_all_balances(&ctx, &token).unwrap(), coins("5btc"));
}

#[test]
fn unrestricted_sends_leave_module_accounts_to_the_registry() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let bank = keeper();
    fund(&bank, &mut ctx, &addr(1), "10btc");

    let bonded = bank.get_module_address(BONDED);
    bank.send_coins_unrestricted(&mut ctx, &addr(1), &bonded, &coins("4btc"))
        .unwrap();
    assert!(bank.accounts().get_account(&ctx, &bonded).unwrap().is_none());

    bank.burn_coins(&mut ctx, BONDED, &coins("4btc")).unwrap();
    let account = bank.accounts().get_account(&ctx, &bonded).unwrap().unwrap();
    assert_eq!(account.module_name(), Some(BONDED));
}

#[test]
#[should_panic(expected = "invalid module account")]
fn plain_account_at_module_address_panics_on_mint() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let bank = keeper();
    let token = bank.get_module_address(TOKEN);
    bank.accounts().set_account(&mut ctx, &Account::new_base(token)).unwrap();

    let _ = bank.mint_coins(&mut ctx, TOKEN, &coins("1btc"));
}

#[test]
#[should_panic(expected = "does not have permissions to receive delegated coins")]
fn delegating_to_non_staking_module_panics() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let bank = keeper();
    fund(&bank, &mut ctx, &addr(1), "10stake");
    let _ = bank.delegate_coins_from_account_to_module(&mut ctx, &addr(1), TOKEN, &coins("1stake"));
}

#[test]
#[should_panic(expected = "undelegation from module account")]
fn undelegating_more_than_the_pool_holds_panics() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let _ = keeper().undelegate_coins_from_module_to_account(&mut ctx, BONDED, &addr(1), &coins("1stake"));
}

#[test]
fn delegation_is_tracked_on_vesting_accounts() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader { height: 1, time: 0 });
    let bank = keeper();
    let vesting = Account::DelayedVesting(DelayedVestingAccount::new(
        BaseAccount::new(addr(7)),
        coins("50stake"),
        86_400,
    ));
    bank.accounts().set_account(&mut ctx, &vesting).unwrap();
    fund(&bank, &mut ctx, &addr(7), "100stake");

    bank.delegate_coins_from_account_to_module(&mut ctx, &addr(7), BONDED, &coins("70stake"))
        .unwrap();
    let pool = bank.get_module_address(BONDED);
    assert_eq!(bank.get_balance(&ctx, &pool, "stake").unwrap(), Coin::new("stake", 70u64));
    assert_eq!(bank.get_balance(&ctx, &addr(7), "stake").unwrap(), Coin::new("stake", 30u64));

    let account = bank.accounts().get_account(&ctx, &addr(7)).unwrap().unwrap();
    let tracker = account.as_vesting_tracker().unwrap();
    assert_eq!(tracker.delegated_vesting(), &coins("50stake"));
    assert_eq!(tracker.delegated_free(), &coins("20stake"));

    bank.undelegate_coins_from_module_to_account(&mut ctx, BONDED, &addr(7), &coins("30stake"))
        .unwrap();
    let account = bank.accounts().get_account(&ctx, &addr(7)).unwrap().unwrap();
    let tracker = account.as_vesting_tracker().unwrap();
    assert!(tracker.delegated_free().is_empty());
    assert_eq!(tracker.delegated_vesting(), &coins("40stake"));
    assert_eq!(bank.get_balance(&ctx, &addr(7), "stake").unwrap(), Coin::new("stake", 60u64));
}

#[test]
fn delegation_from_plain_accounts_needs_no_tracking() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let bank = keeper();
    fund(&bank, &mut ctx, &addr(1), "10stake");

    let err = bank
        .delegate_coins_from_account_to_module(&mut ctx, &addr(1), BONDED, &coins("11stake"))
        .unwrap_err();
    assert!(matches!(err, BankError::InsufficientFunds(_)));

    bank.delegate_coins_from_account_to_module(&mut ctx, &addr(1), BONDED, &coins("10stake"))
        .unwrap();
    assert!(bank.get_all_balances(&ctx, &addr(1)).unwrap().is_empty());
    let pool = bank.accounts().get_module_account(&mut ctx, BONDED).unwrap().unwrap();
    assert!(pool.has_permission(Permission::Staking));
    assert_eq!(bank.get_all_balances(&ctx, &pool.address()).unwrap(), coins("10stake"));
}

#[test]
fn delegating_to_an_unknown_address_fails() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let bank = keeper();
    fund(&bank, &mut ctx, &addr(1), "10stake");
    let err = bank
        .delegate_coins(&mut ctx, &addr(1), &addr(99), &coins("1stake"))
        .unwrap_err();
    assert!(matches!(err, BankError::UnknownAddress(_)));
    assert_eq!(bank.get_balance(&ctx, &addr(1), "stake").unwrap(), Coin::new("stake", 10u64));
}

#[test]
fn disabled_denoms_only_block_the_restricted_path() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let bank = keeper();
    let mut metadata = Metadata::new_token("btc", &addr(1).to_string(), 8);
    metadata.send_enabled = false;
    bank.set_denom_metadata(&mut ctx, &metadata).unwrap();
    fund(&bank, &mut ctx, &addr(1), "10btc");

    let err = bank
        .send_coins(&mut ctx, &addr(1), &addr(2), &coins("1btc"))
        .unwrap_err();
    assert!(matches!(err, BankError::SendDisabled(ref d) if d == "btc"));
    assert_eq!((err.codespace(), err.code()), ("bank", 5));

    bank.send_coins_from_account_to_module(&mut ctx, &addr(1), TOKEN, &coins("4btc"))
        .unwrap();
    let token = bank.get_module_address(TOKEN);
    assert_eq!(bank.get_balance(&ctx, &token, "btc").unwrap(), Coin::new("btc", 4u64));
}

#[test]
fn iteration_is_ordered_and_can_stop_early() {
    let mut store = MemoryStore::new();
    let mut ctx = Context::new(&mut store, BlockHeader::default());
    let bank = keeper();
    fund(&bank, &mut ctx, &addr(3), "1eth");
    fund(&bank, &mut ctx, &addr(1), "2btc,3eth");

    let first_two: Vec<_> = bank
        .iterate_all_balances(&ctx)
        .take(2)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(first_two[0], (addr(1), Coin::new("btc", 2u64)));
    assert_eq!(first_two[1], (addr(1), Coin::new("eth", 3u64)));

    let again = bank.iterate_all_balances(&ctx).count();
    assert_eq!(again, 3);
}
