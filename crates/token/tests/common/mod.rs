#![allow(dead_code)]

use ledger_auth::{ModuleAccountRegistry, Permission, StoreAccountKeeper};
use ledger_bank::BaseKeeper;
use ledger_storage::Context;
use ledger_token::TokenKeeper;
use ledger_treasury::TreasuryKeeper;
use ledger_types::{Address, Coins, Metadata};
use std::sync::Arc;

pub const NATIVE: &str = "stake";
pub const MINT_MODULE: &str = "token";
pub const DEFAULT_FEE: u64 = 100_000_000;

pub type Bank = BaseKeeper<StoreAccountKeeper>;
pub type Keeper = TokenKeeper<Bank, TreasuryKeeper<Bank>>;

pub fn keeper() -> Keeper {
    let registry = Arc::new(ModuleAccountRegistry::new([
        ("fee_collector", &[][..]),
        ("distribution", &[][..]),
        (MINT_MODULE, &[Permission::Minter, Permission::Burner][..]),
        ("bonded_tokens_pool", &[Permission::Burner, Permission::Staking][..]),
    ]));
    let bank = BaseKeeper::new(StoreAccountKeeper::new(registry));
    TokenKeeper::new(bank.clone(), TreasuryKeeper::new(bank), NATIVE)
}

/// Register the native denomination the way genesis does.
pub fn seed_native(keeper: &Keeper, ctx: &mut Context<'_>) {
    keeper
        .bank()
        .set_denom_metadata(ctx, &Metadata::default_native(NATIVE))
        .unwrap();
}

pub fn addr(byte: u8) -> Address {
    Address::new([byte; 32])
}

pub fn coins(s: &str) -> Coins {
    s.parse().unwrap()
}

pub fn fund(keeper: &Keeper, ctx: &mut Context<'_>, to: &Address, amt: &str) {
    let amt = coins(amt);
    keeper.bank().mint_coins(ctx, MINT_MODULE, &amt).unwrap();
    keeper
        .bank()
        .send_coins_from_module_to_account(ctx, MINT_MODULE, to, &amt)
        .unwrap();
}
