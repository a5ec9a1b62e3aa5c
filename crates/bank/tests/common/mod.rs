#![allow(dead_code)]

use ledger_auth::{ModuleAccountRegistry, Permission, StoreAccountKeeper};
use ledger_bank::BaseKeeper;
use ledger_storage::Context;
use ledger_types::{Address, Coins};
use std::sync::Arc;

pub const TOKEN: &str = "token";
pub const BONDED: &str = "bonded_tokens_pool";
pub const FEE_COLLECTOR: &str = "fee_collector";

pub fn registry() -> Arc<ModuleAccountRegistry> {
    Arc::new(ModuleAccountRegistry::new([
        (FEE_COLLECTOR, &[][..]),
        ("distribution", &[][..]),
        (TOKEN, &[Permission::Minter, Permission::Burner][..]),
        (BONDED, &[Permission::Burner, Permission::Staking][..]),
    ]))
}

pub fn keeper() -> BaseKeeper<StoreAccountKeeper> {
    BaseKeeper::new(StoreAccountKeeper::new(registry()))
}

pub fn addr(byte: u8) -> Address {
    Address::new([byte; 32])
}

pub fn coins(s: &str) -> Coins {
    s.parse().unwrap()
}

/// Mint into the token module and hand the coins to `to`.
pub fn fund(bank: &BaseKeeper<StoreAccountKeeper>, ctx: &mut Context<'_>, to: &Address, amt: &str) {
    let amt = coins(amt);
    bank.mint_coins(ctx, TOKEN, &amt).unwrap();
    bank.send_coins_from_module_to_account(ctx, TOKEN, to, &amt)
        .unwrap();
}
