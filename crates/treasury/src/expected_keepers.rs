//! What the pool needs from the ledger core.

use ledger_auth::AccountKeeper;
use ledger_bank::{BankError, BaseKeeper};
use ledger_storage::Context;
use ledger_types::{Address, Coins};

pub trait BankKeeper {
    fn send_coins_from_account_to_module(
        &self,
        ctx: &mut Context<'_>,
        sender: &Address,
        recipient_module: &str,
        amt: &Coins,
    ) -> Result<(), BankError>;

    fn send_coins_from_module_to_account(
        &self,
        ctx: &mut Context<'_>,
        sender_module: &str,
        recipient: &Address,
        amt: &Coins,
    ) -> Result<(), BankError>;

    fn get_all_balances(&self, ctx: &Context<'_>, address: &Address) -> Result<Coins, BankError>;

    /// Panics if `module` is not registered.
    fn get_module_address(&self, module: &str) -> Address;
}

impl<A: AccountKeeper> BankKeeper for BaseKeeper<A> {
    fn send_coins_from_account_to_module(
        &self,
        ctx: &mut Context<'_>,
        sender: &Address,
        recipient_module: &str,
        amt: &Coins,
    ) -> Result<(), BankError> {
        BaseKeeper::send_coins_from_account_to_module(self, ctx, sender, recipient_module, amt)
    }

    fn send_coins_from_module_to_account(
        &self,
        ctx: &mut Context<'_>,
        sender_module: &str,
        recipient: &Address,
        amt: &Coins,
    ) -> Result<(), BankError> {
        BaseKeeper::send_coins_from_module_to_account(self, ctx, sender_module, recipient, amt)
    }

    fn get_all_balances(&self, ctx: &Context<'_>, address: &Address) -> Result<Coins, BankError> {
        BaseKeeper::get_all_balances(self, ctx, address)
    }

    fn get_module_address(&self, module: &str) -> Address {
        BaseKeeper::get_module_address(self, module)
    }
}
