//! Collaborators the token module drives.

use ledger_auth::AccountKeeper;
use ledger_bank::{BankError, BaseKeeper};
use ledger_storage::Context;
use ledger_treasury::{TreasuryError, TreasuryKeeper};
use ledger_types::{Address, Coins, Metadata, Supply};

pub trait BankKeeper {
    fn get_denom_metadata(&self, ctx: &Context<'_>, denom: &str) -> Result<Metadata, BankError>;
    fn set_denom_metadata(&self, ctx: &mut Context<'_>, metadata: &Metadata) -> Result<(), BankError>;
    fn get_all_denom_metadata(&self, ctx: &Context<'_>) -> Result<Vec<Metadata>, BankError>;
    fn get_supply(&self, ctx: &Context<'_>, denom: &str) -> Result<Supply, BankError>;

    fn mint_coins(&self, ctx: &mut Context<'_>, module: &str, amt: &Coins) -> Result<(), BankError>;
    fn burn_coins(&self, ctx: &mut Context<'_>, module: &str, amt: &Coins) -> Result<(), BankError>;

    fn send_coins_from_module_to_account(
        &self,
        ctx: &mut Context<'_>,
        sender_module: &str,
        recipient: &Address,
        amt: &Coins,
    ) -> Result<(), BankError>;

    fn send_coins_from_account_to_module(
        &self,
        ctx: &mut Context<'_>,
        sender: &Address,
        recipient_module: &str,
        amt: &Coins,
    ) -> Result<(), BankError>;
}

pub trait DistrKeeper {
    fn add_coins_from_account_to_fee_pool(
        &self,
        ctx: &mut Context<'_>,
        payer: &Address,
        amt: &Coins,
    ) -> Result<(), TreasuryError>;
}

impl<A: AccountKeeper> BankKeeper for BaseKeeper<A> {
    fn get_denom_metadata(&self, ctx: &Context<'_>, denom: &str) -> Result<Metadata, BankError> {
        BaseKeeper::get_denom_metadata(self, ctx, denom)
    }

    fn set_denom_metadata(&self, ctx: &mut Context<'_>, metadata: &Metadata) -> Result<(), BankError> {
        BaseKeeper::set_denom_metadata(self, ctx, metadata)
    }

    fn get_all_denom_metadata(&self, ctx: &Context<'_>) -> Result<Vec<Metadata>, BankError> {
        BaseKeeper::get_all_denom_metadata(self, ctx)
    }

    fn get_supply(&self, ctx: &Context<'_>, denom: &str) -> Result<Supply, BankError> {
        BaseKeeper::get_supply(self, ctx, denom)
    }

    fn mint_coins(&self, ctx: &mut Context<'_>, module: &str, amt: &Coins) -> Result<(), BankError> {
        BaseKeeper::mint_coins(self, ctx, module, amt)
    }

    fn burn_coins(&self, ctx: &mut Context<'_>, module: &str, amt: &Coins) -> Result<(), BankError> {
        BaseKeeper::burn_coins(self, ctx, module, amt)
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

    fn send_coins_from_account_to_module(
        &self,
        ctx: &mut Context<'_>,
        sender: &Address,
        recipient_module: &str,
        amt: &Coins,
    ) -> Result<(), BankError> {
        BaseKeeper::send_coins_from_account_to_module(self, ctx, sender, recipient_module, amt)
    }
}

impl<B: ledger_treasury::BankKeeper> DistrKeeper for TreasuryKeeper<B> {
    fn add_coins_from_account_to_fee_pool(
        &self,
        ctx: &mut Context<'_>,
        payer: &Address,
        amt: &Coins,
    ) -> Result<(), TreasuryError> {
        TreasuryKeeper::add_coins_from_account_to_fee_pool(self, ctx, payer, amt)
    }
}
