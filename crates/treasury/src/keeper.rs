use crate::errors::{Result, TreasuryError};
use crate::expected_keepers::BankKeeper;
use crate::fee_pool::{FeePool, FEE_POOL_KEY};
use crate::MODULE_NAME;
use ledger_storage::Context;
use ledger_types::{Address, Coins, DecCoins};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct TreasuryKeeper<B> {
    bank: B,
}

impl<B: BankKeeper> TreasuryKeeper<B> {
    pub fn new(bank: B) -> Self {
        Self { bank }
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    /// Address of the `distribution` module account.
    pub fn module_address(&self) -> Address {
        self.bank.get_module_address(MODULE_NAME)
    }

    pub fn get_fee_pool(&self, ctx: &Context<'_>) -> Result<FeePool> {
        Ok(ctx.get_json::<FeePool>(FEE_POOL_KEY)?.unwrap_or_default())
    }

    pub fn set_fee_pool(&self, ctx: &mut Context<'_>, pool: &FeePool) -> Result<()> {
        ctx.set_json(FEE_POOL_KEY, pool)?;
        Ok(())
    }

    /// Move `amt` from `payer` into the pool. The tally only grows when the
    /// transfer succeeds.
    pub fn add_coins_from_account_to_fee_pool(
        &self,
        ctx: &mut Context<'_>,
        payer: &Address,
        amt: &Coins,
    ) -> Result<()> {
        ctx.atomic(|ctx| -> Result<()> {
            self.bank
                .send_coins_from_account_to_module(ctx, payer, MODULE_NAME, amt)?;
            let mut pool = self.get_fee_pool(ctx)?;
            pool.community_pool = pool.community_pool.add(&DecCoins::from_coins(amt));
            self.set_fee_pool(ctx, &pool)
        })?;
        debug!(target: "treasury", payer = %payer, amount = %amt, "funded community pool");
        Ok(())
    }

    pub fn fund_community_pool(
        &self,
        ctx: &mut Context<'_>,
        depositor: &Address,
        amt: &Coins,
    ) -> Result<()> {
        self.add_coins_from_account_to_fee_pool(ctx, depositor, amt)
    }

    /// Pay `amt` out of the pool to `recipient`. The tally is checked and
    /// reduced before any coins move.
    pub fn distribute_from_fee_pool(
        &self,
        ctx: &mut Context<'_>,
        amt: &Coins,
        recipient: &Address,
    ) -> Result<()> {
        ctx.atomic(|ctx| -> Result<()> {
            let mut pool = self.get_fee_pool(ctx)?;
            let (remaining, negative) = pool.community_pool.safe_sub(&DecCoins::from_coins(amt));
            if negative {
                debug!(
                    target: "treasury",
                    requested = %amt,
                    available = %pool.community_pool,
                    "distribution exceeds community pool"
                );
                return Err(TreasuryError::BadDistribution(
                    "community pool does not have sufficient coins to distribute".into(),
                ));
            }
            pool.community_pool = remaining;
            self.set_fee_pool(ctx, &pool)?;

            self.bank
                .send_coins_from_module_to_account(ctx, MODULE_NAME, recipient, amt)?;
            Ok(())
        })?;
        info!(target: "treasury", recipient = %recipient, amount = %amt, "distributed from community pool");
        Ok(())
    }
}
