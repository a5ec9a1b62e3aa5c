use crate::errors::Result;
use crate::expected_keepers::BankKeeper;
use crate::keeper::TreasuryKeeper;
use crate::MODULE_NAME;
use ledger_bank::{format_invariant, InvariantResult};
use ledger_storage::Context;

/// The module account holds at least the integral part of the tally.
pub fn community_pool_backed<B: BankKeeper>(
    keeper: &TreasuryKeeper<B>,
    ctx: &Context<'_>,
) -> Result<InvariantResult> {
    let pool = keeper.get_fee_pool(ctx)?;
    let (owed, _) = pool.community_pool.truncate_decimal();
    let held = keeper.bank().get_all_balances(ctx, &keeper.module_address())?;
    let broken = !held.is_all_gte(&owed);
    Ok((
        format_invariant(
            MODULE_NAME,
            "community-pool-backed",
            &format!("\tcommunity pool: {}\n\tmodule balance: {held}\n", pool.community_pool),
        ),
        broken,
    ))
}
