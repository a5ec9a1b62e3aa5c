//! Crisis-style checks over the whole ledger. Each returns a human-readable
//! report and whether the invariant is broken.

use crate::errors::BankError;
use crate::keeper::BaseKeeper;
use crate::MODULE_NAME;
use ledger_auth::AccountKeeper;
use ledger_storage::Context;
use ledger_types::Coins;

/// `(message, broken)`
pub type InvariantResult = (String, bool);

pub fn format_invariant(module: &str, name: &str, msg: &str) -> String {
    format!("{module}: {name} invariant\n{msg}\n")
}

/// No balance entry holds a negative amount.
pub fn nonnegative_outstanding<A: AccountKeeper>(
    keeper: &BaseKeeper<A>,
    ctx: &Context<'_>,
) -> Result<InvariantResult, BankError> {
    let mut msg = String::new();
    let mut count = 0usize;
    for item in keeper.iterate_all_balances(ctx) {
        let (address, coin) = item?;
        if coin.is_negative() {
            count += 1;
            msg.push_str(&format!("\t{address} has a negative balance of {coin}\n"));
        }
    }
    let broken = count != 0;
    Ok((
        format_invariant(
            MODULE_NAME,
            "nonnegative-outstanding",
            &format!("amount of negative balances found {count}\n{msg}"),
        ),
        broken,
    ))
}

/// Recorded supply equals the sum of all balances, per denomination.
pub fn total_supply<A: AccountKeeper>(
    keeper: &BaseKeeper<A>,
    ctx: &Context<'_>,
) -> Result<InvariantResult, BankError> {
    let mut expected = Coins::empty();
    for item in keeper.iterate_all_balances(ctx) {
        let (_, coin) = item?;
        expected = expected.add_coin(&coin);
    }
    let supply = keeper.get_supplies(ctx)?.total;
    let broken = supply != expected;
    Ok((
        format_invariant(
            MODULE_NAME,
            "total-supply",
            &format!("\tsum of accounts coins: {expected}\n\tsupply.Total:          {supply}\n"),
        ),
        broken,
    ))
}

pub fn all_invariants<A: AccountKeeper>(
    keeper: &BaseKeeper<A>,
    ctx: &Context<'_>,
) -> Result<InvariantResult, BankError> {
    let (msg, broken) = nonnegative_outstanding(keeper, ctx)?;
    if broken {
        return Ok((msg, broken));
    }
    total_supply(keeper, ctx)
}
