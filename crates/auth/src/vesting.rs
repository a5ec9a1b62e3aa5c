use crate::errors::AuthError;
use ledger_types::Coins;

/// Optional account capability: bookkeeping of delegations made while some
/// coins are still vesting.
pub trait VestingTracker {
    /// Coins still locked at `block_time`.
    fn vesting_coins(&self, block_time: i64) -> Coins;

    fn delegated_free(&self) -> &Coins;

    fn delegated_vesting(&self) -> &Coins;

    /// Record a delegation of `amount` out of `balance`. Vesting coins are
    /// attributed first, the remainder counts as free.
    fn track_delegation(
        &mut self,
        block_time: i64,
        balance: &Coins,
        amount: &Coins,
    ) -> Result<(), AuthError>;

    /// Record an undelegation. Free delegations are released first.
    fn track_undelegation(&mut self, amount: &Coins) -> Result<(), AuthError>;
}
