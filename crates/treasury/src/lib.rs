//! Fee / community pool.
//!
//! Fees paid to the pool land in the `distribution` module account and are
//! also recorded in a decimal tally. Payouts are gated on the tally, not on
//! the module account's physical balance, so unrelated funds held by the
//! module can never be distributed.

pub mod errors;
pub mod expected_keepers;
pub mod fee_pool;
pub mod genesis;
pub mod invariants;
pub mod keeper;

pub use errors::{Result, TreasuryError};
pub use expected_keepers::BankKeeper;
pub use fee_pool::FeePool;
pub use genesis::TreasuryGenesis;
pub use keeper::TreasuryKeeper;

/// Name of the module account holding pooled funds.
pub const MODULE_NAME: &str = "distribution";
