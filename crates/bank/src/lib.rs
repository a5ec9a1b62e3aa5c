//! Ledger core.
//!
//! Every credit to an account is paired with an equal debit elsewhere
//! (the send family) or with an equal change of the supply ledger (mint and
//! burn). Nothing outside this crate writes balances or supply directly.

pub mod errors;
pub mod events;
pub mod genesis;
pub mod invariants;
pub mod keeper;
pub mod keys;
pub mod params;

pub use errors::BankError;
pub use genesis::{Balance, BankGenesis};
pub use invariants::{format_invariant, InvariantResult};
pub use keeper::{BankIter, BaseKeeper};
pub use params::BankParams;

pub const MODULE_NAME: &str = "bank";
