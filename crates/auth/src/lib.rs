//! Account provider for the ledger.
//!
//! Accounts are a tagged union over plain, module and delayed-vesting
//! accounts. Capabilities (mint, burn, stake, vesting tracking) are queried
//! on the account rather than encoded in a type hierarchy.

pub mod account;
pub mod errors;
pub mod genesis;
pub mod keeper;
pub mod registry;
pub mod vesting;

pub use account::{Account, BaseAccount, DelayedVestingAccount, ModuleAccount, Permission};
pub use errors::AuthError;
pub use genesis::AuthGenesis;
pub use keeper::{AccountKeeper, StoreAccountKeeper};
pub use registry::{ModuleAccountRegistry, ModuleEntry};
pub use vesting::VestingTracker;

/// Name of this module in logs, events and store keys.
pub const MODULE_NAME: &str = "auth";
