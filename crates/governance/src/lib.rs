//! Ledger Governance Module
//!
//! Provides the pieces governance-approved state changes are built from:
//! - parameter subspaces with per-key validation
//! - the proposal `Content` abstraction and its basic checks
//! - the generic parameter-change proposal and its executor
//!
//! Voting and tallying happen elsewhere; everything here runs only after a
//! proposal has been approved.

pub mod errors;
pub mod params;
pub mod proposal;

pub use errors::*;
pub use params::*;
pub use proposal::*;

/// Governance module version (for API introspection)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
