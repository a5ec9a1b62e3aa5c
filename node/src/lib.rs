//! Application wiring for the ledger.
//!
//! [`App`] owns the store and one keeper per module, executes messages and
//! approved proposals atomically and routes read-only queries.

pub mod app;
pub mod config;
pub mod errors;
pub mod genesis;
pub mod logging;
pub mod msgs;

pub use app::{module_registry, App};
pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use genesis::AppGenesis;
pub use logging::init_logging;
pub use msgs::{AppMsg, AppProposal, MsgSend};
