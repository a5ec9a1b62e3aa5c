//! Token issuance.
//!
//! Any account may create a denomination by paying the issue fee into the
//! community pool. The issuer alone may inflate it later; any holder may burn
//! their own balance. Transferability is switched by governance proposals.

pub mod errors;
pub mod events;
pub mod expected_keepers;
pub mod genesis;
pub mod handler;
pub mod invariants;
pub mod keeper;
pub mod keys;
pub mod msg_server;
pub mod msgs;
pub mod params;
pub mod proposal;
pub mod proposal_handler;
pub mod querier;

pub use errors::{Result, TokenError};
pub use expected_keepers::{BankKeeper, DistrKeeper};
pub use genesis::TokenGenesis;
pub use handler::{handle_msg, handle_proposal};
pub use keeper::TokenKeeper;
pub use keys::MODULE_NAME;
pub use msgs::{Msg, MsgBurnToken, MsgInflateToken, MsgNewToken, TokenMsg};
pub use params::TokenParams;
pub use proposal::{DisableTokenProposal, TokenParamChange, TokenParamsChangeProposal, TokenProposal};
pub use querier::QuerySymbolRequest;
