use ledger_auth::AuthError;
use ledger_governance::GovernanceError;
use ledger_storage::StorageError;
use ledger_types::{codes, CoinsError, ErrorCode, MetadataError, ROOT_CODESPACE};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BankError {
    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),

    #[error("invalid coins: {0}")]
    InvalidCoins(String),

    #[error("{0} transfers are currently disabled")]
    SendDisabled(String),

    #[error("unknown address: {0}")]
    UnknownAddress(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("invalid genesis: {0}")]
    InvalidGenesis(String),

    #[error(transparent)]
    Coins(#[from] CoinsError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Params(#[from] GovernanceError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ErrorCode for BankError {
    fn codespace(&self) -> &'static str {
        match self {
            BankError::SendDisabled(_) => "bank",
            BankError::Coins(e) => e.codespace(),
            BankError::Metadata(e) => e.codespace(),
            BankError::Auth(e) => e.codespace(),
            BankError::Params(e) => e.codespace(),
            _ => ROOT_CODESPACE,
        }
    }

    fn code(&self) -> u32 {
        match self {
            BankError::InsufficientFunds(_) => codes::INSUFFICIENT_FUNDS,
            BankError::InvalidCoins(_) => codes::INVALID_COINS,
            BankError::SendDisabled(_) => 5,
            BankError::UnknownAddress(_) => codes::UNKNOWN_ADDRESS,
            BankError::Unauthorized(_) => codes::UNAUTHORIZED,
            BankError::InvalidGenesis(_) => codes::INVALID_REQUEST,
            BankError::Coins(e) => e.code(),
            BankError::Metadata(e) => e.code(),
            BankError::Auth(e) => e.code(),
            BankError::Params(e) => e.code(),
            BankError::Storage(_) => codes::INTERNAL,
        }
    }
}

/// Abort on a wiring or invariant bug. These are never user errors.
pub(crate) fn fatal(err: BankError) -> ! {
    tracing::error!(target: "bank", error = %err, "ledger invariant violated");
    panic!("{err}")
}
