use ledger_storage::StorageError;
use ledger_types::{codes, Address, ErrorCode, ROOT_CODESPACE};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("account {0} does not exist")]
    UnknownAddress(Address),

    #[error("duplicate account {0}")]
    DuplicateAccount(Address),

    #[error("invalid delegation: {0}")]
    InvalidDelegation(String),

    #[error("invalid module account: {0}")]
    InvalidModuleAccount(String),

    #[error("invalid genesis: {0}")]
    InvalidGenesis(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ErrorCode for AuthError {
    fn codespace(&self) -> &'static str {
        ROOT_CODESPACE
    }

    fn code(&self) -> u32 {
        match self {
            AuthError::UnknownAddress(_) => codes::UNKNOWN_ADDRESS,
            AuthError::DuplicateAccount(_)
            | AuthError::InvalidDelegation(_)
            | AuthError::InvalidModuleAccount(_)
            | AuthError::InvalidGenesis(_) => codes::INVALID_REQUEST,
            AuthError::Storage(_) => codes::INTERNAL,
        }
    }
}
