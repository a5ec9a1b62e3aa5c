use ledger_auth::AuthError;
use ledger_bank::BankError;
use ledger_governance::GovernanceError;
use ledger_storage::StorageError;
use ledger_token::TokenError;
use ledger_treasury::TreasuryError;
use ledger_types::{codes, AddressError, ErrorCode, ROOT_CODESPACE};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unknown request: {0}")]
    UnknownRequest(String),

    #[error("invalid genesis: {0}")]
    InvalidGenesis(String),

    #[error("genesis has already been applied to this store")]
    AlreadyInitialized,

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Bank(#[from] BankError),

    #[error(transparent)]
    Treasury(#[from] TreasuryError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Governance(#[from] GovernanceError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ErrorCode for AppError {
    fn codespace(&self) -> &'static str {
        match self {
            AppError::Address(e) => e.codespace(),
            AppError::Auth(e) => e.codespace(),
            AppError::Bank(e) => e.codespace(),
            AppError::Treasury(e) => e.codespace(),
            AppError::Token(e) => e.codespace(),
            AppError::Governance(e) => e.codespace(),
            _ => ROOT_CODESPACE,
        }
    }

    fn code(&self) -> u32 {
        match self {
            AppError::UnknownRequest(_) => codes::UNKNOWN_REQUEST,
            AppError::InvalidGenesis(_) | AppError::AlreadyInitialized => codes::INVALID_REQUEST,
            AppError::Address(e) => e.code(),
            AppError::Auth(e) => e.code(),
            AppError::Bank(e) => e.code(),
            AppError::Treasury(e) => e.code(),
            AppError::Token(e) => e.code(),
            AppError::Governance(e) => e.code(),
            AppError::Json(_) => codes::JSON_UNMARSHAL,
            AppError::Storage(_) => codes::INTERNAL,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
