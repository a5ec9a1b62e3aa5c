use crate::keys::MODULE_NAME;
use ledger_bank::BankError;
use ledger_governance::GovernanceError;
use ledger_storage::StorageError;
use ledger_treasury::TreasuryError;
use ledger_types::{codes, AddressError, ErrorCode, MetadataError, ROOT_CODESPACE};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("decimal overflows: {0}")]
    DecimalsOverflow(String),

    #[error("denom already exist: {0}")]
    DenomAlreadyExist(String),

    #[error("denom not exist: {0}")]
    DenomNotExist(String),

    #[error("invalid parameter: {0}")]
    InvalidParams(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid coins: {0}")]
    InvalidCoins(String),

    #[error("unknown request: {0}")]
    UnknownRequest(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("failed to decode request: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Bank(#[from] BankError),

    #[error(transparent)]
    Treasury(#[from] TreasuryError),

    #[error(transparent)]
    Governance(#[from] GovernanceError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<AddressError> for TokenError {
    fn from(err: AddressError) -> Self {
        TokenError::InvalidAddress(err.to_string())
    }
}

impl ErrorCode for TokenError {
    fn codespace(&self) -> &'static str {
        match self {
            TokenError::DecimalsOverflow(_)
            | TokenError::DenomAlreadyExist(_)
            | TokenError::DenomNotExist(_)
            | TokenError::InvalidParams(_) => MODULE_NAME,
            TokenError::Bank(e) => e.codespace(),
            TokenError::Treasury(e) => e.codespace(),
            TokenError::Governance(e) => e.codespace(),
            TokenError::Metadata(e) => e.codespace(),
            _ => ROOT_CODESPACE,
        }
    }

    fn code(&self) -> u32 {
        match self {
            TokenError::DecimalsOverflow(_) => 1,
            TokenError::DenomAlreadyExist(_) => 2,
            TokenError::DenomNotExist(_) => 3,
            TokenError::InvalidParams(_) => 4,
            TokenError::Unauthorized(_) => codes::UNAUTHORIZED,
            TokenError::InvalidAddress(_) => codes::INVALID_ADDRESS,
            TokenError::InvalidCoins(_) => codes::INVALID_COINS,
            TokenError::UnknownRequest(_) => codes::UNKNOWN_REQUEST,
            TokenError::InvalidRequest(_) => codes::INVALID_REQUEST,
            TokenError::Json(_) => codes::JSON_UNMARSHAL,
            TokenError::Bank(e) => e.code(),
            TokenError::Treasury(e) => e.code(),
            TokenError::Governance(e) => e.code(),
            TokenError::Metadata(e) => e.code(),
            TokenError::Storage(_) => codes::INTERNAL,
        }
    }
}

pub type Result<T> = std::result::Result<T, TokenError>;
