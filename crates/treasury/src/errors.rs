use ledger_bank::BankError;
use ledger_storage::StorageError;
use ledger_types::{codes, CoinsError, ErrorCode, ROOT_CODESPACE};
use thiserror::Error;

pub const CODESPACE: &str = "distribution";

#[derive(Debug, Error)]
pub enum TreasuryError {
    #[error("bad distribution: {0}")]
    BadDistribution(String),

    #[error("invalid genesis: {0}")]
    InvalidGenesis(String),

    #[error(transparent)]
    Bank(#[from] BankError),

    #[error(transparent)]
    Coins(#[from] CoinsError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ErrorCode for TreasuryError {
    fn codespace(&self) -> &'static str {
        match self {
            TreasuryError::BadDistribution(_) => CODESPACE,
            TreasuryError::Bank(e) => e.codespace(),
            TreasuryError::Coins(e) => e.codespace(),
            _ => ROOT_CODESPACE,
        }
    }

    fn code(&self) -> u32 {
        match self {
            TreasuryError::BadDistribution(_) => 13,
            TreasuryError::InvalidGenesis(_) => codes::INVALID_REQUEST,
            TreasuryError::Bank(e) => e.code(),
            TreasuryError::Coins(e) => e.code(),
            TreasuryError::Storage(_) => codes::INTERNAL,
        }
    }
}

pub type Result<T> = std::result::Result<T, TreasuryError>;
