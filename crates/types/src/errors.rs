//! Error types and stable error codes shared by every ledger crate.

use thiserror::Error;

/// Codespace of errors that are not owned by a single module.
pub const ROOT_CODESPACE: &str = "sdk";

/// Stable root error codes.
pub mod codes {
    pub const INTERNAL: u32 = 1;
    pub const UNAUTHORIZED: u32 = 4;
    pub const INSUFFICIENT_FUNDS: u32 = 5;
    pub const UNKNOWN_REQUEST: u32 = 6;
    pub const INVALID_ADDRESS: u32 = 7;
    pub const UNKNOWN_ADDRESS: u32 = 9;
    pub const INVALID_COINS: u32 = 10;
    pub const JSON_MARSHAL: u32 = 16;
    pub const JSON_UNMARSHAL: u32 = 17;
    pub const INVALID_REQUEST: u32 = 18;
}

/// A structured error with a stable `(codespace, code)` identity.
///
/// Transaction results carry these two values so that clients can match on
/// failures without parsing messages.
pub trait ErrorCode {
    fn codespace(&self) -> &'static str;
    fn code(&self) -> u32;
}

/// Errors raised by coin and decimal arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoinsError {
    #[error("invalid denom: {0}")]
    InvalidDenom(String),

    #[error("negative coin amount: {0}")]
    NegativeAmount(String),

    #[error("duplicate denomination {0}")]
    DuplicateDenom(String),

    #[error("coins are not sorted: {0}")]
    Unsorted(String),

    #[error("coin amount must be positive: {0}")]
    NonPositive(String),

    #[error("negative coin result: {0}")]
    NegativeResult(String),

    #[error("coin denominations differ: {left} vs {right}")]
    DenomMismatch { left: String, right: String },

    #[error("failed to parse {0}")]
    Parse(String),
}

impl ErrorCode for CoinsError {
    fn codespace(&self) -> &'static str {
        ROOT_CODESPACE
    }

    fn code(&self) -> u32 {
        match self {
            CoinsError::NegativeResult(_) => codes::INSUFFICIENT_FUNDS,
            CoinsError::Parse(_) => codes::INVALID_REQUEST,
            _ => codes::INVALID_COINS,
        }
    }
}
