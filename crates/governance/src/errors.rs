//! Error types for the Governance module

use ledger_storage::StorageError;
use ledger_types::ErrorCode;
use thiserror::Error;

/// Errors that can occur in the Governance module
#[derive(Error, Debug)]
pub enum GovernanceError {
    /// Proposal title, description or changes are malformed
    #[error("invalid proposal content: {0}")]
    InvalidProposalContent(String),

    /// No subspace registered under this name
    #[error("unknown subspace {0}")]
    UnknownSubspace(String),

    /// Key not part of the subspace's key table
    #[error("unknown parameter {key} in subspace {subspace}")]
    UnknownParam { subspace: String, key: String },

    /// Value rejected by the key's validator
    #[error("invalid parameter {key}: {reason}")]
    InvalidParam { key: String, reason: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage error
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ErrorCode for GovernanceError {
    fn codespace(&self) -> &'static str {
        match self {
            GovernanceError::InvalidProposalContent(_) => "gov",
            GovernanceError::Storage(_) => ledger_types::ROOT_CODESPACE,
            _ => "params",
        }
    }

    fn code(&self) -> u32 {
        match self {
            GovernanceError::InvalidProposalContent(_) => 5,
            GovernanceError::UnknownSubspace(_) => 3,
            GovernanceError::UnknownParam { .. } | GovernanceError::InvalidParam { .. } => 2,
            GovernanceError::Serialization(_) => 2,
            GovernanceError::Storage(_) => ledger_types::codes::INTERNAL,
        }
    }
}

/// Result type for Governance operations
pub type Result<T> = std::result::Result<T, GovernanceError>;
