//! Everything the application accepts for execution.

use crate::errors::{AppError, Result};
use ledger_governance::{Content, ParameterChangeProposal};
use ledger_token::{Msg, TokenMsg, TokenProposal};
use ledger_types::{Address, Coins};
use serde::{Deserialize, Serialize};

/// Plain transfer between two accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSend {
    pub from_address: String,
    pub to_address: String,
    pub amount: Coins,
}

impl MsgSend {
    pub fn new(from: &Address, to: &Address, amount: Coins) -> Self {
        Self {
            from_address: from.to_string(),
            to_address: to.to_string(),
            amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppMsg {
    Send(MsgSend),
    Token(TokenMsg),
}

impl AppMsg {
    pub fn route(&self) -> &'static str {
        match self {
            AppMsg::Send(_) => ledger_bank::MODULE_NAME,
            AppMsg::Token(msg) => msg.route(),
        }
    }

    pub fn validate_basic(&self) -> Result<()> {
        match self {
            AppMsg::Send(msg) => {
                msg.from_address.parse::<Address>()?;
                msg.to_address.parse::<Address>()?;
                msg.amount
                    .validate()
                    .map_err(|e| AppError::Bank(ledger_bank::BankError::InvalidCoins(e.to_string())))
            }
            AppMsg::Token(msg) => Ok(msg.validate_basic()?),
        }
    }
}

/// Governance-approved content the application knows how to execute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppProposal {
    ParameterChange(ParameterChangeProposal),
    Token(TokenProposal),
}

impl AppProposal {
    pub fn route(&self) -> &'static str {
        match self {
            AppProposal::ParameterChange(p) => p.route(),
            AppProposal::Token(p) => p.route(),
        }
    }

    /// Checks run when the proposal is submitted, before any vote.
    pub fn validate_basic(&self, native_denom: &str) -> Result<()> {
        match self {
            AppProposal::ParameterChange(p) => Ok(p.validate_basic()?),
            AppProposal::Token(p) => Ok(p.validate_basic(native_denom)?),
        }
    }
}
