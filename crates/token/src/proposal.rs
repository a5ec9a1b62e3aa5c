//! Governance content handled by the token module.

use crate::errors::Result;
use crate::keys::ROUTER_KEY;
use ledger_governance::{Content, GovernanceError};
use ledger_types::validate_denom;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub const PROPOSAL_TYPE_TOKEN_PARAMS_CHANGE: &str = "TokenParamsChange";
pub const PROPOSAL_TYPE_DISABLE_TOKEN: &str = "DisableToken";

fn invalid(reason: impl Into<String>) -> GovernanceError {
    GovernanceError::InvalidProposalContent(reason.into())
}

fn validate_target_denom(denom: &str, native_denom: &str) -> Result<()> {
    validate_denom(denom).map_err(|e| invalid(e.to_string()))?;
    if denom == native_denom {
        return Err(invalid("not allowed to change native token's params").into());
    }
    Ok(())
}

/// One metadata edit. `value` is JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenParamChange {
    pub key: String,
    pub value: String,
}

impl TokenParamChange {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenParamsChangeProposal {
    pub title: String,
    pub description: String,
    pub denom: String,
    pub changes: Vec<TokenParamChange>,
}

impl TokenParamsChangeProposal {
    pub fn new(title: &str, description: &str, denom: &str, changes: Vec<TokenParamChange>) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            denom: denom.to_string(),
            changes,
        }
    }

    pub fn validate_basic(&self, native_denom: &str) -> Result<()> {
        self.validate_abstract()?;
        validate_target_denom(&self.denom, native_denom)?;

        let mut keys = HashSet::new();
        for change in &self.changes {
            if !keys.insert(change.key.as_str()) {
                return Err(invalid("duplicated key in token params change proposal").into());
            }
            if change.key.is_empty() {
                return Err(invalid("empty key found in token params change proposal").into());
            }
            if change.value.is_empty() {
                return Err(invalid("empty value found in token params change proposal").into());
            }
        }
        Ok(())
    }
}

impl Content for TokenParamsChangeProposal {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn route(&self) -> &'static str {
        ROUTER_KEY
    }

    fn proposal_type(&self) -> &'static str {
        PROPOSAL_TYPE_TOKEN_PARAMS_CHANGE
    }
}

impl fmt::Display for TokenParamsChangeProposal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Change Token Param Proposal:\n Title:       {}\n Description: {}\n Denom:      {}\n Changes:\n",
            self.title, self.description, self.denom
        )?;
        for change in &self.changes {
            write!(f, "{}: {}\t", change.key, change.value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisableTokenProposal {
    pub title: String,
    pub description: String,
    pub denom: String,
}

impl DisableTokenProposal {
    pub fn new(title: &str, description: &str, denom: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            denom: denom.to_string(),
        }
    }

    pub fn validate_basic(&self, native_denom: &str) -> Result<()> {
        self.validate_abstract()?;
        validate_target_denom(&self.denom, native_denom)
    }
}

impl Content for DisableTokenProposal {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn route(&self) -> &'static str {
        ROUTER_KEY
    }

    fn proposal_type(&self) -> &'static str {
        PROPOSAL_TYPE_DISABLE_TOKEN
    }
}

impl fmt::Display for DisableTokenProposal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Disable Token Proposal:\n Title:       {}\n Description: {}\n Denom:      {}\n",
            self.title, self.description, self.denom
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TokenProposal {
    TokenParamsChange(TokenParamsChangeProposal),
    DisableToken(DisableTokenProposal),
}

impl TokenProposal {
    pub fn validate_basic(&self, native_denom: &str) -> Result<()> {
        match self {
            TokenProposal::TokenParamsChange(p) => p.validate_basic(native_denom),
            TokenProposal::DisableToken(p) => p.validate_basic(native_denom),
        }
    }

    pub fn denom(&self) -> &str {
        match self {
            TokenProposal::TokenParamsChange(p) => &p.denom,
            TokenProposal::DisableToken(p) => &p.denom,
        }
    }
}

impl Content for TokenProposal {
    fn title(&self) -> &str {
        match self {
            TokenProposal::TokenParamsChange(p) => p.title(),
            TokenProposal::DisableToken(p) => p.title(),
        }
    }

    fn description(&self) -> &str {
        match self {
            TokenProposal::TokenParamsChange(p) => p.description(),
            TokenProposal::DisableToken(p) => p.description(),
        }
    }

    fn route(&self) -> &'static str {
        ROUTER_KEY
    }

    fn proposal_type(&self) -> &'static str {
        match self {
            TokenProposal::TokenParamsChange(p) => p.proposal_type(),
            TokenProposal::DisableToken(p) => p.proposal_type(),
        }
    }
}

impl fmt::Display for TokenProposal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenProposal::TokenParamsChange(p) => fmt::Display::fmt(p, f),
            TokenProposal::DisableToken(p) => fmt::Display::fmt(p, f),
        }
    }
}
