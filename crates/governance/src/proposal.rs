//! Proposal content.

use crate::errors::{GovernanceError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_TITLE_LENGTH: usize = 140;
pub const MAX_DESCRIPTION_LENGTH: usize = 10_000;

/// Route of governance-native content.
pub const ROUTER_KEY: &str = "params";
pub const PROPOSAL_TYPE_CHANGE: &str = "ParameterChange";

/// Body of a governance proposal, executed by the handler registered for
/// its route once voting has approved it.
pub trait Content {
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn route(&self) -> &'static str;
    fn proposal_type(&self) -> &'static str;

    fn validate_abstract(&self) -> Result<()> {
        validate_abstract(self.title(), self.description())
    }
}

/// Checks shared by every proposal kind: non-blank and bounded title and
/// description.
pub fn validate_abstract(title: &str, description: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(GovernanceError::InvalidProposalContent(
            "proposal title cannot be blank".to_string(),
        ));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(GovernanceError::InvalidProposalContent(format!(
            "proposal title is longer than max length of {MAX_TITLE_LENGTH}"
        )));
    }
    if description.trim().is_empty() {
        return Err(GovernanceError::InvalidProposalContent(
            "proposal description cannot be blank".to_string(),
        ));
    }
    if description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(GovernanceError::InvalidProposalContent(format!(
            "proposal description is longer than max length of {MAX_DESCRIPTION_LENGTH}"
        )));
    }
    Ok(())
}

/// One edit of a parameter-change proposal. `value` is JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamChange {
    pub subspace: String,
    pub key: String,
    pub value: String,
}

impl ParamChange {
    pub fn new(subspace: &str, key: &str, value: &str) -> Self {
        Self {
            subspace: subspace.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterChangeProposal {
    pub title: String,
    pub description: String,
    pub changes: Vec<ParamChange>,
}

impl ParameterChangeProposal {
    pub fn validate_basic(&self) -> Result<()> {
        self.validate_abstract()?;
        if self.changes.is_empty() {
            return Err(GovernanceError::InvalidProposalContent(
                "submitted parameter changes are empty".to_string(),
            ));
        }
        for change in &self.changes {
            if change.subspace.is_empty() {
                return Err(GovernanceError::InvalidProposalContent(
                    "parameter subspace is empty".to_string(),
                ));
            }
            if change.key.is_empty() {
                return Err(GovernanceError::InvalidProposalContent(
                    "parameter key is empty".to_string(),
                ));
            }
            if change.value.is_empty() {
                return Err(GovernanceError::InvalidProposalContent(
                    "parameter value is empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Content for ParameterChangeProposal {
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
        PROPOSAL_TYPE_CHANGE
    }
}

impl fmt::Display for ParameterChangeProposal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Parameter Change Proposal:")?;
        writeln!(f, "  Title:       {}", self.title)?;
        writeln!(f, "  Description: {}", self.description)?;
        writeln!(f, "  Changes:")?;
        for change in &self.changes {
            writeln!(f, "    Param Change:")?;
            writeln!(f, "      Subspace: {}", change.subspace)?;
            writeln!(f, "      Key:      {}", change.key)?;
            writeln!(f, "      Value:    {}", change.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal() -> ParameterChangeProposal {
        ParameterChangeProposal {
            title: "Raise fee".into(),
            description: "Make new tokens more expensive".into(),
            changes: vec![ParamChange::new("token", "new_token_fee", "\"200\"")],
        }
    }

    #[test]
    fn abstract_checks() {
        assert!(validate_abstract("t", "d").is_ok());
        assert!(validate_abstract("  ", "d").is_err());
        assert!(validate_abstract("t", "").is_err());
        assert!(validate_abstract(&"t".repeat(MAX_TITLE_LENGTH + 1), "d").is_err());
        assert!(validate_abstract("t", &"d".repeat(MAX_DESCRIPTION_LENGTH + 1)).is_err());
    }

    #[test]
    fn changes_must_be_complete() {
        assert!(proposal().validate_basic().is_ok());

        let mut empty = proposal();
        empty.changes.clear();
        assert!(empty.validate_basic().is_err());

        let mut blank_value = proposal();
        blank_value.changes[0].value.clear();
        assert!(blank_value.validate_basic().is_err());
    }

    #[test]
    fn display_lists_changes() {
        let text = proposal().to_string();
        assert!(text.starts_with("Parameter Change Proposal:\n  Title:       Raise fee\n"));
        assert!(text.contains("      Key:      new_token_fee\n"));
    }
}
