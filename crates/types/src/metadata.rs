//! Denomination metadata records.

use crate::decimal::PRECISION;
use crate::denom::validate_denom;
use crate::errors::{CoinsError, ErrorCode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Largest number of decimals a denomination may declare.
pub const MAX_DECIMALS: u32 = PRECISION;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("invalid metadata base denom: {0}")]
    InvalidBase(CoinsError),

    #[error("invalid metadata display denom: {0}")]
    InvalidDisplay(CoinsError),

    #[error("invalid denom unit: {0}")]
    InvalidUnit(CoinsError),

    #[error("metadata's first denomination unit must be the one with base denom '{0}'")]
    FirstUnitNotBase(String),

    #[error("the exponent for base denomination unit {0} must be 0")]
    BaseExponentNotZero(String),

    #[error("denom units should be sorted asc by exponent")]
    UnitsNotAscending,

    #[error("duplicate denomination unit {0}")]
    DuplicateUnit(String),

    #[error("duplicate denomination unit alias {0}")]
    DuplicateAlias(String),

    #[error("alias for denom unit {0} cannot be blank")]
    BlankAlias(String),

    #[error("metadata must contain a denomination unit with display denom '{0}'")]
    MissingDisplayUnit(String),

    #[error("decimals {decimals} exceed the maximum of {max}")]
    DecimalsOverflow { decimals: u32, max: u32 },
}

impl ErrorCode for MetadataError {
    fn codespace(&self) -> &'static str {
        match self {
            MetadataError::DecimalsOverflow { .. } => "token",
            _ => "bank",
        }
    }

    fn code(&self) -> u32 {
        match self {
            MetadataError::DecimalsOverflow { .. } => 1,
            _ => 8,
        }
    }
}

/// A named unit of a denomination, `10^exponent` base units.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DenomUnit {
    pub denom: String,
    pub exponent: u32,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl DenomUnit {
    pub fn new(denom: impl Into<String>, exponent: u32) -> Self {
        DenomUnit {
            denom: denom.into(),
            exponent,
            aliases: Vec::new(),
        }
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn validate(&self) -> Result<(), MetadataError> {
        validate_denom(&self.denom).map_err(MetadataError::InvalidUnit)?;
        let mut seen = HashSet::new();
        for alias in &self.aliases {
            if !seen.insert(alias.as_str()) {
                return Err(MetadataError::DuplicateAlias(alias.clone()));
            }
            if alias.trim().is_empty() {
                return Err(MetadataError::BlankAlias(self.denom.clone()));
            }
        }
        Ok(())
    }
}

/// Descriptive and policy record of a denomination, keyed by `base`.
///
/// A zero-value record (empty `base`) stands for "not registered"; callers
/// detect existence with [`Metadata::is_registered`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub denom_units: Vec<DenomUnit>,
    pub base: String,
    pub display: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default)]
    pub decimals: u32,
    #[serde(default)]
    pub send_enabled: bool,
}

impl Metadata {
    /// Metadata seeded for the chain's native denomination.
    pub fn default_native(native_denom: &str) -> Self {
        Metadata {
            description: native_denom.to_string(),
            denom_units: Vec::new(),
            base: native_denom.to_string(),
            display: native_denom.to_string(),
            issuer: String::new(),
            decimals: 18,
            send_enabled: true,
        }
    }

    /// Metadata registered when an account issues a new denomination.
    pub fn new_token(denom: &str, issuer: &str, decimals: u32) -> Self {
        Metadata {
            description: denom.to_string(),
            denom_units: Vec::new(),
            base: denom.to_string(),
            display: denom.to_string(),
            issuer: issuer.to_string(),
            decimals,
            send_enabled: true,
        }
    }

    pub fn is_registered(&self, denom: &str) -> bool {
        !self.base.is_empty() && self.base == denom
    }

    pub fn validate(&self) -> Result<(), MetadataError> {
        validate_denom(&self.base).map_err(MetadataError::InvalidBase)?;
        validate_denom(&self.display).map_err(MetadataError::InvalidDisplay)?;

        let mut has_display = false;
        let mut current_exponent = 0u32;
        let mut seen_units = HashSet::new();

        for (i, unit) in self.denom_units.iter().enumerate() {
            if i == 0 {
                if unit.denom != self.base {
                    return Err(MetadataError::FirstUnitNotBase(self.base.clone()));
                }
                if unit.exponent != 0 {
                    return Err(MetadataError::BaseExponentNotZero(self.base.clone()));
                }
            } else if current_exponent >= unit.exponent {
                return Err(MetadataError::UnitsNotAscending);
            }
            current_exponent = unit.exponent;

            if !seen_units.insert(unit.denom.as_str()) {
                return Err(MetadataError::DuplicateUnit(unit.denom.clone()));
            }
            if unit.denom == self.display {
                has_display = true;
            }
            unit.validate()?;
        }

        if !has_display && self.base != self.display {
            return Err(MetadataError::MissingDisplayUnit(self.display.clone()));
        }

        if self.decimals > MAX_DECIMALS {
            return Err(MetadataError::DecimalsOverflow {
                decimals: self.decimals,
                max: MAX_DECIMALS,
            });
        }
        Ok(())
    }
}

/// Validate every record of a list.
pub fn validate_metadatas(metadatas: &[Metadata]) -> Result<(), MetadataError> {
    metadatas.iter().try_for_each(Metadata::validate)
}

/// Sort a list by base denomination, the order used for export.
pub fn sort_metadatas(metadatas: &mut [Metadata]) {
    metadatas.sort_by(|a, b| a.base.cmp(&b.base));
}
