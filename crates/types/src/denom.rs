//! Denomination grammar.

use crate::errors::CoinsError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Lowercase alphanumeric, starting with a letter, 3 to 128 characters.
pub const DENOM_PATTERN: &str = "[a-z][a-z0-9]{2,127}";

static DENOM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^{DENOM_PATTERN}$")).expect("denom pattern compiles"));

/// Check a denomination string against the grammar.
pub fn validate_denom(denom: &str) -> Result<(), CoinsError> {
    if DENOM_RE.is_match(denom) {
        Ok(())
    } else {
        Err(CoinsError::InvalidDenom(denom.to_string()))
    }
}

pub fn is_valid_denom(denom: &str) -> bool {
    validate_denom(denom).is_ok()
}
