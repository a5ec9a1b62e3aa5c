use crate::errors::{Result, TokenError};
use ledger_governance::{validate_u64, KeyTable, ParamSet};
use ledger_types::Amount;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub const KEY_TOKEN_CACHE_SIZE: &str = "token_cache_size";
pub const KEY_NEW_TOKEN_FEE: &str = "new_token_fee";

pub const DEFAULT_TOKEN_CACHE_SIZE: u64 = 32;
/// 100 whole native tokens at six decimals.
pub const DEFAULT_NEW_TOKEN_FEE: u64 = 100_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenParams {
    pub token_cache_size: u64,
    /// Charged in the native denomination for every new denomination.
    pub new_token_fee: Amount,
}

impl Default for TokenParams {
    fn default() -> Self {
        Self {
            token_cache_size: DEFAULT_TOKEN_CACHE_SIZE,
            new_token_fee: Amount::from(DEFAULT_NEW_TOKEN_FEE),
        }
    }
}

impl TokenParams {
    pub fn validate(&self) -> Result<()> {
        if self.new_token_fee.is_positive() {
            return Ok(());
        }
        Err(TokenError::InvalidParams(format!(
            "new token fee {} is not valid",
            self.new_token_fee
        )))
    }
}

impl fmt::Display for TokenParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Params:TokenCacheSize:{}\tNewTokenFee:{}\t",
            self.token_cache_size, self.new_token_fee
        )
    }
}

impl ParamSet for TokenParams {
    fn key_table() -> KeyTable {
        KeyTable::new()
            .with(KEY_TOKEN_CACHE_SIZE, validate_u64)
            .with(KEY_NEW_TOKEN_FEE, validate_new_token_fee)
    }
}

fn validate_new_token_fee(value: &Value) -> std::result::Result<(), String> {
    let raw = value
        .as_str()
        .ok_or_else(|| format!("invalid parameter type: {value}"))?;
    let fee: Amount = raw
        .parse()
        .map_err(|_| format!("invalid new token fee: {raw}"))?;
    if !fee.is_positive() {
        return Err(format!("new token fee must be positive: {fee}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_render_like_the_params_query() {
        let params = TokenParams::default();
        params.validate().unwrap();
        assert_eq!(params.to_string(), "Params:TokenCacheSize:32\tNewTokenFee:100000000\t");
    }

    #[test]
    fn non_positive_fees_are_invalid() {
        let params = TokenParams {
            new_token_fee: Amount::zero(),
            ..TokenParams::default()
        };
        assert!(matches!(params.validate(), Err(TokenError::InvalidParams(_))));

        assert!(validate_new_token_fee(&json!("0")).is_err());
        assert!(validate_new_token_fee(&json!("-5")).is_err());
        assert!(validate_new_token_fee(&json!(5)).is_err());
        assert!(validate_new_token_fee(&json!("5")).is_ok());
    }

    #[test]
    fn fee_serializes_as_a_string() {
        let value = serde_json::to_value(TokenParams::default()).unwrap();
        assert_eq!(value["new_token_fee"], json!("100000000"));
        assert_eq!(value["token_cache_size"], json!(32));
    }
}
