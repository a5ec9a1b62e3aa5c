use crate::errors::{Result, TokenError};
use crate::expected_keepers::{BankKeeper, DistrKeeper};
use crate::keeper::TokenKeeper;
use crate::keys::{QUERY_PARAMETERS, QUERY_SYMBOL, QUERY_SYMBOLS};
use crate::params::TokenParams;
use ledger_storage::Context;
use ledger_types::{validate_denom, Metadata};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySymbolRequest {
    pub denom: String,
}

impl<B: BankKeeper, D: DistrKeeper> TokenKeeper<B, D> {
    /// Metadata of `denom`; zero-valued when unregistered.
    pub fn query_symbol(&self, ctx: &Context<'_>, denom: &str) -> Result<Metadata> {
        validate_denom(denom).map_err(|_| TokenError::InvalidRequest("invalid denom".to_string()))?;
        self.get_token_info(ctx, denom)
    }

    pub fn query_symbols(&self, ctx: &Context<'_>) -> Result<Vec<String>> {
        self.get_symbols(ctx)
    }

    pub fn query_params(&self, ctx: &Context<'_>) -> Result<TokenParams> {
        self.get_params(ctx)
    }

    /// Path-addressed query returning indented JSON.
    pub fn query(&self, ctx: &Context<'_>, path: &[&str], data: &[u8]) -> Result<Vec<u8>> {
        match path.first().copied() {
            Some(QUERY_SYMBOL) => {
                let request: QuerySymbolRequest = serde_json::from_slice(data)?;
                let metadata = self.get_token_info(ctx, &request.denom)?;
                Ok(serde_json::to_vec_pretty(&metadata)?)
            }
            Some(QUERY_SYMBOLS) => Ok(serde_json::to_vec_pretty(&self.get_symbols(ctx)?)?),
            Some(QUERY_PARAMETERS) => Ok(serde_json::to_vec_pretty(&self.get_params(ctx)?)?),
            other => Err(TokenError::UnknownRequest(format!(
                "unknown token query endpoint: {}",
                other.unwrap_or_default()
            ))),
        }
    }
}
