use crate::errors::Result;
use crate::expected_keepers::{BankKeeper, DistrKeeper};
use crate::keeper::TokenKeeper;
use crate::params::TokenParams;
use ledger_storage::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenGenesis {
    #[serde(default)]
    pub params: TokenParams,
}

impl TokenGenesis {
    pub fn validate(&self) -> Result<()> {
        self.params.validate()
    }
}

impl<B: BankKeeper, D: DistrKeeper> TokenKeeper<B, D> {
    pub fn init_genesis(&self, ctx: &mut Context<'_>, genesis: &TokenGenesis) -> Result<()> {
        self.set_params(ctx, &genesis.params)?;
        tracing::info!(target: "token", params = %genesis.params, "initialized token genesis");
        Ok(())
    }

    pub fn export_genesis(&self, ctx: &Context<'_>) -> Result<TokenGenesis> {
        Ok(TokenGenesis {
            params: self.get_params(ctx)?,
        })
    }
}
