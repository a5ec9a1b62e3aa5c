use crate::errors::{Result, TreasuryError};
use crate::expected_keepers::BankKeeper;
use crate::fee_pool::FeePool;
use crate::keeper::TreasuryKeeper;
use ledger_storage::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TreasuryGenesis {
    #[serde(default)]
    pub fee_pool: FeePool,
}

impl TreasuryGenesis {
    pub fn validate(&self) -> Result<()> {
        self.fee_pool
            .validate()
            .map_err(|e| TreasuryError::InvalidGenesis(format!("community pool: {e}")))
    }
}

impl<B: BankKeeper> TreasuryKeeper<B> {
    pub fn init_genesis(&self, ctx: &mut Context<'_>, genesis: &TreasuryGenesis) -> Result<()> {
        genesis.validate()?;
        self.set_fee_pool(ctx, &genesis.fee_pool)?;
        tracing::info!(
            target: "treasury",
            community_pool = %genesis.fee_pool.community_pool,
            "initialized distribution genesis"
        );
        Ok(())
    }

    pub fn export_genesis(&self, ctx: &Context<'_>) -> Result<TreasuryGenesis> {
        Ok(TreasuryGenesis {
            fee_pool: self.get_fee_pool(ctx)?,
        })
    }
}
