use crate::app::App;
use crate::errors::{AppError, Result};
use ledger_auth::AuthGenesis;
use ledger_bank::BankGenesis;
use ledger_token::TokenGenesis;
use ledger_treasury::TreasuryGenesis;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

const GENESIS_MARKER_KEY: &[u8] = b"node/genesis_applied";

/// Genesis state of every module, in initialization order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppGenesis {
    #[serde(default)]
    pub auth: AuthGenesis,
    #[serde(default)]
    pub bank: BankGenesis,
    #[serde(default)]
    pub distribution: TreasuryGenesis,
    #[serde(default)]
    pub token: TokenGenesis,
}

impl AppGenesis {
    pub fn default_genesis(native_denom: &str) -> Self {
        Self {
            auth: AuthGenesis::default(),
            bank: BankGenesis::default_genesis(native_denom),
            distribution: TreasuryGenesis::default(),
            token: TokenGenesis::default(),
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read(path)?;
        Ok(serde_json::from_slice(&raw)?)
    }

    pub fn validate(&self, native_denom: &str) -> Result<()> {
        self.auth.validate()?;
        self.bank.validate()?;
        self.distribution.validate()?;
        self.token.validate()?;
        let native = self
            .bank
            .denom_metadata
            .iter()
            .find(|m| m.base == native_denom)
            .ok_or_else(|| {
                AppError::InvalidGenesis(format!("no metadata for native denom {native_denom}"))
            })?;
        if !native.send_enabled {
            return Err(AppError::InvalidGenesis(format!(
                "native denom {native_denom} must be transferable"
            )));
        }
        Ok(())
    }
}

impl App {
    /// Apply `genesis` to an empty store. All modules or none.
    pub fn init_genesis(&self, genesis: &AppGenesis) -> Result<()> {
        genesis.validate(self.native_denom())?;
        self.write(|ctx| -> Result<()> {
            if ctx.get_raw(GENESIS_MARKER_KEY)?.is_some() {
                return Err(AppError::AlreadyInitialized);
            }
            self.accounts().init_genesis(ctx, &genesis.auth)?;
            self.bank().init_genesis(ctx, &genesis.bank)?;
            self.treasury().init_genesis(ctx, &genesis.distribution)?;
            self.token().init_genesis(ctx, &genesis.token)?;
            ctx.set_json(GENESIS_MARKER_KEY, &true)?;
            Ok(())
        })?;
        info!(
            target: "node",
            accounts = genesis.auth.accounts.len(),
            balances = genesis.bank.balances.len(),
            "applied genesis"
        );
        Ok(())
    }

    pub fn export_genesis(&self) -> Result<AppGenesis> {
        self.read(|ctx| -> Result<AppGenesis> {
            Ok(AppGenesis {
                auth: self.accounts().export_genesis(ctx)?,
                bank: self.bank().export_genesis(ctx)?,
                distribution: self.treasury().export_genesis(ctx)?,
                token: self.token().export_genesis(ctx)?,
            })
        })
    }

    pub fn is_initialized(&self) -> Result<bool> {
        self.read(|ctx| Ok(ctx.get_raw(GENESIS_MARKER_KEY)?.is_some()))
    }
}
