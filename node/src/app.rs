//! Keeper wiring and the state-transition entry points.

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::msgs::{AppMsg, AppProposal};
use ledger_auth::{AccountKeeper, ModuleAccountRegistry, Permission, StoreAccountKeeper};
use ledger_bank::{BankParams, BaseKeeper, InvariantResult};
use ledger_governance::ParamsKeeper;
use ledger_storage::{
    BlockHeader, CacheStore, Context, Event, KvStore, MemoryStore, SledStore,
};
use ledger_token::TokenKeeper;
use ledger_treasury::TreasuryKeeper;
use ledger_types::{Address, ErrorCode};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub type Bank = BaseKeeper<StoreAccountKeeper>;
pub type Treasury = TreasuryKeeper<Bank>;
pub type Token = TokenKeeper<Bank, Treasury>;

type SharedStore = Box<dyn KvStore + Send + Sync>;

pub const FEE_COLLECTOR: &str = "fee_collector";
pub const BONDED_POOL: &str = "bonded_tokens_pool";

/// Module accounts and their capabilities, fixed at wiring time.
pub fn module_registry() -> Arc<ModuleAccountRegistry> {
    Arc::new(ModuleAccountRegistry::new([
        (FEE_COLLECTOR, &[][..]),
        (ledger_treasury::MODULE_NAME, &[][..]),
        (
            ledger_token::MODULE_NAME,
            &[Permission::Minter, Permission::Burner][..],
        ),
        (BONDED_POOL, &[Permission::Burner, Permission::Staking][..]),
    ]))
}

pub struct App {
    store: RwLock<SharedStore>,
    header: Mutex<BlockHeader>,
    native_denom: String,
    accounts: StoreAccountKeeper,
    bank: Bank,
    treasury: Treasury,
    token: Token,
    params: ParamsKeeper,
}

impl App {
    /// In-memory application, mostly for tests and dry runs.
    pub fn in_memory(native_denom: &str) -> Self {
        Self::with_store(Box::new(MemoryStore::new()), native_denom)
    }

    /// Open the store `config` points at: sled under `data_dir`, memory otherwise.
    pub fn open(config: &AppConfig) -> Result<Self> {
        let store: SharedStore = match &config.data_dir {
            Some(dir) => {
                info!(target: "node", data_dir = %dir.display(), "opening sled store");
                Box::new(SledStore::open(dir, config.flush_on_commit)?)
            }
            None => {
                warn!(target: "node", "no data_dir configured, state will not persist");
                Box::new(MemoryStore::new())
            }
        };
        Ok(Self::with_store(store, &config.native_denom))
    }

    pub fn with_store(store: SharedStore, native_denom: &str) -> Self {
        let accounts = StoreAccountKeeper::new(module_registry());
        let bank = BaseKeeper::new(accounts.clone());
        let treasury = TreasuryKeeper::new(bank.clone());
        let token = TokenKeeper::new(bank.clone(), treasury.clone(), native_denom);

        let mut params = ParamsKeeper::new();
        params.register(bank.param_subspace().clone());
        params.register(token.param_subspace().clone());

        Self {
            store: RwLock::new(store),
            header: Mutex::new(BlockHeader::default()),
            native_denom: native_denom.to_string(),
            accounts,
            bank,
            treasury,
            token,
            params,
        }
    }

    pub fn native_denom(&self) -> &str {
        &self.native_denom
    }

    pub fn accounts(&self) -> &StoreAccountKeeper {
        &self.accounts
    }

    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    pub fn treasury(&self) -> &Treasury {
        &self.treasury
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn block_header(&self) -> BlockHeader {
        *self.header.lock()
    }

    pub fn set_block_header(&self, header: BlockHeader) {
        *self.header.lock() = header;
    }

    /// Run `f` with write access to committed state. Writes land only when
    /// `f` succeeds; the events it emitted are returned.
    pub fn write<T, F>(&self, f: F) -> Result<(T, Vec<Event>)>
    where
        F: FnOnce(&mut Context<'_>) -> Result<T>,
    {
        let header = self.block_header();
        let mut store = self.store.write();
        let mut ctx = Context::new(&mut **store, header);
        let value = ctx.atomic(f)?;
        Ok((value, ctx.take_events()))
    }

    /// Run `f` against a throwaway branch of committed state.
    pub fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Context<'_>) -> Result<T>,
    {
        let header = self.block_header();
        let store = self.store.read();
        let mut cache = CacheStore::new(&**store);
        let mut ctx = Context::new(&mut cache, header);
        f(&mut ctx)
    }

    /// Execute one message. On failure nothing it did is kept.
    pub fn deliver(&self, msg: &AppMsg) -> Result<Vec<Event>> {
        let route = msg.route();
        let result = self.write(|ctx| -> Result<()> {
            match msg {
                AppMsg::Send(send) => {
                    let from: Address = send.from_address.parse()?;
                    let to: Address = send.to_address.parse()?;
                    self.bank.send_coins(ctx, &from, &to, &send.amount)?;
                }
                AppMsg::Token(token_msg) => ledger_token::handle_msg(&self.token, ctx, token_msg)?,
            }
            Ok(())
        });

        match result {
            Ok(((), events)) => {
                debug!(target: "node", route, events = events.len(), "delivered message");
                Ok(events)
            }
            Err(err) => {
                debug!(
                    target: "node",
                    route,
                    codespace = err.codespace(),
                    code = err.code(),
                    error = %err,
                    "message failed"
                );
                Err(err)
            }
        }
    }

    /// Execute governance-approved content.
    pub fn execute_proposal(&self, proposal: &AppProposal) -> Result<Vec<Event>> {
        info!(target: "node", route = proposal.route(), "executing proposal");
        let ((), events) = self.write(|ctx| -> Result<()> {
            match proposal {
                AppProposal::ParameterChange(p) => {
                    self.params.handle_parameter_change_proposal(ctx, p)?
                }
                AppProposal::Token(p) => ledger_token::handle_proposal(&self.token, ctx, p)?,
            }
            Ok(())
        })?;
        Ok(events)
    }

    /// Read-only query router. Responses are indented JSON.
    pub fn query(&self, path: &str, data: &[u8]) -> Result<Vec<u8>> {
        let parts: Vec<&str> = path.trim_matches('/').split('/').collect();
        self.read(|ctx| -> Result<Vec<u8>> {
            let out = match parts.as_slice() {
                ["auth", "account", address] => {
                    let address: Address = address.parse()?;
                    serde_json::to_vec_pretty(&self.accounts.get_account(ctx, &address)?)?
                }
                ["bank", "balances", address] => {
                    let address: Address = address.parse()?;
                    serde_json::to_vec_pretty(&self.bank.get_all_balances(ctx, &address)?)?
                }
                ["bank", "balance", address, denom] => {
                    let address: Address = address.parse()?;
                    serde_json::to_vec_pretty(&self.bank.get_balance(ctx, &address, denom)?)?
                }
                ["bank", "supply"] => serde_json::to_vec_pretty(&self.bank.get_supplies(ctx)?)?,
                ["bank", "supply", denom] => {
                    serde_json::to_vec_pretty(&self.bank.get_supply(ctx, denom)?)?
                }
                ["bank", "params"] => {
                    let params: BankParams = self.bank.get_params(ctx)?;
                    serde_json::to_vec_pretty(&params)?
                }
                ["bank", "denom_metadata"] => {
                    serde_json::to_vec_pretty(&self.bank.get_all_denom_metadata(ctx)?)?
                }
                ["distribution", "community_pool"] => {
                    serde_json::to_vec_pretty(&self.treasury.get_fee_pool(ctx)?.community_pool)?
                }
                ["token", rest @ ..] => self.token.query(ctx, rest, data)?,
                _ => return Err(AppError::UnknownRequest(format!("unknown query path: {path}"))),
            };
            Ok(out)
        })
    }

    /// Every registered invariant, in bank, distribution, token order.
    pub fn run_invariants(&self) -> Result<Vec<InvariantResult>> {
        self.read(|ctx| -> Result<Vec<InvariantResult>> {
            Ok(vec![
                ledger_bank::invariants::all_invariants(&self.bank, ctx)?,
                ledger_treasury::invariants::community_pool_backed(&self.treasury, ctx)?,
                ledger_token::invariants::all_invariants(&self.token, ctx)?,
            ])
        })
    }
}
