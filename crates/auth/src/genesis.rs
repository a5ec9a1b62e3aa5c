use crate::account::Account;
use crate::errors::AuthError;
use crate::keeper::{AccountKeeper, StoreAccountKeeper};
use crate::registry::ModuleAccountRegistry;
use ledger_storage::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthGenesis {
    #[serde(default)]
    pub accounts: Vec<Account>,
}

impl AuthGenesis {
    pub fn validate(&self) -> Result<(), AuthError> {
        let mut seen = HashSet::new();
        for account in &self.accounts {
            if !seen.insert(account.address()) {
                return Err(AuthError::DuplicateAccount(account.address()));
            }
        }
        Ok(())
    }

    /// Module accounts must be registered and match their entry. Nothing
    /// else may sit at a module address.
    pub fn validate_modules(&self, registry: &ModuleAccountRegistry) -> Result<(), AuthError> {
        for account in &self.accounts {
            let address = account.address();
            match account {
                Account::Module(module) => {
                    let entry = registry.get(&module.name).ok_or_else(|| {
                        AuthError::InvalidGenesis(format!("module {} is not registered", module.name))
                    })?;
                    if !entry.matches(module) {
                        return Err(AuthError::InvalidGenesis(format!(
                            "module account {} does not match its registration",
                            module.name
                        )));
                    }
                }
                _ => {
                    if let Some(entry) = registry.by_address(&address) {
                        return Err(AuthError::InvalidGenesis(format!(
                            "account {address} occupies the address of module {}",
                            entry.name
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

impl StoreAccountKeeper {
    pub fn init_genesis(&self, ctx: &mut Context<'_>, genesis: &AuthGenesis) -> Result<(), AuthError> {
        genesis.validate()?;
        genesis.validate_modules(self.registry())?;
        for account in &genesis.accounts {
            self.set_account(ctx, account)?;
            self.bump_account_number_past(ctx, account.account_number())?;
        }
        tracing::info!(target: "auth", accounts = genesis.accounts.len(), "initialized auth genesis");
        Ok(())
    }

    /// Accounts in address order.
    pub fn export_genesis(&self, ctx: &Context<'_>) -> Result<AuthGenesis, AuthError> {
        Ok(AuthGenesis {
            accounts: self.get_all_accounts(ctx)?,
        })
    }
}
