//! Store-backed account provider.

use crate::account::{Account, BaseAccount, ModuleAccount, Permission};
use crate::errors::AuthError;
use crate::registry::ModuleAccountRegistry;
use ledger_storage::{prefixed, Context};
use ledger_types::Address;
use std::sync::Arc;
use tracing::debug;

const ACCOUNT_PREFIX: &[u8] = b"auth/accounts/";
const NEXT_NUMBER_KEY: &[u8] = b"auth/next_account_number";

/// Interface the ledger consumes from the account subsystem.
pub trait AccountKeeper {
    fn get_account(&self, ctx: &Context<'_>, address: &Address) -> Result<Option<Account>, AuthError>;

    fn set_account(&self, ctx: &mut Context<'_>, account: &Account) -> Result<(), AuthError>;

    /// Create and persist a plain account with the next account number.
    fn new_account_with_address(
        &self,
        ctx: &mut Context<'_>,
        address: &Address,
    ) -> Result<Account, AuthError>;

    /// Address of a registered module, `None` if the name is not registered.
    fn get_module_address(&self, name: &str) -> Option<Address>;

    /// Whether the registered module holds `permission`. Unregistered
    /// modules hold none.
    fn module_has_permission(&self, name: &str, permission: Permission) -> bool;

    /// Whether `address` belongs to a registered module.
    fn is_module_address(&self, address: &Address) -> bool;

    /// The account of a registered module, created on first use. Fails if
    /// the stored account at the module address does not match the registry.
    fn get_module_account(
        &self,
        ctx: &mut Context<'_>,
        name: &str,
    ) -> Result<Option<Account>, AuthError>;

    fn get_all_accounts(&self, ctx: &Context<'_>) -> Result<Vec<Account>, AuthError>;
}

#[derive(Debug, Clone)]
pub struct StoreAccountKeeper {
    registry: Arc<ModuleAccountRegistry>,
}

impl StoreAccountKeeper {
    pub fn new(registry: Arc<ModuleAccountRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ModuleAccountRegistry {
        &self.registry
    }

    fn next_account_number(&self, ctx: &mut Context<'_>) -> Result<u64, AuthError> {
        let next = ctx.get_json::<u64>(NEXT_NUMBER_KEY)?.unwrap_or(0);
        ctx.set_json(NEXT_NUMBER_KEY, &(next + 1))?;
        Ok(next)
    }

    pub(crate) fn bump_account_number_past(
        &self,
        ctx: &mut Context<'_>,
        number: u64,
    ) -> Result<(), AuthError> {
        let next = ctx.get_json::<u64>(NEXT_NUMBER_KEY)?.unwrap_or(0);
        if number >= next {
            ctx.set_json(NEXT_NUMBER_KEY, &(number + 1))?;
        }
        Ok(())
    }
}

fn account_key(address: &Address) -> Vec<u8> {
    prefixed(ACCOUNT_PREFIX, address.as_bytes())
}

impl AccountKeeper for StoreAccountKeeper {
    fn get_account(&self, ctx: &Context<'_>, address: &Address) -> Result<Option<Account>, AuthError> {
        Ok(ctx.get_json(&account_key(address))?)
    }

    fn set_account(&self, ctx: &mut Context<'_>, account: &Account) -> Result<(), AuthError> {
        ctx.set_json(&account_key(&account.address()), account)?;
        Ok(())
    }

    fn new_account_with_address(
        &self,
        ctx: &mut Context<'_>,
        address: &Address,
    ) -> Result<Account, AuthError> {
        let mut account = Account::new_base(*address);
        account.set_account_number(self.next_account_number(ctx)?);
        self.set_account(ctx, &account)?;
        debug!(target: "auth", %address, number = account.account_number(), "created account");
        Ok(account)
    }

    fn get_module_address(&self, name: &str) -> Option<Address> {
        self.registry.address_of(name)
    }

    fn module_has_permission(&self, name: &str, permission: Permission) -> bool {
        self.registry
            .get(name)
            .map_or(false, |entry| entry.has_permission(permission))
    }

    fn is_module_address(&self, address: &Address) -> bool {
        self.registry.is_module_address(address)
    }

    fn get_module_account(
        &self,
        ctx: &mut Context<'_>,
        name: &str,
    ) -> Result<Option<Account>, AuthError> {
        let Some(entry) = self.registry.get(name) else {
            return Ok(None);
        };
        match self.get_account(ctx, &entry.address)? {
            Some(Account::Module(existing)) if entry.matches(&existing) => {
                return Ok(Some(Account::Module(existing)));
            }
            Some(_) => {
                return Err(AuthError::InvalidModuleAccount(format!(
                    "account at {} does not match module {name}",
                    entry.address
                )));
            }
            None => {}
        }
        let account = Account::Module(ModuleAccount {
            base: BaseAccount {
                address: entry.address,
                account_number: self.next_account_number(ctx)?,
                sequence: 0,
            },
            name: entry.name.clone(),
            permissions: entry.permissions.clone(),
        });
        self.set_account(ctx, &account)?;
        debug!(target: "auth", module = name, "created module account");
        Ok(Some(account))
    }

    fn get_all_accounts(&self, ctx: &Context<'_>) -> Result<Vec<Account>, AuthError> {
        ctx.iter_json::<Account>(ACCOUNT_PREFIX)
            .map(|item| item.map(|(_, account)| account).map_err(AuthError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::Permission;
    use ledger_storage::{BlockHeader, MemoryStore};

    fn keeper() -> StoreAccountKeeper {
        StoreAccountKeeper::new(Arc::new(ModuleAccountRegistry::new([(
            "token",
            &[Permission::Minter][..],
        )])))
    }

    #[test]
    fn module_accounts_are_created_lazily() {
        let mut store = MemoryStore::new();
        let mut ctx = Context::new(&mut store, BlockHeader::default());
        let keeper = keeper();

        let address = keeper.get_module_address("token").unwrap();
        assert!(keeper.get_account(&ctx, &address).unwrap().is_none());

        let acc = keeper.get_module_account(&mut ctx, "token").unwrap().unwrap();
        assert_eq!(acc.module_name(), Some("token"));
        assert!(acc.has_permission(Permission::Minter));
        assert_eq!(keeper.get_account(&ctx, &address).unwrap(), Some(acc));

        assert!(keeper.get_module_account(&mut ctx, "nope").unwrap().is_none());
    }

    #[test]
    fn mismatched_account_at_module_address_is_rejected() {
        let mut store = MemoryStore::new();
        let mut ctx = Context::new(&mut store, BlockHeader::default());
        let keeper = keeper();

        let address = keeper.get_module_address("token").unwrap();
        keeper.new_account_with_address(&mut ctx, &address).unwrap();

        assert!(matches!(
            keeper.get_module_account(&mut ctx, "token"),
            Err(AuthError::InvalidModuleAccount(_))
        ));
        assert!(keeper.module_has_permission("token", Permission::Minter));
        assert!(!keeper.module_has_permission("token", Permission::Burner));
        assert!(!keeper.module_has_permission("nope", Permission::Minter));
        assert!(keeper.is_module_address(&address));
    }

    #[test]
    fn account_numbers_increase() {
        let mut store = MemoryStore::new();
        let mut ctx = Context::new(&mut store, BlockHeader::default());
        let keeper = keeper();
        let a = keeper
            .new_account_with_address(&mut ctx, &Address::new([1; 32]))
            .unwrap();
        let b = keeper
            .new_account_with_address(&mut ctx, &Address::new([2; 32]))
            .unwrap();
        assert_eq!(a.account_number() + 1, b.account_number());
        assert_eq!(keeper.get_all_accounts(&ctx).unwrap().len(), 2);
    }
}
