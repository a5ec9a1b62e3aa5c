//! Module-account registry fixed at application wiring time.

use crate::account::{ModuleAccount, Permission};
use ledger_types::Address;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEntry {
    pub name: String,
    pub address: Address,
    pub permissions: Vec<Permission>,
}

impl ModuleEntry {
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Whether a stored module account carries this entry's name, address
    /// and permission set.
    pub fn matches(&self, account: &ModuleAccount) -> bool {
        let stored: BTreeSet<_> = account.permissions.iter().collect();
        let wired: BTreeSet<_> = self.permissions.iter().collect();
        account.name == self.name && account.base.address == self.address && stored == wired
    }
}

/// Immutable mapping of module name to derived address and permissions.
#[derive(Debug, Clone, Default)]
pub struct ModuleAccountRegistry {
    modules: BTreeMap<String, ModuleEntry>,
}

impl ModuleAccountRegistry {
    pub fn new<'a>(modules: impl IntoIterator<Item = (&'a str, &'a [Permission])>) -> Self {
        let modules = modules
            .into_iter()
            .map(|(name, permissions)| {
                let entry = ModuleEntry {
                    name: name.to_string(),
                    address: Address::for_module(name),
                    permissions: permissions.to_vec(),
                };
                (name.to_string(), entry)
            })
            .collect();
        Self { modules }
    }

    pub fn get(&self, name: &str) -> Option<&ModuleEntry> {
        self.modules.get(name)
    }

    pub fn address_of(&self, name: &str) -> Option<Address> {
        self.modules.get(name).map(|entry| entry.address)
    }

    pub fn is_module_address(&self, address: &Address) -> bool {
        self.by_address(address).is_some()
    }

    pub fn by_address(&self, address: &Address) -> Option<&ModuleEntry> {
        self.modules.values().find(|entry| entry.address == *address)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleEntry> {
        self.modules.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_derive_from_names() {
        let registry = ModuleAccountRegistry::new([
            ("token", &[Permission::Minter, Permission::Burner][..]),
            ("distribution", &[][..]),
        ]);
        let token = registry.get("token").unwrap();
        assert_eq!(token.address, Address::for_module("token"));
        assert!(token.has_permission(Permission::Burner));
        assert!(!token.has_permission(Permission::Staking));
        assert!(registry.is_module_address(&Address::for_module("distribution")));
        assert_eq!(registry.address_of("missing"), None);
    }

    #[test]
    fn matches_ignores_permission_order() {
        let registry =
            ModuleAccountRegistry::new([("token", &[Permission::Minter, Permission::Burner][..])]);
        let entry = registry.get("token").unwrap();
        let mut account = ModuleAccount {
            base: crate::account::BaseAccount::new(entry.address),
            name: "token".to_string(),
            permissions: vec![Permission::Burner, Permission::Minter],
        };
        assert!(entry.matches(&account));

        account.permissions.push(Permission::Staking);
        assert!(!entry.matches(&account));

        account.permissions = entry.permissions.clone();
        account.name = "other".to_string();
        assert!(!entry.matches(&account));
    }
}
