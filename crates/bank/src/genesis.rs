use crate::errors::BankError;
use crate::keeper::BaseKeeper;
use crate::params::BankParams;
use ledger_auth::AccountKeeper;
use ledger_storage::Context;
use ledger_types::{sort_metadatas, validate_metadatas, Address, Coins, Metadata, Supplies};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// All balances held by one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub address: Address,
    pub coins: Coins,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BankGenesis {
    #[serde(default)]
    pub params: BankParams,
    #[serde(default)]
    pub balances: Vec<Balance>,
    /// Empty means "derive from balances".
    #[serde(default)]
    pub supply: Coins,
    #[serde(default)]
    pub denom_metadata: Vec<Metadata>,
}

impl BankGenesis {
    /// Fresh chain: no balances, only the native denomination registered.
    pub fn default_genesis(native_denom: &str) -> Self {
        Self {
            params: BankParams::default(),
            balances: Vec::new(),
            supply: Coins::empty(),
            denom_metadata: vec![Metadata::default_native(native_denom)],
        }
    }

    pub fn validate(&self) -> Result<(), BankError> {
        let mut addresses = HashSet::new();
        for balance in &self.balances {
            if !addresses.insert(balance.address) {
                return Err(BankError::InvalidGenesis(format!(
                    "duplicate balance for address {}",
                    balance.address
                )));
            }
            balance.coins.validate().map_err(|e| {
                BankError::InvalidGenesis(format!("balance of {}: {e}", balance.address))
            })?;
        }

        self.supply
            .validate()
            .map_err(|e| BankError::InvalidGenesis(format!("supply: {e}")))?;

        validate_metadatas(&self.denom_metadata)?;
        let mut bases = HashSet::new();
        for metadata in &self.denom_metadata {
            if !bases.insert(metadata.base.as_str()) {
                return Err(BankError::InvalidGenesis(format!(
                    "duplicate denomination metadata for {}",
                    metadata.base
                )));
            }
        }
        Ok(())
    }

    /// Sum of every balance, per denomination.
    pub fn total_balances(&self) -> Coins {
        self.balances
            .iter()
            .fold(Coins::empty(), |total, balance| total.add(&balance.coins))
    }
}

impl<A: AccountKeeper> BaseKeeper<A> {
    pub fn init_genesis(&self, ctx: &mut Context<'_>, genesis: &BankGenesis) -> Result<(), BankError> {
        genesis.validate()?;
        self.set_params(ctx, &genesis.params)?;

        for balance in &genesis.balances {
            self.set_balances(ctx, &balance.address, &balance.coins)?;
        }

        let total = genesis.total_balances();
        if !genesis.supply.is_empty() && genesis.supply != total {
            return Err(BankError::InvalidGenesis(format!(
                "genesis supply {} does not match the sum of balances {}",
                genesis.supply, total
            )));
        }
        self.set_supplies(ctx, &Supplies::new(total))?;

        for metadata in &genesis.denom_metadata {
            self.set_denom_metadata(ctx, metadata)?;
        }

        tracing::info!(
            target: "bank",
            balances = genesis.balances.len(),
            denoms = genesis.denom_metadata.len(),
            "initialized bank genesis"
        );
        Ok(())
    }

    /// Balances in address order, metadata in base order.
    pub fn export_genesis(&self, ctx: &Context<'_>) -> Result<BankGenesis, BankError> {
        let mut denom_metadata = self.get_all_denom_metadata(ctx)?;
        sort_metadatas(&mut denom_metadata);
        Ok(BankGenesis {
            params: self.get_params(ctx)?,
            balances: self.get_accounts_balances(ctx)?,
            supply: self.get_supplies(ctx)?.total,
            denom_metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::new([byte; 32])
    }

    #[test]
    fn default_genesis_is_valid() {
        let genesis = BankGenesis::default_genesis("stake");
        genesis.validate().unwrap();
        assert_eq!(genesis.denom_metadata[0].base, "stake");
    }

    #[test]
    fn duplicate_addresses_are_rejected() {
        let balance = Balance {
            address: addr(1),
            coins: "5btc".parse().unwrap(),
        };
        let genesis = BankGenesis {
            balances: vec![balance.clone(), balance],
            ..BankGenesis::default()
        };
        assert!(matches!(genesis.validate(), Err(BankError::InvalidGenesis(_))));
    }

    #[test]
    fn duplicate_metadata_is_rejected() {
        let genesis = BankGenesis {
            denom_metadata: vec![Metadata::default_native("stake"), Metadata::default_native("stake")],
            ..BankGenesis::default()
        };
        assert!(matches!(genesis.validate(), Err(BankError::InvalidGenesis(_))));
    }

    #[test]
    fn total_balances_sums_per_denom() {
        let genesis = BankGenesis {
            balances: vec![
                Balance { address: addr(1), coins: "5btc,1stake".parse().unwrap() },
                Balance { address: addr(2), coins: "7btc".parse().unwrap() },
            ],
            ..BankGenesis::default()
        };
        assert_eq!(genesis.total_balances().to_string(), "12btc,1stake");
    }
}
