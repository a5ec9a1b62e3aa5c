use crate::errors::AuthError;
use crate::vesting::VestingTracker;
use ledger_types::{Address, Amount, Coin, Coins};
use serde::{Deserialize, Serialize};

/// Capabilities a module account may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Minter,
    Burner,
    Staking,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseAccount {
    pub address: Address,
    #[serde(default)]
    pub account_number: u64,
    #[serde(default)]
    pub sequence: u64,
}

impl BaseAccount {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            account_number: 0,
            sequence: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleAccount {
    #[serde(flatten)]
    pub base: BaseAccount,
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// Account whose original vesting coins unlock all at once at `end_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayedVestingAccount {
    #[serde(flatten)]
    pub base: BaseAccount,
    pub original_vesting: Coins,
    #[serde(default)]
    pub delegated_free: Coins,
    #[serde(default)]
    pub delegated_vesting: Coins,
    /// Unix seconds.
    pub end_time: i64,
}

impl DelayedVestingAccount {
    pub fn new(base: BaseAccount, original_vesting: Coins, end_time: i64) -> Self {
        Self {
            base,
            original_vesting,
            delegated_free: Coins::empty(),
            delegated_vesting: Coins::empty(),
            end_time,
        }
    }
}

impl VestingTracker for DelayedVestingAccount {
    fn vesting_coins(&self, block_time: i64) -> Coins {
        if block_time >= self.end_time {
            Coins::empty()
        } else {
            self.original_vesting.clone()
        }
    }

    fn delegated_free(&self) -> &Coins {
        &self.delegated_free
    }

    fn delegated_vesting(&self) -> &Coins {
        &self.delegated_vesting
    }

    fn track_delegation(
        &mut self,
        block_time: i64,
        balance: &Coins,
        amount: &Coins,
    ) -> Result<(), AuthError> {
        let vesting = self.vesting_coins(block_time);
        for coin in amount {
            if coin.is_zero() || balance.amount_of(&coin.denom) < coin.amount {
                return Err(AuthError::InvalidDelegation(format!(
                    "delegation of {coin} with zero coins or insufficient funds"
                )));
            }
            let still_vesting =
                &vesting.amount_of(&coin.denom) - &self.delegated_vesting.amount_of(&coin.denom);
            let from_vesting = still_vesting.max(Amount::zero()).min(coin.amount.clone());
            let from_free = &coin.amount - &from_vesting;

            self.delegated_vesting = self
                .delegated_vesting
                .add_coin(&Coin::new(coin.denom.clone(), from_vesting));
            self.delegated_free = self
                .delegated_free
                .add_coin(&Coin::new(coin.denom.clone(), from_free));
        }
        Ok(())
    }

    fn track_undelegation(&mut self, amount: &Coins) -> Result<(), AuthError> {
        for coin in amount {
            if coin.is_zero() {
                return Err(AuthError::InvalidDelegation(format!(
                    "undelegation of zero {}",
                    coin.denom
                )));
            }
            let from_free = self
                .delegated_free
                .amount_of(&coin.denom)
                .min(coin.amount.clone());
            let rest = &coin.amount - &from_free;
            let from_vesting = self.delegated_vesting.amount_of(&coin.denom).min(rest);

            // both amounts are bounded by the tracked totals, so neither
            // subtraction can go negative
            let (free, _) = self
                .delegated_free
                .safe_sub(&Coins::single(Coin::new(coin.denom.clone(), from_free)));
            let (vesting, _) = self
                .delegated_vesting
                .safe_sub(&Coins::single(Coin::new(coin.denom.clone(), from_vesting)));
            self.delegated_free = free;
            self.delegated_vesting = vesting;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Account {
    Base(BaseAccount),
    Module(ModuleAccount),
    DelayedVesting(DelayedVestingAccount),
}

impl Account {
    pub fn new_base(address: Address) -> Self {
        Account::Base(BaseAccount::new(address))
    }

    fn base(&self) -> &BaseAccount {
        match self {
            Account::Base(base) => base,
            Account::Module(module) => &module.base,
            Account::DelayedVesting(vesting) => &vesting.base,
        }
    }

    fn base_mut(&mut self) -> &mut BaseAccount {
        match self {
            Account::Base(base) => base,
            Account::Module(module) => &mut module.base,
            Account::DelayedVesting(vesting) => &mut vesting.base,
        }
    }

    pub fn address(&self) -> Address {
        self.base().address
    }

    pub fn account_number(&self) -> u64 {
        self.base().account_number
    }

    pub fn set_account_number(&mut self, number: u64) {
        self.base_mut().account_number = number;
    }

    pub fn sequence(&self) -> u64 {
        self.base().sequence
    }

    /// Module name, for module accounts.
    pub fn module_name(&self) -> Option<&str> {
        match self {
            Account::Module(module) => Some(&module.name),
            _ => None,
        }
    }

    /// Only module accounts carry permissions.
    pub fn has_permission(&self, permission: Permission) -> bool {
        match self {
            Account::Module(module) => module.permissions.contains(&permission),
            _ => false,
        }
    }

    pub fn as_vesting_tracker(&self) -> Option<&dyn VestingTracker> {
        match self {
            Account::DelayedVesting(vesting) => Some(vesting),
            _ => None,
        }
    }

    pub fn as_vesting_tracker_mut(&mut self) -> Option<&mut dyn VestingTracker> {
        match self {
            Account::DelayedVesting(vesting) => Some(vesting),
            _ => None,
        }
    }
}
