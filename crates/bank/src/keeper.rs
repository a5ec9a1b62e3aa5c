use crate::errors::{fatal, BankError};
use crate::events::*;
use crate::genesis::Balance;
use crate::keys::*;
use crate::params::{BankParams, KEY_DEFAULT_SEND_ENABLED};
use crate::MODULE_NAME;
use ledger_auth::{Account, AccountKeeper, AuthError, Permission};
use ledger_governance::ParamSubspace;
use ledger_storage::{Context, Event};
use ledger_types::{Address, Coin, Coins, Metadata, Supplies, Supply};
use tracing::{debug, info};

/// Lazy, store-ordered sequence of decoded records. Each call starts a new
/// traversal; dropping the iterator stops it.
pub type BankIter<'c, T> = Box<dyn Iterator<Item = Result<T, BankError>> + 'c>;

/// Balances, supply and metadata over an account provider `A`.
#[derive(Debug, Clone)]
pub struct BaseKeeper<A> {
    accounts: A,
    params: ParamSubspace,
}

impl<A: AccountKeeper> BaseKeeper<A> {
    pub fn new(accounts: A) -> Self {
        Self {
            accounts,
            params: ParamSubspace::for_set::<BankParams>(MODULE_NAME),
        }
    }

    pub fn accounts(&self) -> &A {
        &self.accounts
    }

    pub fn param_subspace(&self) -> &ParamSubspace {
        &self.params
    }

    // -------------------------------------------------------------------------
    // Params
    // -------------------------------------------------------------------------

    /// Stored parameters, or the defaults before genesis has written any.
    pub fn get_params(&self, ctx: &Context<'_>) -> Result<BankParams, BankError> {
        if !self.params.has(ctx, KEY_DEFAULT_SEND_ENABLED)? {
            return Ok(BankParams::default());
        }
        Ok(self.params.get_param_set(ctx)?)
    }

    pub fn set_params(&self, ctx: &mut Context<'_>, params: &BankParams) -> Result<(), BankError> {
        Ok(self.params.set_param_set(ctx, params)?)
    }

    // -------------------------------------------------------------------------
    // Balances
    // -------------------------------------------------------------------------

    /// Missing entries read as a zero coin.
    pub fn get_balance(
        &self,
        ctx: &Context<'_>,
        address: &Address,
        denom: &str,
    ) -> Result<Coin, BankError> {
        Ok(ctx
            .get_json::<Coin>(&balance_key(address, denom))?
            .unwrap_or_else(|| Coin::zero(denom)))
    }

    pub fn has_balance(
        &self,
        ctx: &Context<'_>,
        address: &Address,
        coin: &Coin,
    ) -> Result<bool, BankError> {
        Ok(self.get_balance(ctx, address, &coin.denom)?.amount >= coin.amount)
    }

    pub fn get_all_balances(&self, ctx: &Context<'_>, address: &Address) -> Result<Coins, BankError> {
        let coins = self
            .iterate_account_balances(ctx, address)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Coins::new(coins)?)
    }

    pub fn iterate_account_balances<'c>(
        &self,
        ctx: &'c Context<'_>,
        address: &Address,
    ) -> BankIter<'c, Coin> {
        Box::new(
            ctx.iter_json::<Coin>(&account_balances_prefix(address))
                .map(|item| item.map(|(_, coin)| coin).map_err(BankError::from)),
        )
    }

    /// Every balance entry, ordered by address then denom.
    pub fn iterate_all_balances<'c>(&self, ctx: &'c Context<'_>) -> BankIter<'c, (Address, Coin)> {
        Box::new(ctx.iter_json::<Coin>(BALANCES_PREFIX).map(
            |item| -> Result<(Address, Coin), BankError> {
                let (key, coin) = item?;
                let (address, _) = split_balance_key(&key)?;
                Ok((address, coin))
            },
        ))
    }

    /// Balances grouped per account, in address order.
    pub fn get_accounts_balances(&self, ctx: &Context<'_>) -> Result<Vec<Balance>, BankError> {
        let mut balances: Vec<Balance> = Vec::new();
        for item in self.iterate_all_balances(ctx) {
            let (address, coin) = item?;
            match balances.last_mut() {
                Some(last) if last.address == address => last.coins = last.coins.add_coin(&coin),
                _ => balances.push(Balance {
                    address,
                    coins: Coins::single(coin),
                }),
            }
        }
        Ok(balances)
    }

    /// Overwrite one balance entry. A zero coin removes the entry.
    ///
    /// Only genesis import and this keeper's own credit/debit paths call this;
    /// a bare write here would break the supply invariant.
    pub fn set_balance(
        &self,
        ctx: &mut Context<'_>,
        address: &Address,
        coin: &Coin,
    ) -> Result<(), BankError> {
        coin.validate()
            .map_err(|e| BankError::InvalidCoins(e.to_string()))?;
        let key = balance_key(address, &coin.denom);
        if coin.is_zero() {
            ctx.delete(&key)?;
        } else {
            ctx.set_json(&key, coin)?;
        }
        Ok(())
    }

    /// Replace all balances of an account.
    pub fn set_balances(
        &self,
        ctx: &mut Context<'_>,
        address: &Address,
        coins: &Coins,
    ) -> Result<(), BankError> {
        let existing = self
            .iterate_account_balances(ctx, address)
            .collect::<Result<Vec<_>, _>>()?;
        for coin in existing {
            ctx.delete(&balance_key(address, &coin.denom))?;
        }
        for coin in coins {
            self.set_balance(ctx, address, coin)?;
        }
        Ok(())
    }

    fn ensure_valid(amt: &Coins) -> Result<(), BankError> {
        amt.validate()
            .map_err(|e| BankError::InvalidCoins(format!("{amt}: {e}")))
    }

    fn add_coins(&self, ctx: &mut Context<'_>, address: &Address, amt: &Coins) -> Result<(), BankError> {
        Self::ensure_valid(amt)?;
        for coin in amt {
            let balance = self.get_balance(ctx, address, &coin.denom)?;
            self.set_balance(ctx, address, &balance.checked_add(coin)?)?;
        }
        Ok(())
    }

    fn subtract_coins(
        &self,
        ctx: &mut Context<'_>,
        address: &Address,
        amt: &Coins,
    ) -> Result<(), BankError> {
        Self::ensure_valid(amt)?;
        for coin in amt {
            let balance = self.get_balance(ctx, address, &coin.denom)?;
            if balance.is_lt(coin) {
                return Err(BankError::InsufficientFunds(format!(
                    "{balance} is smaller than {coin}"
                )));
            }
            self.set_balance(ctx, address, &balance.checked_sub(coin)?)?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Transfers
    // -------------------------------------------------------------------------

    /// Whether `denom` may move through [`BaseKeeper::send_coins`]: the
    /// metadata flag when registered, the default param otherwise.
    pub fn is_send_enabled_denom(&self, ctx: &Context<'_>, denom: &str) -> Result<bool, BankError> {
        let metadata = self.get_denom_metadata(ctx, denom)?;
        if metadata.is_registered(denom) {
            return Ok(metadata.send_enabled);
        }
        Ok(self.get_params(ctx)?.default_send_enabled)
    }

    pub fn is_send_enabled_coins(&self, ctx: &Context<'_>, coins: &Coins) -> Result<(), BankError> {
        for coin in coins {
            if !self.is_send_enabled_denom(ctx, &coin.denom)? {
                debug!(target: "bank", denom = %coin.denom, "transfer blocked");
                return Err(BankError::SendDisabled(coin.denom.clone()));
            }
        }
        Ok(())
    }

    /// Account-to-account transfer, subject to each denomination's
    /// transferability. Module accounts cannot be the recipient.
    pub fn send_coins(
        &self,
        ctx: &mut Context<'_>,
        from: &Address,
        to: &Address,
        amt: &Coins,
    ) -> Result<(), BankError> {
        if self.accounts.is_module_address(to) {
            return Err(BankError::Unauthorized(format!(
                "{to} is not allowed to receive funds"
            )));
        }
        Self::ensure_valid(amt)?;
        self.is_send_enabled_coins(ctx, amt)?;
        self.send_coins_unrestricted(ctx, from, to, amt)
    }

    /// Transfer without the transferability check. Used by the module
    /// wrappers. All denominations move or none do.
    pub fn send_coins_unrestricted(
        &self,
        ctx: &mut Context<'_>,
        from: &Address,
        to: &Address,
        amt: &Coins,
    ) -> Result<(), BankError> {
        ctx.atomic(|ctx| -> Result<(), BankError> {
            self.subtract_coins(ctx, from, amt)?;
            self.add_coins(ctx, to, amt)?;
            // Module accounts are created on first use.
            if !self.accounts.is_module_address(to)
                && self.accounts.get_account(ctx, to)?.is_none()
            {
                self.accounts.new_account_with_address(ctx, to)?;
            }
            ctx.emit_all([
                Event::new(EVENT_TYPE_TRANSFER)
                    .attr(ATTRIBUTE_KEY_RECIPIENT, to)
                    .attr(ATTRIBUTE_KEY_SENDER, from)
                    .attr(ATTRIBUTE_KEY_AMOUNT, amt),
                Event::new(EVENT_TYPE_COIN_SPENT)
                    .attr(ATTRIBUTE_KEY_SPENDER, from)
                    .attr(ATTRIBUTE_KEY_AMOUNT, amt),
                Event::new(EVENT_TYPE_COIN_RECEIVED)
                    .attr(ATTRIBUTE_KEY_RECEIVER, to)
                    .attr(ATTRIBUTE_KEY_AMOUNT, amt),
                Event::new(EVENT_TYPE_MESSAGE).attr(ATTRIBUTE_KEY_SENDER, from),
            ]);
            Ok(())
        })
    }

    fn module_address(&self, module: &str) -> Address {
        self.accounts.get_module_address(module).unwrap_or_else(|| {
            fatal(BankError::UnknownAddress(format!(
                "module account {module} does not exist"
            )))
        })
    }

    fn module_account(&self, ctx: &mut Context<'_>, module: &str) -> Result<Account, BankError> {
        match self.accounts.get_module_account(ctx, module) {
            Ok(Some(account)) => Ok(account),
            Err(err @ AuthError::InvalidModuleAccount(_)) => fatal(BankError::Auth(err)),
            Err(err) => Err(err.into()),
            Ok(None) => fatal(BankError::UnknownAddress(format!(
                "module account {module} does not exist"
            ))),
        }
    }

    /// Address of a registered module account. Panics for unknown modules.
    pub fn get_module_address(&self, module: &str) -> Address {
        self.module_address(module)
    }

    pub fn send_coins_from_module_to_account(
        &self,
        ctx: &mut Context<'_>,
        sender_module: &str,
        recipient: &Address,
        amt: &Coins,
    ) -> Result<(), BankError> {
        let sender = self.module_address(sender_module);
        self.send_coins_unrestricted(ctx, &sender, recipient, amt)
    }

    pub fn send_coins_from_module_to_module(
        &self,
        ctx: &mut Context<'_>,
        sender_module: &str,
        recipient_module: &str,
        amt: &Coins,
    ) -> Result<(), BankError> {
        let sender = self.module_address(sender_module);
        let recipient = self.module_account(ctx, recipient_module)?.address();
        self.send_coins_unrestricted(ctx, &sender, &recipient, amt)
    }

    pub fn send_coins_from_account_to_module(
        &self,
        ctx: &mut Context<'_>,
        sender: &Address,
        recipient_module: &str,
        amt: &Coins,
    ) -> Result<(), BankError> {
        let recipient = self.module_account(ctx, recipient_module)?.address();
        self.send_coins_unrestricted(ctx, sender, &recipient, amt)
    }

    // -------------------------------------------------------------------------
    // Delegation
    // -------------------------------------------------------------------------

    /// Move `amt` from a delegator to a module account, recording the
    /// delegation on accounts that track vesting.
    pub fn delegate_coins(
        &self,
        ctx: &mut Context<'_>,
        delegator: &Address,
        module_address: &Address,
        amt: &Coins,
    ) -> Result<(), BankError> {
        ctx.atomic(|ctx| -> Result<(), BankError> {
            if self.accounts.get_account(ctx, module_address)?.is_none() {
                return Err(BankError::UnknownAddress(format!(
                    "module account {module_address} does not exist"
                )));
            }
            Self::ensure_valid(amt)?;

            let mut balances = Coins::empty();
            for coin in amt {
                let balance = self.get_balance(ctx, delegator, &coin.denom)?;
                if balance.is_lt(coin) {
                    return Err(BankError::InsufficientFunds(format!(
                        "failed to delegate; {balance} is smaller than {amt}"
                    )));
                }
                balances = balances.add_coin(&balance);
                self.set_balance(ctx, delegator, &balance.checked_sub(coin)?)?;
            }

            self.track_delegation(ctx, delegator, &balances, amt)?;
            self.add_coins(ctx, module_address, amt)
        })
    }

    /// Return delegated coins from a module account. The module holding less
    /// than `amt` means the books are already wrong, so that case panics.
    pub fn undelegate_coins(
        &self,
        ctx: &mut Context<'_>,
        module_address: &Address,
        delegator: &Address,
        amt: &Coins,
    ) -> Result<(), BankError> {
        ctx.atomic(|ctx| -> Result<(), BankError> {
            if self.accounts.get_account(ctx, module_address)?.is_none() {
                return Err(BankError::UnknownAddress(format!(
                    "module account {module_address} does not exist"
                )));
            }
            Self::ensure_valid(amt)?;

            match self.subtract_coins(ctx, module_address, amt) {
                Err(BankError::InsufficientFunds(reason)) => fatal(BankError::InsufficientFunds(
                    format!("undelegation from module account {module_address}: {reason}"),
                )),
                other => other?,
            }
            self.track_undelegation(ctx, delegator, amt)?;
            self.add_coins(ctx, delegator, amt)
        })
    }

    pub fn delegate_coins_from_account_to_module(
        &self,
        ctx: &mut Context<'_>,
        sender: &Address,
        recipient_module: &str,
        amt: &Coins,
    ) -> Result<(), BankError> {
        let account = self.module_account(ctx, recipient_module)?;
        if !self.accounts.module_has_permission(recipient_module, Permission::Staking) {
            fatal(BankError::Unauthorized(format!(
                "module account {recipient_module} does not have permissions to receive delegated coins"
            )));
        }
        self.delegate_coins(ctx, sender, &account.address(), amt)
    }

    pub fn undelegate_coins_from_module_to_account(
        &self,
        ctx: &mut Context<'_>,
        sender_module: &str,
        recipient: &Address,
        amt: &Coins,
    ) -> Result<(), BankError> {
        let account = self.module_account(ctx, sender_module)?;
        if !self.accounts.module_has_permission(sender_module, Permission::Staking) {
            fatal(BankError::Unauthorized(format!(
                "module account {sender_module} does not have permissions to undelegate coins"
            )));
        }
        self.undelegate_coins(ctx, &account.address(), recipient, amt)
    }

    fn track_delegation(
        &self,
        ctx: &mut Context<'_>,
        address: &Address,
        balance: &Coins,
        amt: &Coins,
    ) -> Result<(), BankError> {
        let block_time = ctx.block_time();
        let mut account = self
            .accounts
            .get_account(ctx, address)?
            .ok_or_else(|| BankError::UnknownAddress(format!("account {address} does not exist")))?;
        if let Some(tracker) = account.as_vesting_tracker_mut() {
            tracker.track_delegation(block_time, balance, amt)?;
            self.accounts.set_account(ctx, &account)?;
        }
        Ok(())
    }

    fn track_undelegation(
        &self,
        ctx: &mut Context<'_>,
        address: &Address,
        amt: &Coins,
    ) -> Result<(), BankError> {
        let mut account = self
            .accounts
            .get_account(ctx, address)?
            .ok_or_else(|| BankError::UnknownAddress(format!("account {address} does not exist")))?;
        if let Some(tracker) = account.as_vesting_tracker_mut() {
            tracker.track_undelegation(amt)?;
            self.accounts.set_account(ctx, &account)?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Mint / burn
    // -------------------------------------------------------------------------

    /// Create `amt` in the named module account and raise supply to match.
    /// Panics if the module is unknown or lacks the minter permission.
    pub fn mint_coins(&self, ctx: &mut Context<'_>, module: &str, amt: &Coins) -> Result<(), BankError> {
        let account = self.module_account(ctx, module)?;
        if !self.accounts.module_has_permission(module, Permission::Minter) {
            fatal(BankError::Unauthorized(format!(
                "module account {module} does not have permissions to mint tokens"
            )));
        }
        let address = account.address();

        ctx.atomic(|ctx| -> Result<(), BankError> {
            self.add_coins(ctx, &address, amt)?;
            for coin in amt {
                let mut supply = self.get_supply(ctx, &coin.denom)?;
                supply.inflate(coin)?;
                self.set_supply(ctx, &supply)?;
            }
            ctx.emit(
                Event::new(EVENT_TYPE_MINT)
                    .attr(ATTRIBUTE_KEY_MINTER, address)
                    .attr(ATTRIBUTE_KEY_AMOUNT, amt),
            );
            Ok(())
        })?;

        info!(target: "bank", "minted {} from {} module account", amt, module);
        Ok(())
    }

    /// Destroy `amt` held by the named module account and lower supply.
    /// Panics if the module is unknown or lacks the burner permission.
    pub fn burn_coins(&self, ctx: &mut Context<'_>, module: &str, amt: &Coins) -> Result<(), BankError> {
        let account = self.module_account(ctx, module)?;
        if !self.accounts.module_has_permission(module, Permission::Burner) {
            fatal(BankError::Unauthorized(format!(
                "module account {module} does not have permissions to burn tokens"
            )));
        }
        let address = account.address();

        ctx.atomic(|ctx| -> Result<(), BankError> {
            self.subtract_coins(ctx, &address, amt)?;
            for coin in amt {
                let mut supply = self.get_supply(ctx, &coin.denom)?;
                if let Err(err) = supply.deflate(coin) {
                    fatal(BankError::Coins(err));
                }
                self.set_supply(ctx, &supply)?;
            }
            ctx.emit(
                Event::new(EVENT_TYPE_BURN)
                    .attr(ATTRIBUTE_KEY_BURNER, address)
                    .attr(ATTRIBUTE_KEY_AMOUNT, amt),
            );
            Ok(())
        })?;

        info!(target: "bank", "burned {} from {} module account", amt, module);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Supply
    // -------------------------------------------------------------------------

    /// Missing entries read as zero supply.
    pub fn get_supply(&self, ctx: &Context<'_>, denom: &str) -> Result<Supply, BankError> {
        Ok(ctx
            .get_json::<Supply>(&supply_key(denom))?
            .unwrap_or_else(|| Supply::zero(denom)))
    }

    /// Per-denomination write.
    pub fn set_supply(&self, ctx: &mut Context<'_>, supply: &Supply) -> Result<(), BankError> {
        ctx.set_json(&supply_key(supply.denom()), supply)?;
        Ok(())
    }

    pub fn iterate_supplies<'c>(&self, ctx: &'c Context<'_>) -> BankIter<'c, Supply> {
        Box::new(
            ctx.iter_json::<Supply>(SUPPLY_PREFIX)
                .map(|item| item.map(|(_, supply)| supply).map_err(BankError::from)),
        )
    }

    /// Aggregate over every supply entry. Walks the whole supply namespace;
    /// prefer [`BaseKeeper::get_supply`] for a single denomination.
    pub fn get_supplies(&self, ctx: &Context<'_>) -> Result<Supplies, BankError> {
        let mut total = Coins::empty();
        for supply in self.iterate_supplies(ctx) {
            total = total.add_coin(&supply?.total);
        }
        Ok(Supplies::new(total))
    }

    /// Clear every supply entry, then write `supplies`. Walks the whole
    /// namespace; meant for genesis import and tests.
    pub fn set_supplies(&self, ctx: &mut Context<'_>, supplies: &Supplies) -> Result<(), BankError> {
        let denoms = self
            .iterate_supplies(ctx)
            .map(|item| item.map(|supply| supply.total.denom))
            .collect::<Result<Vec<_>, _>>()?;
        for denom in denoms {
            ctx.delete(&supply_key(&denom))?;
        }
        for coin in &supplies.total {
            self.set_supply(ctx, &Supply::new(coin.clone()))?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Denomination metadata
    // -------------------------------------------------------------------------

    /// Zero-value metadata when absent; check [`Metadata::is_registered`].
    pub fn get_denom_metadata(&self, ctx: &Context<'_>, denom: &str) -> Result<Metadata, BankError> {
        Ok(ctx
            .get_json::<Metadata>(&denom_metadata_key(denom))?
            .unwrap_or_default())
    }

    /// Validate and upsert, keyed by `metadata.base`.
    pub fn set_denom_metadata(&self, ctx: &mut Context<'_>, metadata: &Metadata) -> Result<(), BankError> {
        metadata.validate()?;
        ctx.set_json(&denom_metadata_key(&metadata.base), metadata)?;
        Ok(())
    }

    pub fn iterate_all_denom_metadata<'c>(&self, ctx: &'c Context<'_>) -> BankIter<'c, Metadata> {
        Box::new(
            ctx.iter_json::<Metadata>(DENOM_METADATA_PREFIX)
                .map(|item| item.map(|(_, metadata)| metadata).map_err(BankError::from)),
        )
    }

    pub fn get_all_denom_metadata(&self, ctx: &Context<'_>) -> Result<Vec<Metadata>, BankError> {
        self.iterate_all_denom_metadata(ctx).collect()
    }
}
