use crate::errors::Result;
use crate::expected_keepers::{BankKeeper, DistrKeeper};
use crate::keys::PARAM_SPACE;
use crate::params::{TokenParams, KEY_NEW_TOKEN_FEE};
use ledger_governance::ParamSubspace;
use ledger_storage::Context;
use ledger_types::{Amount, Metadata};

#[derive(Debug, Clone)]
pub struct TokenKeeper<B, D> {
    pub(crate) bank: B,
    pub(crate) distr: D,
    params: ParamSubspace,
    native_denom: String,
}

impl<B: BankKeeper, D: DistrKeeper> TokenKeeper<B, D> {
    pub fn new(bank: B, distr: D, native_denom: impl Into<String>) -> Self {
        Self {
            bank,
            distr,
            params: ParamSubspace::for_set::<TokenParams>(PARAM_SPACE),
            native_denom: native_denom.into(),
        }
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    pub fn param_subspace(&self) -> &ParamSubspace {
        &self.params
    }

    /// The chain's fee denomination. Its metadata cannot be changed here.
    pub fn native_denom(&self) -> &str {
        &self.native_denom
    }

    pub fn get_token_info(&self, ctx: &Context<'_>, denom: &str) -> Result<Metadata> {
        Ok(self.bank.get_denom_metadata(ctx, denom)?)
    }

    pub fn set_token_info(&self, ctx: &mut Context<'_>, metadata: &Metadata) -> Result<()> {
        Ok(self.bank.set_denom_metadata(ctx, metadata)?)
    }

    pub fn get_all_token_info(&self, ctx: &Context<'_>) -> Result<Vec<Metadata>> {
        Ok(self.bank.get_all_denom_metadata(ctx)?)
    }

    /// Empty for unregistered denominations and the native one.
    pub fn get_issuer(&self, ctx: &Context<'_>, denom: &str) -> Result<String> {
        Ok(self.get_token_info(ctx, denom)?.issuer)
    }

    pub fn is_supported(&self, ctx: &Context<'_>, denom: &str) -> Result<bool> {
        Ok(self.get_token_info(ctx, denom)?.is_registered(denom))
    }

    pub fn send_enabled(&self, ctx: &Context<'_>, denom: &str) -> Result<bool> {
        Ok(self.get_token_info(ctx, denom)?.send_enabled)
    }

    pub fn get_decimals(&self, ctx: &Context<'_>, denom: &str) -> Result<u32> {
        Ok(self.get_token_info(ctx, denom)?.decimals)
    }

    pub fn get_total_supply(&self, ctx: &Context<'_>, denom: &str) -> Result<Amount> {
        Ok(self.bank.get_supply(ctx, denom)?.total.amount)
    }

    /// No-op for unregistered denominations.
    pub fn enable_send(&self, ctx: &mut Context<'_>, denom: &str) -> Result<()> {
        self.set_send_enabled(ctx, denom, true)
    }

    /// No-op for unregistered denominations.
    pub fn disable_send(&self, ctx: &mut Context<'_>, denom: &str) -> Result<()> {
        self.set_send_enabled(ctx, denom, false)
    }

    fn set_send_enabled(&self, ctx: &mut Context<'_>, denom: &str, enabled: bool) -> Result<()> {
        let mut metadata = self.get_token_info(ctx, denom)?;
        if metadata.is_registered(denom) {
            metadata.send_enabled = enabled;
            self.set_token_info(ctx, &metadata)?;
        }
        Ok(())
    }

    /// Base denominations of every registered token, in key order.
    pub fn get_symbols(&self, ctx: &Context<'_>) -> Result<Vec<String>> {
        Ok(self
            .get_all_token_info(ctx)?
            .into_iter()
            .map(|metadata| metadata.base)
            .collect())
    }

    /// Stored parameters, or the defaults before genesis has written any.
    pub fn get_params(&self, ctx: &Context<'_>) -> Result<TokenParams> {
        if !self.params.has(ctx, KEY_NEW_TOKEN_FEE)? {
            return Ok(TokenParams::default());
        }
        Ok(self.params.get_param_set(ctx)?)
    }

    pub fn set_params(&self, ctx: &mut Context<'_>, params: &TokenParams) -> Result<()> {
        params.validate()?;
        Ok(self.params.set_param_set(ctx, params)?)
    }
}
