use crate::errors::{Result, TokenError};
use crate::events::*;
use crate::expected_keepers::{BankKeeper, DistrKeeper};
use crate::keeper::TokenKeeper;
use crate::keys::MODULE_NAME;
use crate::msgs::{Msg, MsgBurnToken, MsgInflateToken, MsgNewToken};
use ledger_storage::{Context, Event};
use ledger_types::{Address, Coin, Coins, Metadata};
use tracing::{debug, info};

fn message_event() -> Event {
    Event::new("message").attr("module", ATTRIBUTE_VALUE_CATEGORY)
}

impl<B: BankKeeper, D: DistrKeeper> TokenKeeper<B, D> {
    /// Charge the issue fee, mint `amount` through the module escrow,
    /// register the denomination and deliver the coins. All or nothing.
    pub fn new_token(&self, ctx: &mut Context<'_>, msg: &MsgNewToken) -> Result<()> {
        msg.validate_basic()?;
        let from: Address = msg.from_address.parse()?;
        let to: Address = msg.to_address.parse()?;
        let denom = msg.amount.denom.as_str();
        let amount = Coins::single(msg.amount.clone());

        ctx.atomic(|ctx| -> Result<()> {
            if self.is_supported(ctx, denom)? {
                debug!(target: "token", denom, "denomination already registered");
                return Err(TokenError::DenomAlreadyExist(denom.to_string()));
            }

            let fee = Coins::single(Coin::new(
                self.native_denom(),
                self.get_params(ctx)?.new_token_fee,
            ));
            self.distr.add_coins_from_account_to_fee_pool(ctx, &from, &fee)?;

            self.bank.mint_coins(ctx, MODULE_NAME, &amount)?;
            self.set_token_info(ctx, &Metadata::new_token(denom, &msg.from_address, msg.decimals))?;
            self.bank
                .send_coins_from_module_to_account(ctx, MODULE_NAME, &to, &amount)?;

            ctx.emit_all([
                Event::new(EVENT_TYPE_NEW_TOKEN)
                    .attr(ATTRIBUTE_KEY_ISSUER, &msg.from_address)
                    .attr(ATTRIBUTE_KEY_RECIPIENT, &msg.to_address)
                    .attr(ATTRIBUTE_KEY_SYMBOL, denom)
                    .attr(ATTRIBUTE_KEY_AMOUNT, &msg.amount.amount)
                    .attr(ATTRIBUTE_KEY_ISSUE_FEE, &fee),
                message_event(),
            ]);
            Ok(())
        })?;

        info!(target: "token", denom, issuer = %msg.from_address, "issued new token");
        Ok(())
    }

    /// Mint more of a denomination. Only the recorded issuer may do this.
    pub fn inflate_token(&self, ctx: &mut Context<'_>, msg: &MsgInflateToken) -> Result<()> {
        msg.validate_basic()?;
        let to: Address = msg.to_address.parse()?;
        let denom = msg.amount.denom.as_str();
        let amount = Coins::single(msg.amount.clone());

        ctx.atomic(|ctx| -> Result<()> {
            let metadata = self.get_token_info(ctx, denom)?;
            if !metadata.is_registered(denom) {
                return Err(TokenError::DenomNotExist(denom.to_string()));
            }
            if metadata.issuer != msg.from_address {
                debug!(target: "token", denom, sender = %msg.from_address, "inflation by non-issuer");
                return Err(TokenError::Unauthorized(format!(
                    "{} is not authorized to inflate {}",
                    msg.from_address, denom
                )));
            }

            self.bank.mint_coins(ctx, MODULE_NAME, &amount)?;
            self.bank
                .send_coins_from_module_to_account(ctx, MODULE_NAME, &to, &amount)?;

            ctx.emit_all([
                Event::new(EVENT_TYPE_INFLATE_TOKEN)
                    .attr(ATTRIBUTE_KEY_ISSUER, &msg.from_address)
                    .attr(ATTRIBUTE_KEY_RECIPIENT, &msg.to_address)
                    .attr(ATTRIBUTE_KEY_AMOUNT, &msg.amount),
                message_event(),
            ]);
            Ok(())
        })
    }

    /// Move `amount` from the holder into escrow and destroy it. Any holder
    /// may burn their own balance.
    pub fn burn_token(&self, ctx: &mut Context<'_>, msg: &MsgBurnToken) -> Result<()> {
        msg.validate_basic()?;
        let from: Address = msg.from_address.parse()?;
        let amount = Coins::single(msg.amount.clone());

        ctx.atomic(|ctx| -> Result<()> {
            self.bank
                .send_coins_from_account_to_module(ctx, &from, MODULE_NAME, &amount)?;
            self.bank.burn_coins(ctx, MODULE_NAME, &amount)?;

            ctx.emit_all([
                Event::new(EVENT_TYPE_BURN_TOKEN)
                    .attr(ATTRIBUTE_KEY_ISSUER, &msg.from_address)
                    .attr(ATTRIBUTE_KEY_AMOUNT, &msg.amount),
                message_event(),
            ]);
            Ok(())
        })
    }
}
