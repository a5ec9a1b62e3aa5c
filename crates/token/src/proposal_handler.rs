use crate::errors::{Result, TokenError};
use crate::events::*;
use crate::expected_keepers::{BankKeeper, DistrKeeper};
use crate::keeper::TokenKeeper;
use crate::keys::KEY_SEND_ENABLED;
use crate::proposal::{DisableTokenProposal, TokenParamChange, TokenParamsChangeProposal};
use ledger_storage::{Context, Event};
use ledger_types::Metadata;
use tracing::info;

fn apply_change(metadata: &mut Metadata, change: &TokenParamChange) -> Result<()> {
    match change.key.as_str() {
        KEY_SEND_ENABLED => {
            metadata.send_enabled = serde_json::from_str::<bool>(&change.value).map_err(|e| {
                TokenError::InvalidParams(format!("{KEY_SEND_ENABLED}: {e}"))
            })?;
            Ok(())
        }
        other => Err(TokenError::InvalidParams(format!("unknown parameter: {other}"))),
    }
}

impl<B: BankKeeper, D: DistrKeeper> TokenKeeper<B, D> {
    fn ensure_mutable(&self, denom: &str) -> Result<()> {
        if denom == self.native_denom() {
            return Err(TokenError::Unauthorized(
                "not allowed to change native token's params".to_string(),
            ));
        }
        Ok(())
    }

    fn registered_metadata(&self, ctx: &Context<'_>, denom: &str) -> Result<Metadata> {
        let metadata = self.get_token_info(ctx, denom)?;
        if !metadata.is_registered(denom) {
            return Err(TokenError::DenomNotExist(format!("{denom} does not exist")));
        }
        Ok(metadata)
    }

    /// Apply every edit or none of them.
    pub fn handle_token_params_change_proposal(
        &self,
        ctx: &mut Context<'_>,
        proposal: &TokenParamsChangeProposal,
    ) -> Result<()> {
        info!(
            target: "token",
            title = %proposal.title,
            denom = %proposal.denom,
            changes = proposal.changes.len(),
            "handling token params change proposal"
        );
        self.ensure_mutable(&proposal.denom)?;

        ctx.atomic(|ctx| -> Result<()> {
            let mut metadata = self.registered_metadata(ctx, &proposal.denom)?;
            let mut event = Event::new(EVENT_TYPE_EXECUTE_TOKEN_PARAMS_CHANGE_PROPOSAL);
            for change in &proposal.changes {
                apply_change(&mut metadata, change)?;
                event = event
                    .attr(ATTRIBUTE_KEY_TOKEN_PARAM, &change.key)
                    .attr(ATTRIBUTE_KEY_TOKEN_PARAM_VALUE, &change.value);
            }
            self.set_token_info(ctx, &metadata)?;
            ctx.emit(event);
            Ok(())
        })
    }

    pub fn handle_disable_token_proposal(
        &self,
        ctx: &mut Context<'_>,
        proposal: &DisableTokenProposal,
    ) -> Result<()> {
        info!(
            target: "token",
            title = %proposal.title,
            denom = %proposal.denom,
            "handling disable token proposal"
        );
        self.ensure_mutable(&proposal.denom)?;

        ctx.atomic(|ctx| -> Result<()> {
            let mut metadata = self.registered_metadata(ctx, &proposal.denom)?;
            metadata.send_enabled = false;
            self.set_token_info(ctx, &metadata)?;
            ctx.emit(
                Event::new(EVENT_TYPE_EXECUTE_DISABLE_TOKEN_PROPOSAL)
                    .attr(ATTRIBUTE_KEY_TOKEN, &proposal.denom),
            );
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_enabled_takes_json_booleans() {
        let mut metadata = Metadata::new_token("btc", "issuer", 6);
        apply_change(&mut metadata, &TokenParamChange::new("send_enabled", "false")).unwrap();
        assert!(!metadata.send_enabled);

        let err = apply_change(&mut metadata, &TokenParamChange::new("send_enabled", "\"yes\""))
            .unwrap_err();
        assert!(matches!(err, TokenError::InvalidParams(_)));
    }

    #[test]
    fn unknown_keys_are_invalid() {
        let mut metadata = Metadata::new_token("btc", "issuer", 6);
        let err = apply_change(&mut metadata, &TokenParamChange::new("decimals", "3")).unwrap_err();
        assert!(matches!(err, TokenError::InvalidParams(ref m) if m.contains("decimals")));
    }
}
