//! Entry points the application routes token messages and approved token
//! proposals to.

use crate::errors::Result;
use crate::expected_keepers::{BankKeeper, DistrKeeper};
use crate::keeper::TokenKeeper;
use crate::msgs::TokenMsg;
use crate::proposal::TokenProposal;
use ledger_storage::Context;

pub fn handle_msg<B: BankKeeper, D: DistrKeeper>(
    keeper: &TokenKeeper<B, D>,
    ctx: &mut Context<'_>,
    msg: &TokenMsg,
) -> Result<()> {
    match msg {
        TokenMsg::NewToken(msg) => keeper.new_token(ctx, msg),
        TokenMsg::InflateToken(msg) => keeper.inflate_token(ctx, msg),
        TokenMsg::BurnToken(msg) => keeper.burn_token(ctx, msg),
    }
}

/// Executes content that governance has already approved.
pub fn handle_proposal<B: BankKeeper, D: DistrKeeper>(
    keeper: &TokenKeeper<B, D>,
    ctx: &mut Context<'_>,
    proposal: &TokenProposal,
) -> Result<()> {
    match proposal {
        TokenProposal::TokenParamsChange(p) => keeper.handle_token_params_change_proposal(ctx, p),
        TokenProposal::DisableToken(p) => keeper.handle_disable_token_proposal(ctx, p),
    }
}
