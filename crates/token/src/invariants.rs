use crate::errors::Result;
use crate::expected_keepers::{BankKeeper, DistrKeeper};
use crate::keeper::TokenKeeper;
use crate::keys::MODULE_NAME;
use ledger_bank::{format_invariant, InvariantResult};
use ledger_storage::Context;
use ledger_types::PRECISION;

/// No registered denomination claims more decimals than the fixed precision.
pub fn decimals_overflow<B: BankKeeper, D: DistrKeeper>(
    keeper: &TokenKeeper<B, D>,
    ctx: &Context<'_>,
) -> Result<InvariantResult> {
    let mut msg = String::new();
    let mut count = 0u64;
    for metadata in keeper.get_all_token_info(ctx)? {
        if metadata.decimals > PRECISION {
            count += 1;
            msg.push_str(&format!(
                "\t{} decimals overflow: {}\n",
                metadata.base, metadata.decimals
            ));
        }
    }
    Ok((
        format_invariant(
            MODULE_NAME,
            "decimals-overflow",
            &format!("found {count} denom with overflow decimals \n{msg}"),
        ),
        count != 0,
    ))
}

/// The native denomination stays transferable.
pub fn default_denom_send_enabled<B: BankKeeper, D: DistrKeeper>(
    keeper: &TokenKeeper<B, D>,
    ctx: &Context<'_>,
) -> Result<InvariantResult> {
    let enabled = keeper.send_enabled(ctx, keeper.native_denom())?;
    Ok((
        format_invariant(
            MODULE_NAME,
            "default-denom-send-enabled",
            "default denom send enable is false",
        ),
        !enabled,
    ))
}

pub fn all_invariants<B: BankKeeper, D: DistrKeeper>(
    keeper: &TokenKeeper<B, D>,
    ctx: &Context<'_>,
) -> Result<InvariantResult> {
    let (msg, broken) = default_denom_send_enabled(keeper, ctx)?;
    if broken {
        return Ok((msg, broken));
    }
    decimals_overflow(keeper, ctx)
}
