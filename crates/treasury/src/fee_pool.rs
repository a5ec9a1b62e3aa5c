use ledger_types::{CoinsError, DecCoins};
use serde::{Deserialize, Serialize};

pub const FEE_POOL_KEY: &[u8] = b"distribution/fee_pool";

/// Funds logically reserved for distribution.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeePool {
    pub community_pool: DecCoins,
}

impl FeePool {
    pub fn validate(&self) -> Result<(), CoinsError> {
        self.community_pool.validate()
    }
}
