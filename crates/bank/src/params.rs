use ledger_governance::{validate_bool, KeyTable, ParamSet};
use serde::{Deserialize, Serialize};

pub const KEY_DEFAULT_SEND_ENABLED: &str = "default_send_enabled";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankParams {
    /// Transferability of denominations that have no metadata record.
    pub default_send_enabled: bool,
}

impl Default for BankParams {
    fn default() -> Self {
        Self {
            default_send_enabled: true,
        }
    }
}

impl ParamSet for BankParams {
    fn key_table() -> KeyTable {
        KeyTable::new().with(KEY_DEFAULT_SEND_ENABLED, validate_bool)
    }
}
