pub const MODULE_NAME: &str = "token";
pub const ROUTER_KEY: &str = MODULE_NAME;
pub const QUERIER_ROUTE: &str = MODULE_NAME;
pub const PARAM_SPACE: &str = MODULE_NAME;

pub const QUERY_SYMBOL: &str = "symbol";
pub const QUERY_SYMBOLS: &str = "symbols";
pub const QUERY_PARAMETERS: &str = "parameters";

pub const TYPE_MSG_NEW_TOKEN: &str = "new";
pub const TYPE_MSG_INFLATE_TOKEN: &str = "inflate";
pub const TYPE_MSG_BURN_TOKEN: &str = "burn";

/// The one metadata field token proposals may edit.
pub const KEY_SEND_ENABLED: &str = "send_enabled";
