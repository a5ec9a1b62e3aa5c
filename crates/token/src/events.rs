pub const EVENT_TYPE_NEW_TOKEN: &str = "new_token";
pub const EVENT_TYPE_INFLATE_TOKEN: &str = "inflate_token";
pub const EVENT_TYPE_BURN_TOKEN: &str = "burn_token";
pub const EVENT_TYPE_EXECUTE_TOKEN_PARAMS_CHANGE_PROPOSAL: &str = "execute_token_params_change_proposal";
pub const EVENT_TYPE_EXECUTE_DISABLE_TOKEN_PROPOSAL: &str = "execute_disable_token_proposal";

pub const ATTRIBUTE_KEY_ISSUER: &str = "issuer";
pub const ATTRIBUTE_KEY_RECIPIENT: &str = "recipient";
pub const ATTRIBUTE_KEY_SYMBOL: &str = "symbol";
pub const ATTRIBUTE_KEY_AMOUNT: &str = "amount";
pub const ATTRIBUTE_KEY_ISSUE_FEE: &str = "issue_fee";
pub const ATTRIBUTE_KEY_TOKEN_PARAM: &str = "token_param";
pub const ATTRIBUTE_KEY_TOKEN_PARAM_VALUE: &str = "token_param_value";
pub const ATTRIBUTE_KEY_TOKEN: &str = "token";

pub const ATTRIBUTE_VALUE_CATEGORY: &str = crate::keys::MODULE_NAME;
