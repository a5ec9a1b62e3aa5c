pub const EVENT_TYPE_TRANSFER: &str = "transfer";
pub const EVENT_TYPE_COIN_SPENT: &str = "coin_spent";
pub const EVENT_TYPE_COIN_RECEIVED: &str = "coin_received";
pub const EVENT_TYPE_MINT: &str = "mint";
pub const EVENT_TYPE_BURN: &str = "burn";
pub const EVENT_TYPE_MESSAGE: &str = "message";

pub const ATTRIBUTE_KEY_RECIPIENT: &str = "recipient";
pub const ATTRIBUTE_KEY_SENDER: &str = "sender";
pub const ATTRIBUTE_KEY_SPENDER: &str = "spender";
pub const ATTRIBUTE_KEY_RECEIVER: &str = "receiver";
pub const ATTRIBUTE_KEY_MINTER: &str = "minter";
pub const ATTRIBUTE_KEY_BURNER: &str = "burner";
pub const ATTRIBUTE_KEY_AMOUNT: &str = "amount";
pub const ATTRIBUTE_KEY_MODULE: &str = "module";
