//! Token messages.

use crate::errors::{Result, TokenError};
use crate::keys::{ROUTER_KEY, TYPE_MSG_BURN_TOKEN, TYPE_MSG_INFLATE_TOKEN, TYPE_MSG_NEW_TOKEN};
use ledger_types::{Address, Coin, PRECISION};
use serde::{Deserialize, Serialize};

/// A signed state transition request.
pub trait Msg: Serialize {
    fn route(&self) -> &'static str;
    fn type_name(&self) -> &'static str;
    /// Stateless checks, run before any store access.
    fn validate_basic(&self) -> Result<()>;
    fn signers(&self) -> Result<Vec<Address>>;

    /// Canonical JSON with object keys sorted.
    fn sign_bytes(&self) -> Result<Vec<u8>> {
        let value = serde_json::to_value(self)?;
        Ok(serde_json::to_vec(&value)?)
    }
}

fn validate_address(role: &str, address: &str) -> Result<Address> {
    address
        .parse()
        .map_err(|e| TokenError::InvalidAddress(format!("invalid {role} address ({e})")))
}

fn validate_amount(amount: &Coin) -> Result<()> {
    if !amount.is_valid() || !amount.is_positive() {
        return Err(TokenError::InvalidCoins(amount.to_string()));
    }
    Ok(())
}

/// Create denomination `amount.denom`, paying the issue fee from `from_address`
/// and crediting `amount` to `to_address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgNewToken {
    pub from_address: String,
    pub to_address: String,
    pub decimals: u32,
    pub amount: Coin,
}

impl MsgNewToken {
    pub fn new(from: &Address, to: &Address, decimals: u32, amount: Coin) -> Self {
        Self {
            from_address: from.to_string(),
            to_address: to.to_string(),
            decimals,
            amount,
        }
    }
}

impl Msg for MsgNewToken {
    fn route(&self) -> &'static str {
        ROUTER_KEY
    }

    fn type_name(&self) -> &'static str {
        TYPE_MSG_NEW_TOKEN
    }

    fn validate_basic(&self) -> Result<()> {
        validate_address("sender", &self.from_address)?;
        validate_address("recipient", &self.to_address)?;
        validate_amount(&self.amount)?;
        if self.decimals > PRECISION {
            return Err(TokenError::DecimalsOverflow(format!(
                "overflow decimals ({})",
                self.decimals
            )));
        }
        Ok(())
    }

    fn signers(&self) -> Result<Vec<Address>> {
        Ok(vec![self.from_address.parse()?])
    }
}

/// Mint more of an existing denomination. Only its issuer may send this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgInflateToken {
    pub from_address: String,
    pub to_address: String,
    pub amount: Coin,
}

impl MsgInflateToken {
    pub fn new(from: &Address, to: &Address, amount: Coin) -> Self {
        Self {
            from_address: from.to_string(),
            to_address: to.to_string(),
            amount,
        }
    }
}

impl Msg for MsgInflateToken {
    fn route(&self) -> &'static str {
        ROUTER_KEY
    }

    fn type_name(&self) -> &'static str {
        TYPE_MSG_INFLATE_TOKEN
    }

    fn validate_basic(&self) -> Result<()> {
        validate_address("sender", &self.from_address)?;
        validate_address("recipient", &self.to_address)?;
        validate_amount(&self.amount)
    }

    fn signers(&self) -> Result<Vec<Address>> {
        Ok(vec![self.from_address.parse()?])
    }
}

/// Destroy part of the sender's own balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgBurnToken {
    pub from_address: String,
    pub amount: Coin,
}

impl MsgBurnToken {
    pub fn new(from: &Address, amount: Coin) -> Self {
        Self {
            from_address: from.to_string(),
            amount,
        }
    }
}

impl Msg for MsgBurnToken {
    fn route(&self) -> &'static str {
        ROUTER_KEY
    }

    fn type_name(&self) -> &'static str {
        TYPE_MSG_BURN_TOKEN
    }

    fn validate_basic(&self) -> Result<()> {
        validate_address("sender", &self.from_address)?;
        validate_amount(&self.amount)
    }

    fn signers(&self) -> Result<Vec<Address>> {
        Ok(vec![self.from_address.parse()?])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TokenMsg {
    NewToken(MsgNewToken),
    InflateToken(MsgInflateToken),
    BurnToken(MsgBurnToken),
}

impl Msg for TokenMsg {
    fn route(&self) -> &'static str {
        ROUTER_KEY
    }

    fn type_name(&self) -> &'static str {
        match self {
            TokenMsg::NewToken(msg) => msg.type_name(),
            TokenMsg::InflateToken(msg) => msg.type_name(),
            TokenMsg::BurnToken(msg) => msg.type_name(),
        }
    }

    fn validate_basic(&self) -> Result<()> {
        match self {
            TokenMsg::NewToken(msg) => msg.validate_basic(),
            TokenMsg::InflateToken(msg) => msg.validate_basic(),
            TokenMsg::BurnToken(msg) => msg.validate_basic(),
        }
    }

    fn signers(&self) -> Result<Vec<Address>> {
        match self {
            TokenMsg::NewToken(msg) => msg.signers(),
            TokenMsg::InflateToken(msg) => msg.signers(),
            TokenMsg::BurnToken(msg) => msg.signers(),
        }
    }

    fn sign_bytes(&self) -> Result<Vec<u8>> {
        match self {
            TokenMsg::NewToken(msg) => msg.sign_bytes(),
            TokenMsg::InflateToken(msg) => msg.sign_bytes(),
            TokenMsg::BurnToken(msg) => msg.sign_bytes(),
        }
    }
}
