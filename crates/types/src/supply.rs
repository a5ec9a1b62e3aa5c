//! Supply records: per-denomination totals and their aggregate.

use crate::currency::{Coin, Coins};
use crate::errors::CoinsError;
use serde::{Deserialize, Serialize};

/// Outstanding amount of one denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supply {
    pub total: Coin,
}

impl Supply {
    pub fn new(total: Coin) -> Self {
        Supply { total }
    }

    pub fn zero(denom: &str) -> Self {
        Supply::new(Coin::zero(denom))
    }

    pub fn denom(&self) -> &str {
        &self.total.denom
    }

    pub fn inflate(&mut self, amount: &Coin) -> Result<(), CoinsError> {
        self.total = self.total.checked_add(amount)?;
        Ok(())
    }

    /// Fails when the supply would go negative.
    pub fn deflate(&mut self, amount: &Coin) -> Result<(), CoinsError> {
        self.total = self.total.checked_sub(amount)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), CoinsError> {
        self.total.validate()
    }
}

/// Aggregate supply across all denominations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Supplies {
    pub total: Coins,
}

impl Supplies {
    pub fn new(total: Coins) -> Self {
        Supplies { total }
    }

    pub fn inflate(&mut self, amount: &Coins) {
        self.total = self.total.add(amount);
    }

    pub fn deflate(&mut self, amount: &Coins) -> Result<(), CoinsError> {
        self.total = self.total.sub(amount)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), CoinsError> {
        self.total.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inflate_then_deflate() {
        let mut supply = Supply::zero("btc");
        supply.inflate(&Coin::new("btc", 100u64)).unwrap();
        supply.deflate(&Coin::new("btc", 40u64)).unwrap();
        assert_eq!(supply.total, Coin::new("btc", 60u64));
        assert!(supply.deflate(&Coin::new("btc", 61u64)).is_err());
        assert!(supply.inflate(&Coin::new("eth", 1u64)).is_err());
    }

    #[test]
    fn aggregate_tracks_denoms() {
        let mut supplies = Supplies::default();
        supplies.inflate(&"10btc,5stake".parse().unwrap());
        supplies.deflate(&"5stake".parse().unwrap()).unwrap();
        assert_eq!(supplies.total.to_string(), "10btc");
        assert!(supplies.validate().is_ok());
    }
}
