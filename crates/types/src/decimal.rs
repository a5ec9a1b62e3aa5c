//! Fixed-point decimals used by the community pool tally.

use crate::currency::{Amount, Coin, Coins};
use crate::denom::validate_denom;
use crate::errors::CoinsError;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Number of fractional digits carried by [`Dec`]. Also the upper bound on
/// denomination metadata decimals.
pub const PRECISION: u32 = 18;

static SCALE: Lazy<BigInt> = Lazy::new(|| num_traits::pow(BigInt::from(10u32), PRECISION as usize));

/// Signed decimal with [`PRECISION`] fractional digits, stored as a scaled integer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Dec(BigInt);

impl Dec {
    pub fn zero() -> Self {
        Dec(BigInt::zero())
    }

    pub fn from_amount(amount: &Amount) -> Self {
        Dec(amount.as_bigint() * &*SCALE)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    /// Integral part, rounding toward zero.
    pub fn truncate(&self) -> Amount {
        Amount::from(&self.0 / &*SCALE)
    }

    pub fn add(&self, other: &Dec) -> Dec {
        Dec(&self.0 + &other.0)
    }

    pub fn sub(&self, other: &Dec) -> Dec {
        Dec(&self.0 - &other.0)
    }

    pub fn neg(&self) -> Dec {
        Dec(-&self.0)
    }
}

impl From<&Amount> for Dec {
    fn from(amount: &Amount) -> Self {
        Dec::from_amount(amount)
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0.is_negative() { "-" } else { "" };
        let abs = self.0.abs();
        let integral = &abs / &*SCALE;
        let fraction = &abs % &*SCALE;
        write!(
            f,
            "{sign}{integral}.{fraction:0>width$}",
            fraction = fraction.to_string(),
            width = PRECISION as usize
        )
    }
}

impl FromStr for Dec {
    type Err = CoinsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || CoinsError::Parse(format!("decimal {s:?}"));
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (integral, fraction) = body.split_once('.').unwrap_or((body, ""));
        if integral.is_empty()
            || fraction.len() > PRECISION as usize
            || !integral.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(err());
        }
        let digits = format!("{integral}{fraction:0<width$}", width = PRECISION as usize);
        let value: BigInt = digits.parse().map_err(|_| err())?;
        Ok(Dec(if negative { -value } else { value }))
    }
}

impl Serialize for Dec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecCoin {
    pub denom: String,
    pub amount: Dec,
}

impl DecCoin {
    pub fn new(denom: impl Into<String>, amount: Dec) -> Self {
        DecCoin {
            denom: denom.into(),
            amount,
        }
    }

    pub fn from_coin(coin: &Coin) -> Self {
        DecCoin::new(coin.denom.clone(), Dec::from_amount(&coin.amount))
    }

    /// Split into the integral coin and the fractional change.
    pub fn truncate_decimal(&self) -> (Coin, DecCoin) {
        let truncated = self.amount.truncate();
        let change = self.amount.sub(&Dec::from_amount(&truncated));
        (
            Coin::new(self.denom.clone(), truncated),
            DecCoin::new(self.denom.clone(), change),
        )
    }
}

impl fmt::Display for DecCoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Canonical set of decimal coins: sorted, unique denominations, no zeros.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecCoins(Vec<DecCoin>);

impl DecCoins {
    pub fn empty() -> Self {
        DecCoins(Vec::new())
    }

    pub fn from_coins(coins: &Coins) -> Self {
        DecCoins(coins.iter().map(DecCoin::from_coin).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DecCoin> {
        self.0.iter()
    }

    pub fn amount_of(&self, denom: &str) -> Dec {
        self.0
            .iter()
            .find(|c| c.denom == denom)
            .map(|c| c.amount.clone())
            .unwrap_or_default()
    }

    pub fn add(&self, other: &DecCoins) -> DecCoins {
        let mut sums: BTreeMap<&str, Dec> = BTreeMap::new();
        for coin in self.0.iter().chain(other.0.iter()) {
            let entry = sums.entry(coin.denom.as_str()).or_default();
            *entry = entry.add(&coin.amount);
        }
        DecCoins(
            sums.into_iter()
                .filter(|(_, amount)| !amount.is_zero())
                .map(|(denom, amount)| DecCoin::new(denom, amount))
                .collect(),
        )
    }

    /// Subtract, reporting whether any resulting amount is negative.
    pub fn safe_sub(&self, other: &DecCoins) -> (DecCoins, bool) {
        let negated = DecCoins(
            other
                .0
                .iter()
                .map(|c| DecCoin::new(c.denom.clone(), c.amount.neg()))
                .collect(),
        );
        let diff = self.add(&negated);
        let negative = diff.is_any_negative();
        (diff, negative)
    }

    pub fn is_any_negative(&self) -> bool {
        self.0.iter().any(|c| c.amount.is_negative())
    }

    /// Integral coins plus the remaining fractional change.
    pub fn truncate_decimal(&self) -> (Coins, DecCoins) {
        let mut truncated = Coins::empty();
        let mut change = DecCoins::empty();
        for coin in &self.0 {
            let (whole, rest) = coin.truncate_decimal();
            truncated = truncated.add_coin(&whole);
            change = change.add(&DecCoins(vec![rest]));
        }
        (truncated, change)
    }

    pub fn validate(&self) -> Result<(), CoinsError> {
        for (i, coin) in self.0.iter().enumerate() {
            validate_denom(&coin.denom)?;
            if !coin.amount.is_positive() {
                return Err(CoinsError::NonPositive(coin.to_string()));
            }
            if i > 0 && self.0[i - 1].denom >= coin.denom {
                return Err(CoinsError::Unsorted(self.to_string()));
            }
        }
        Ok(())
    }
}

impl fmt::Display for DecCoins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, coin) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{coin}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse() {
        let dec: Dec = "12.5".parse().unwrap();
        assert_eq!(dec.to_string(), "12.500000000000000000");
        assert_eq!(dec.truncate(), Amount::from(12u64));

        let neg: Dec = "-0.000000000000000001".parse().unwrap();
        assert!(neg.is_negative());
        assert_eq!(neg.to_string(), "-0.000000000000000001");

        assert!("1.0000000000000000001".parse::<Dec>().is_err());
        assert!(".5".parse::<Dec>().is_err());
    }

    #[test]
    fn from_coins_then_truncate_is_lossless() {
        let coins: Coins = "10btc,7stake".parse().unwrap();
        let (whole, change) = DecCoins::from_coins(&coins).truncate_decimal();
        assert_eq!(whole, coins);
        assert!(change.is_empty());
    }

    #[test]
    fn truncate_keeps_fractional_change() {
        let pool = DecCoins::from_coins(&"3btc".parse().unwrap())
            .add(&DecCoins(vec![DecCoin::new("btc", "0.25".parse().unwrap())]));
        let (whole, change) = pool.truncate_decimal();
        assert_eq!(whole.to_string(), "3btc");
        assert_eq!(change.amount_of("btc"), "0.25".parse::<Dec>().unwrap());
    }

    #[test]
    fn safe_sub_flags_negative() {
        let pool = DecCoins::from_coins(&"5btc".parse().unwrap());
        let (_, negative) = pool.safe_sub(&DecCoins::from_coins(&"6btc".parse().unwrap()));
        assert!(negative);
        let (rest, negative) = pool.safe_sub(&DecCoins::from_coins(&"5btc".parse().unwrap()));
        assert!(!negative);
        assert!(rest.is_empty());
    }
}
