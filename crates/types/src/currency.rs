//! Coin arithmetic.
//!
//! A [`Coin`] is a denomination paired with an arbitrary-precision amount and
//! [`Coins`] is the canonical multiset of coins: denominations unique, sorted
//! lexicographically, no zero entries. Every arithmetic result is rebuilt in
//! canonical form so that the serialised representation is independent of
//! input ordering.

use crate::denom::{validate_denom, DENOM_PATTERN};
use crate::errors::CoinsError;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

static COIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^([0-9]+)({DENOM_PATTERN})$")).expect("coin pattern compiles")
});

/// Signed arbitrary-precision integer amount, serialised as a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(BigInt);

impl Amount {
    pub fn zero() -> Self {
        Amount(BigInt::zero())
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

    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    pub fn into_bigint(self) -> BigInt {
        self.0
    }
}

impl From<BigInt> for Amount {
    fn from(value: BigInt) -> Self {
        Amount(value)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(BigInt::from(value))
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount(BigInt::from(value))
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Amount(BigInt::from(value))
    }
}

impl From<i32> for Amount {
    fn from(value: i32) -> Self {
        Amount(BigInt::from(value))
    }
}

impl<'a> Add<&'a Amount> for &'a Amount {
    type Output = Amount;

    fn add(self, other: &'a Amount) -> Amount {
        Amount(&self.0 + &other.0)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, other: Amount) -> Amount {
        Amount(self.0 + other.0)
    }
}

impl<'a> Sub<&'a Amount> for &'a Amount {
    type Output = Amount;

    fn sub(self, other: &'a Amount) -> Amount {
        Amount(&self.0 - &other.0)
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, other: Amount) -> Amount {
        Amount(self.0 - other.0)
    }
}

impl AddAssign<&Amount> for Amount {
    fn add_assign(&mut self, other: &Amount) {
        self.0 += &other.0;
    }
}

impl SubAssign<&Amount> for Amount {
    fn sub_assign(&mut self, other: &Amount) {
        self.0 -= &other.0;
    }
}

impl Neg for &Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount(-&self.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = CoinsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<BigInt>()
            .map(Amount)
            .map_err(|_| CoinsError::Parse(format!("amount {s:?}")))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A single denomination and amount.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: Amount,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: impl Into<Amount>) -> Self {
        Coin {
            denom: denom.into(),
            amount: amount.into(),
        }
    }

    pub fn zero(denom: impl Into<String>) -> Self {
        Coin::new(denom, Amount::zero())
    }

    /// Denomination must satisfy the grammar and the amount must not be negative.
    pub fn validate(&self) -> Result<(), CoinsError> {
        validate_denom(&self.denom)?;
        if self.amount.is_negative() {
            return Err(CoinsError::NegativeAmount(self.to_string()));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.amount.is_positive()
    }

    pub fn is_negative(&self) -> bool {
        self.amount.is_negative()
    }

    /// Amount comparison; callers compare coins of the same denomination.
    pub fn is_lt(&self, other: &Coin) -> bool {
        debug_assert_eq!(self.denom, other.denom);
        self.amount < other.amount
    }

    pub fn is_gte(&self, other: &Coin) -> bool {
        !self.is_lt(other)
    }

    pub fn checked_add(&self, other: &Coin) -> Result<Coin, CoinsError> {
        self.ensure_same_denom(other)?;
        Ok(Coin::new(self.denom.clone(), &self.amount + &other.amount))
    }

    /// Subtract `other`, failing if the result would be negative.
    pub fn checked_sub(&self, other: &Coin) -> Result<Coin, CoinsError> {
        self.ensure_same_denom(other)?;
        let amount = &self.amount - &other.amount;
        if amount.is_negative() {
            return Err(CoinsError::NegativeResult(format!("{self} - {other}")));
        }
        Ok(Coin::new(self.denom.clone(), amount))
    }

    fn ensure_same_denom(&self, other: &Coin) -> Result<(), CoinsError> {
        if self.denom != other.denom {
            return Err(CoinsError::DenomMismatch {
                left: self.denom.clone(),
                right: other.denom.clone(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for Coin {
    type Err = CoinsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = COIN_RE
            .captures(s.trim())
            .ok_or_else(|| CoinsError::Parse(format!("coin {s:?}")))?;
        Ok(Coin::new(&caps[2], caps[1].parse::<Amount>()?))
    }
}

/// Canonical set of coins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coins(Vec<Coin>);

impl Coins {
    pub fn empty() -> Self {
        Coins(Vec::new())
    }

    /// Build a canonical set: zero coins dropped, sorted by denom, every coin
    /// valid and no denomination repeated.
    pub fn new(coins: Vec<Coin>) -> Result<Self, CoinsError> {
        let mut kept: Vec<Coin> = coins.into_iter().filter(|c| !c.is_zero()).collect();
        kept.sort_by(|a, b| a.denom.cmp(&b.denom));
        for pair in kept.windows(2) {
            if pair[0].denom == pair[1].denom {
                return Err(CoinsError::DuplicateDenom(pair[0].denom.clone()));
            }
        }
        for coin in &kept {
            coin.validate()?;
        }
        Ok(Coins(kept))
    }

    /// A set holding one coin, or empty when the coin is zero.
    pub fn single(coin: Coin) -> Self {
        if coin.is_zero() {
            Coins::empty()
        } else {
            Coins(vec![coin])
        }
    }

    /// Strictly sorted, unique, valid denominations and positive amounts.
    pub fn validate(&self) -> Result<(), CoinsError> {
        for (i, coin) in self.0.iter().enumerate() {
            validate_denom(&coin.denom)?;
            if !coin.amount.is_positive() {
                return Err(CoinsError::NonPositive(coin.to_string()));
            }
            if i > 0 {
                let prev = &self.0[i - 1].denom;
                if *prev == coin.denom {
                    return Err(CoinsError::DuplicateDenom(coin.denom.clone()));
                }
                if *prev > coin.denom {
                    return Err(CoinsError::Unsorted(self.to_string()));
                }
            }
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coin> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Coin] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Coin> {
        self.0
    }

    pub fn denoms(&self) -> Vec<&str> {
        self.0.iter().map(|c| c.denom.as_str()).collect()
    }

    pub fn amount_of(&self, denom: &str) -> Amount {
        self.0
            .iter()
            .find(|c| c.denom == denom)
            .map(|c| c.amount.clone())
            .unwrap_or_default()
    }

    /// Union by denomination, summing amounts. Zero sums are dropped.
    pub fn add(&self, other: &Coins) -> Coins {
        let mut sums: BTreeMap<&str, Amount> = BTreeMap::new();
        for coin in self.0.iter().chain(other.0.iter()) {
            *sums.entry(coin.denom.as_str()).or_default() += &coin.amount;
        }
        Coins(
            sums.into_iter()
                .filter(|(_, amount)| !amount.is_zero())
                .map(|(denom, amount)| Coin::new(denom, amount))
                .collect(),
        )
    }

    pub fn add_coin(&self, coin: &Coin) -> Coins {
        self.add(&Coins(vec![coin.clone()]))
    }

    /// Subtract without failing. The flag reports whether any resulting
    /// amount is negative; the negative entries are kept in the result.
    pub fn safe_sub(&self, other: &Coins) -> (Coins, bool) {
        let diff = self.add(&other.negated());
        let negative = diff.is_any_negative();
        (diff, negative)
    }

    /// Subtract, failing if any resulting amount would be negative.
    pub fn sub(&self, other: &Coins) -> Result<Coins, CoinsError> {
        let (diff, negative) = self.safe_sub(other);
        if negative {
            return Err(CoinsError::NegativeResult(format!("{self} - {other}")));
        }
        Ok(diff)
    }

    /// True for the empty set and for sets whose entries are all zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(Coin::is_zero)
    }

    pub fn is_all_positive(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(Coin::is_positive)
    }

    pub fn is_any_negative(&self) -> bool {
        self.0.iter().any(Coin::is_negative)
    }

    /// Every denomination of `other` is covered by at least as much in `self`.
    /// Denominations present only in `self` are ignored.
    pub fn is_all_gte(&self, other: &Coins) -> bool {
        other
            .0
            .iter()
            .all(|coin| self.amount_of(&coin.denom) >= coin.amount)
    }

    fn negated(&self) -> Coins {
        Coins(
            self.0
                .iter()
                .map(|c| Coin::new(c.denom.clone(), -&c.amount))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Coins {
    type Item = &'a Coin;
    type IntoIter = std::slice::Iter<'a, Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Coins {
    type Item = Coin;
    type IntoIter = std::vec::IntoIter<Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Coins {
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

impl FromStr for Coins {
    type Err = CoinsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Coins::empty());
        }
        let coins = s
            .split(',')
            .map(str::parse::<Coin>)
            .collect::<Result<Vec<_>, _>>()?;
        Coins::new(coins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn coins(s: &str) -> Coins {
        s.parse().unwrap()
    }

    #[test]
    fn new_sorts_and_drops_zero() {
        let set = Coins::new(vec![
            Coin::new("stake", 5u64),
            Coin::new("btc", 10u64),
            Coin::new("eth", 0u64),
        ])
        .unwrap();
        assert_eq!(set.to_string(), "10btc,5stake");
        assert!(set.is_valid());
    }

    #[test]
    fn new_rejects_duplicates_and_negatives() {
        let dup = Coins::new(vec![Coin::new("btc", 1u64), Coin::new("btc", 2u64)]);
        assert_eq!(dup, Err(CoinsError::DuplicateDenom("btc".into())));

        let neg = Coins::new(vec![Coin::new("btc", -1i64)]);
        assert!(matches!(neg, Err(CoinsError::NegativeAmount(_))));
    }

    #[test]
    fn validate_catches_non_canonical_input() {
        let raw: Coins = serde_json::from_str(
            r#"[{"denom":"stake","amount":"1"},{"denom":"btc","amount":"1"}]"#,
        )
        .unwrap();
        assert!(matches!(raw.validate(), Err(CoinsError::Unsorted(_))));

        let zero: Coins = serde_json::from_str(r#"[{"denom":"btc","amount":"0"}]"#).unwrap();
        assert!(!zero.is_valid());
    }

    #[test]
    fn add_and_sub() {
        let a = coins("10btc,5stake");
        let b = coins("3btc,7eth");
        assert_eq!(a.add(&b).to_string(), "13btc,7eth,5stake");
        assert_eq!(a.sub(&coins("10btc")).unwrap().to_string(), "5stake");
        assert!(a.sub(&b).is_err());
    }

    #[test]
    fn safe_sub_reports_negative() {
        let (diff, negative) = coins("10btc").safe_sub(&coins("4btc,1eth"));
        assert!(negative);
        assert_eq!(diff.amount_of("btc"), Amount::from(6u64));
        assert_eq!(diff.amount_of("eth"), Amount::from(-1i64));

        let (diff, negative) = coins("10btc").safe_sub(&coins("10btc"));
        assert!(!negative);
        assert!(diff.is_empty());
    }

    #[test]
    fn is_all_gte_is_elementwise() {
        let a = coins("10btc,5stake");
        assert!(a.is_all_gte(&coins("10btc")));
        assert!(a.is_all_gte(&Coins::empty()));
        assert!(!a.is_all_gte(&coins("1eth")));
        assert!(!coins("1btc").is_all_gte(&coins("2btc")));
        // neither set dominates the other
        assert!(!coins("5btc").is_all_gte(&coins("1eth")));
        assert!(!coins("1eth").is_all_gte(&coins("5btc")));
    }

    #[test]
    fn coin_checked_ops() {
        let a = Coin::new("btc", 5u64);
        assert_eq!(a.checked_add(&a).unwrap(), Coin::new("btc", 10u64));
        assert!(a.checked_sub(&Coin::new("btc", 6u64)).is_err());
        assert!(matches!(
            a.checked_add(&Coin::new("eth", 1u64)),
            Err(CoinsError::DenomMismatch { .. })
        ));
    }

    #[test]
    fn amounts_serialize_as_strings() {
        let coin = Coin::new("btc", 100u64);
        assert_eq!(
            serde_json::to_string(&coin).unwrap(),
            r#"{"denom":"btc","amount":"100"}"#
        );
    }

    #[test]
    fn huge_amounts_survive() {
        let big: Amount = "340282366920938463463374607431768211456000".parse().unwrap();
        let set = Coins::single(Coin::new("btc", big.clone()));
        assert_eq!(set.add(&set).amount_of("btc"), &big + &big);
    }

    proptest! {
        #[test]
        fn add_is_order_independent(
            a in proptest::collection::vec(("[a-c]{3}", 1u64..1_000), 0..6),
            b in proptest::collection::vec(("[a-c]{3}", 1u64..1_000), 0..6),
        ) {
            let left = a.iter().fold(Coins::empty(), |acc, (d, n)| acc.add_coin(&Coin::new(d.clone(), *n)));
            let right = b.iter().fold(Coins::empty(), |acc, (d, n)| acc.add_coin(&Coin::new(d.clone(), *n)));
            prop_assert_eq!(left.add(&right), right.add(&left));
            prop_assert!(left.add(&right).is_valid());
            prop_assert_eq!(left.add(&right).sub(&right).unwrap(), left);
        }
    }
}
