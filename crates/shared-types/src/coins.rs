//! # Coin Set Arithmetic
//!
//! Denomination-keyed, non-negative amount sets used for fees and
//! transfers. All operations are denomination-wise and exact: subtraction
//! refuses to go below zero and addition refuses to wrap, both surfaced
//! as [`CoinError`] rather than silent saturation.
//!
//! Amounts are `U256`, matching the amount width used across subsystems.

use crate::entities::U256;
use crate::errors::CoinError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum denomination length accepted by [`CoinSet::validate_denoms`].
pub const MAX_DENOM_LENGTH: usize = 128;

/// A set of coins keyed by denomination.
///
/// INVARIANTS:
/// - Every stored amount is strictly positive (zero entries are
///   normalized away on insertion and subtraction).
/// - Denominations are unique (map keys).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CoinSet {
    coins: BTreeMap<String, U256>,
}

impl CoinSet {
    /// Creates an empty coin set.
    pub fn new() -> Self {
        Self {
            coins: BTreeMap::new(),
        }
    }

    /// Adds an amount of a denomination, consuming and returning the set.
    ///
    /// Zero amounts are ignored. Amounts for an existing denomination
    /// accumulate (saturating only in the sense that this builder is for
    /// test and genesis fixtures; arithmetic paths use [`checked_add`]).
    ///
    /// [`checked_add`]: CoinSet::checked_add
    pub fn with(mut self, denom: &str, amount: impl Into<U256>) -> Self {
        let amount = amount.into();
        if !amount.is_zero() {
            let entry = self.coins.entry(denom.to_string()).or_insert_with(U256::zero);
            *entry += amount;
        }
        self
    }

    /// Returns the amount held for a denomination (zero if absent).
    pub fn amount_of(&self, denom: &str) -> U256 {
        self.coins.get(denom).copied().unwrap_or_else(U256::zero)
    }

    /// Returns true if the set holds no coins.
    pub fn is_zero(&self) -> bool {
        self.coins.is_empty()
    }

    /// Returns the number of denominations held.
    pub fn len(&self) -> usize {
        self.coins.len()
    }

    /// Returns true if the set holds no denominations.
    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    /// Iterates over `(denomination, amount)` pairs in denomination order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, U256)> + '_ {
        self.coins.iter().map(|(d, a)| (d.as_str(), *a))
    }

    /// Denomination-wise addition.
    ///
    /// # Errors
    /// `CoinError::Overflow` if any denomination exceeds the 256-bit range.
    pub fn checked_add(&self, other: &CoinSet) -> Result<CoinSet, CoinError> {
        let mut result = self.coins.clone();
        for (denom, amount) in &other.coins {
            let current = result.get(denom).copied().unwrap_or_else(U256::zero);
            let sum = current
                .checked_add(*amount)
                .ok_or_else(|| CoinError::Overflow {
                    denom: denom.clone(),
                })?;
            result.insert(denom.clone(), sum);
        }
        Ok(CoinSet { coins: result })
    }

    /// Denomination-wise subtraction.
    ///
    /// # Errors
    /// `CoinError::Underflow` if any denomination in `other` exceeds the
    /// amount held here. The result never contains a negative or zero
    /// entry.
    pub fn checked_sub(&self, other: &CoinSet) -> Result<CoinSet, CoinError> {
        let mut result = self.coins.clone();
        for (denom, amount) in &other.coins {
            let available = result.get(denom).copied().unwrap_or_else(U256::zero);
            if *amount > available {
                return Err(CoinError::Underflow {
                    denom: denom.clone(),
                    available: available.to_string(),
                    required: amount.to_string(),
                });
            }
            let remaining = available - amount;
            if remaining.is_zero() {
                result.remove(denom);
            } else {
                result.insert(denom.clone(), remaining);
            }
        }
        Ok(CoinSet { coins: result })
    }

    /// Returns the set with every amount halved, rounding down.
    ///
    /// Denominations that round to zero are dropped.
    pub fn halved(&self) -> CoinSet {
        let coins = self
            .coins
            .iter()
            .map(|(d, a)| (d.clone(), *a / U256::from(2u8)))
            .filter(|(_, a)| !a.is_zero())
            .collect();
        CoinSet { coins }
    }

    /// Returns true if, for at least one denomination present in
    /// `required`, this set holds an amount greater than or equal to the
    /// required amount.
    ///
    /// An empty `required` set yields false: there is no denomination to
    /// satisfy.
    pub fn is_any_gte(&self, required: &CoinSet) -> bool {
        required
            .coins
            .iter()
            .any(|(denom, amount)| self.amount_of(denom) >= *amount)
    }

    /// Validates every denomination: leading ASCII letter, then letters,
    /// digits, or `/ : . _ -`, length capped at [`MAX_DENOM_LENGTH`].
    pub fn validate_denoms(&self) -> Result<(), CoinError> {
        for denom in self.coins.keys() {
            let mut chars = denom.chars();
            let head_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
            let tail_ok = chars.all(|c| {
                c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-')
            });
            if denom.len() < 3 || denom.len() > MAX_DENOM_LENGTH || !head_ok || !tail_ok {
                return Err(CoinError::InvalidDenom {
                    denom: denom.clone(),
                });
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for CoinSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (denom, amount) in &self.coins {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{}{}", amount, denom)?;
            first = false;
        }
        Ok(())
    }
}
