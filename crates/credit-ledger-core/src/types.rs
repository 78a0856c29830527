//! Strong type definitions for the credit ledger.
//!
//! Quantities and instants are newtypes so an amount can never be passed
//! where a timestamp is expected. Single amounts are `u64`; sums of them are
//! [`Balance`], which is wide enough that adding up every bucket in a log
//! cannot overflow.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;

/// A non-negative quantity of credit carried by one grant or spend.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(pub u64);

impl Amount {
    /// The empty amount.
    pub const ZERO: Self = Self(0);

    /// Create an amount from a raw quantity.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw quantity.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Whether this amount is zero.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Subtract, clamping at zero.
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({})", self.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Amount> for u64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// A sum of amounts, such as the unexpired credit at some instant.
///
/// Each term is at most `u64::MAX` and a log holds fewer than `2^64`
/// buckets, so the total always fits.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Balance(pub u128);

impl Balance {
    /// The empty balance.
    pub const ZERO: Self = Self(0);

    /// Get the raw total.
    pub const fn get(self) -> u128 {
        self.0
    }

    /// Whether nothing is left.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Add one amount.
    pub const fn credit(self, amount: Amount) -> Self {
        Self(self.0 + amount.0 as u128)
    }
}

impl fmt::Debug for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Balance({})", self.0)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Amount> for Balance {
    fn from(amount: Amount) -> Self {
        Self(u128::from(amount.0))
    }
}

impl From<Balance> for u128 {
    fn from(balance: Balance) -> Self {
        balance.0
    }
}

impl PartialEq<Amount> for Balance {
    fn eq(&self, other: &Amount) -> bool {
        self.0 == u128::from(other.0)
    }
}

impl PartialEq<Balance> for Amount {
    fn eq(&self, other: &Balance) -> bool {
        other == self
    }
}

impl PartialOrd<Amount> for Balance {
    fn partial_cmp(&self, other: &Amount) -> Option<std::cmp::Ordering> {
        self.0.partial_cmp(&u128::from(other.0))
    }
}

impl Sum<Amount> for Balance {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Balance::ZERO, Balance::credit)
    }
}

impl<'a> Sum<&'a Amount> for Balance {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// A logical instant on the ledger's timeline.
///
/// Only the ordering matters; there is no wall-clock or timezone meaning.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// The earliest representable instant.
    pub const MIN: Self = Self(i64::MIN);

    /// The latest representable instant.
    pub const MAX: Self = Self(i64::MAX);

    /// Create a timestamp from raw epoch units.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw epoch units.
    pub const fn get(self) -> i64 {
        self.0
    }

    /// The instant immediately before this one, clamped at [`Timestamp::MIN`].
    pub const fn pred(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.0)
    }
}

impl From<i64> for Timestamp {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Timestamp> for i64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

/// Opaque caller-supplied label for a grant.
///
/// Never consulted by balance reconstruction; it is carried so callers can
/// match surviving credit back to their own records. Uniqueness is not
/// enforced.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantId(pub String);

impl GrantId {
    /// Create a grant id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the underlying label.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for GrantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GrantId({})", self.0)
    }
}

impl fmt::Display for GrantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GrantId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for GrantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
