//! Money type for representing currency amounts
//!
//! Wraps an exact decimal that always carries two fractional digits, so
//! repeated parsing and summing never drifts by a cent the way binary floats do.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of fractional digits every amount is quantized to
pub const MONEY_SCALE: u32 = 2;

/// A monetary amount with exactly two decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense_tracker::models::Money;
    /// let amount = Money::from_cents(1050);
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, MONEY_SCALE))
    }

    /// Create a Money amount from any decimal, rounding half to even
    ///
    /// Fails when the value is too large to carry two decimal places.
    pub fn from_decimal(value: Decimal) -> Result<Self, MoneyParseError> {
        let mut quantized =
            value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven);
        quantized.rescale(MONEY_SCALE);
        if quantized.scale() != MONEY_SCALE {
            return Err(MoneyParseError::OutOfRange(value.to_string()));
        }
        if quantized.is_zero() {
            quantized.set_sign_positive(true);
        }
        Ok(Self(quantized))
    }

    /// Create a zero Money amount
    pub fn zero() -> Self {
        Self(Decimal::new(0, MONEY_SCALE))
    }

    /// Get the underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Add two amounts, or `None` if the sum cannot carry two decimal places
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0
            .checked_add(other.0)
            .filter(|sum| sum.scale() == MONEY_SCALE)
            .map(Self)
    }

    /// Sum amounts, or `None` on overflow
    pub fn checked_sum<I: IntoIterator<Item = Self>>(amounts: I) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Self::zero(), |acc, m| acc.checked_add(m))
    }

    /// Check if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Parse a money amount from user input
    ///
    /// Accepts plain decimals ("10", "-3.5", "12.345") and scientific notation
    /// ("1.5e2"). The result is rounded half to even to two decimal places;
    /// values too large to keep both digits are out of range.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let value = match Decimal::from_str(s) {
            Ok(value) => value,
            Err(_) => parse_scientific(s)?,
        };

        Self::from_decimal(value)
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}", symbol, self.0.abs())
        } else {
            format!("{}{}", symbol, self.0)
        }
    }
}

/// Parse `<mantissa>e<exponent>`
///
/// Exponents too negative for a decimal are divided down step by step, so
/// tiny values round to zero instead of being rejected.
fn parse_scientific(s: &str) -> Result<Decimal, MoneyParseError> {
    if let Ok(value) = Decimal::from_scientific(s) {
        return Ok(value);
    }

    let invalid = || MoneyParseError::InvalidFormat(s.to_string());
    let (mantissa, exponent) = s.split_once(['e', 'E']).ok_or_else(invalid)?;
    let mut value = Decimal::from_str(mantissa).map_err(|_| invalid())?;
    let exponent: i64 = exponent.parse().map_err(|_| invalid())?;

    if exponent >= 0 {
        return Err(MoneyParseError::OutOfRange(s.to_string()));
    }

    for _ in exponent..0 {
        if value.is_zero() {
            break;
        }
        value = value
            .checked_div(Decimal::TEN)
            .ok_or_else(|| MoneyParseError::OutOfRange(s.to_string()))?;
    }

    Ok(value)
}

/// Parse and quantize an amount typed by the user
pub fn parse_amount(s: &str) -> Result<Money, MoneyParseError> {
    Money::parse(s)
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    Empty,
    InvalidFormat(String),
    /// Too large to hold with two decimal places
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Empty => write!(f, "Amount is required"),
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
