//! Human-readable currency amounts.
//!
//! Amounts arrive as query-string text in whole-coin units (`"7.6"` SOL) and
//! must become an integer count of the chain's smallest unit. The conversion
//! is done in fixed-point decimal so `7.6` becomes exactly
//! `7_600_000_000` lamports; amounts finer than one base unit are rejected
//! rather than rounded.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Largest scale a `Decimal` holds; longer fractions get rounded on parse.
const MAX_SCALE: i64 = 28;

/// Reasons an amount is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// No amount was supplied, or it was empty.
    #[error("Missing 'amount' parameter")]
    Missing,
    /// The text is not a finite decimal number.
    #[error("Invalid 'amount' parameter: {0:?} is not a number")]
    NotANumber(String),
    /// Zero or negative.
    #[error("Invalid 'amount' parameter: must be greater than zero")]
    NotPositive,
    /// Has digits below the smallest on-chain unit.
    #[error("Invalid 'amount' parameter: more precise than the smallest unit")]
    TooPrecise,
    /// Does not fit a 64-bit base-unit count.
    #[error("Invalid 'amount' parameter: too large")]
    Overflow,
}

/// A strictly positive amount of coin, in whole-coin units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CoinAmount(Decimal);

impl CoinAmount {
    /// Builds an amount of `mantissa × 10^-scale` coins.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::NotPositive`] for zero or negative values, and
    /// [`AmountError::Overflow`] if `scale` exceeds decimal precision.
    pub fn try_new(mantissa: i64, scale: u32) -> Result<Self, AmountError> {
        let value = Decimal::try_new(mantissa, scale).map_err(|_| AmountError::Overflow)?;
        Self::from_decimal(value)
    }

    /// Parses an optional query value, treating absence and the empty string
    /// the same way.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::Missing`] when no value is present, otherwise
    /// whatever [`CoinAmount::from_str`] returns.
    pub fn from_query(value: Option<&str>) -> Result<Self, AmountError> {
        match value.map(str::trim) {
            None | Some("") => Err(AmountError::Missing),
            Some(text) => text.parse(),
        }
    }

    fn from_decimal(value: Decimal) -> Result<Self, AmountError> {
        if value <= Decimal::ZERO {
            return Err(AmountError::NotPositive);
        }
        Ok(Self(value.normalize()))
    }

    /// Converts to an integer count of base units given how many base units
    /// make one coin (e.g. `1_000_000_000` lamports per SOL).
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::TooPrecise`] if the result has a fractional
    /// part, or [`AmountError::Overflow`] if it does not fit in a `u64`.
    pub fn to_base_units(&self, units_per_coin: u64) -> Result<u64, AmountError> {
        let units = self
            .0
            .checked_mul(Decimal::from(units_per_coin))
            .ok_or(AmountError::Overflow)?;
        if !units.fract().is_zero() {
            return Err(AmountError::TooPrecise);
        }
        units.to_u64().ok_or(AmountError::Overflow)
    }
}

impl FromStr for CoinAmount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let not_a_number = || AmountError::NotANumber(text.to_owned());
        // rust_decimal accepts digit separators, query amounts never carry them
        if text.is_empty() || text.contains('_') {
            return Err(not_a_number());
        }
        if fractional_digits(text).is_some_and(|digits| digits > MAX_SCALE) {
            return Err(AmountError::TooPrecise);
        }
        let value = Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .map_err(|_| not_a_number())?;
        Self::from_decimal(value)
    }
}

/// Significant digits after the decimal point once any exponent is applied.
/// `None` when the text is not shaped like a number.
fn fractional_digits(text: &str) -> Option<i64> {
    let numeric = text
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !numeric {
        return None;
    }
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(i) => (&text[..i], text[i + 1..].parse::<i64>().ok()?),
        None => (text, 0),
    };
    let fraction = mantissa.split_once('.').map_or("", |(_, f)| f);
    let digits = i64::try_from(fraction.trim_end_matches('0').len()).ok()?;
    Some(digits.saturating_sub(exponent))
}

impl TryFrom<String> for CoinAmount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CoinAmount> for String {
    fn from(value: CoinAmount) -> Self {
        value.to_string()
    }
}

impl Display for CoinAmount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}
