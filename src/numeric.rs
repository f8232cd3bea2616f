//! Numeric wire values

use std::fmt;

use rust_decimal::{Decimal, prelude::FromPrimitive};
use serde::Deserialize;

/// A number as it arrives from the storefront API or a fixture file.
///
/// Upstream payloads are loosely typed, so a field may hold either a number
/// or a string such as `"58,430.50"`. Anything else (booleans, arrays,
/// objects) is kept as [`Numeric::Other`] and never parses as a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    /// A plain number.
    Number(f64),

    /// A number encoded as text.
    Text(String),

    /// Any other value.
    Other(serde_json::Value),
}

impl Numeric {
    /// Parses the value as a decimal without any separator handling.
    ///
    /// Returns `None` for non-finite numbers and unparsable text.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Numeric::Number(value) => decimal_from_f64(*value),
            Numeric::Text(text) => parse_decimal(text),
            Numeric::Other(_) => None,
        }
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Numeric::Number(value)
    }
}

impl From<&str> for Numeric {
    fn from(value: &str) -> Self {
        Numeric::Text(value.to_string())
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Number(value) => write!(f, "{value}"),
            Numeric::Text(text) => f.write_str(text),
            Numeric::Other(value) => write!(f, "{value}"),
        }
    }
}

/// Converts a float, rejecting NaN and infinities.
///
/// Finite values beyond the decimal range saturate to [`Decimal::MAX`] or
/// [`Decimal::MIN`].
pub(crate) fn decimal_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }

    Decimal::from_f64(value).or_else(|| {
        (value.abs() > 1.0).then_some(if value.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
    })
}

/// Parses plain (`"12.5"`) or scientific (`"1.25e1"`) notation.
pub(crate) fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();

    if text.is_empty() {
        return None;
    }

    text.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(text).ok())
}

/// Coerces an optional wire value to a non-negative decimal.
///
/// Absent, unparsable and negative values all become zero.
pub(crate) fn coerce_non_negative(value: Option<&Numeric>, field: &'static str) -> Decimal {
    let Some(value) = value else {
        return Decimal::ZERO;
    };

    match value.to_decimal() {
        Some(decimal) if decimal.is_sign_negative() && !decimal.is_zero() => {
            tracing::warn!(field, %value, "negative value coerced to zero");

            Decimal::ZERO
        }
        Some(decimal) => decimal,
        None => {
            tracing::debug!(field, %value, "non-numeric value coerced to zero");

            Decimal::ZERO
        }
    }
}
