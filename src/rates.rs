//! Market rates
//!
//! A [`RateQuote`] is the loosely typed quote returned by the rate endpoint.
//! [`RateQuote::usability`] validates it into a [`MarketRate`] or explains why
//! it cannot be used for pricing.

use rust_decimal::Decimal;
use rusty_money::iso::{AED, Currency, EUR, GBP, INR, PKR, SAR, USD};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    metals::Metal,
    numeric::{Numeric, decimal_from_f64, parse_decimal},
};

/// Reasons a quote cannot be used for pricing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RateError {
    /// No quote is available.
    #[error("no market rate available")]
    Missing,

    /// The rate source reported an error instead of a price.
    #[error("rate source reported an error: {0}")]
    Reported(String),

    /// The quote carries no price.
    #[error("quote has no price")]
    MissingPrice,

    /// The price could not be parsed as a finite number.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// The price is zero or negative.
    #[error("price must be greater than zero, got {0}")]
    NonPositivePrice(Decimal),
}

/// Normalises a quoted price per tola.
///
/// Strings have every `,` thousands separator removed before parsing. Returns
/// `None` when the result is not a finite number. No currency conversion is
/// performed.
pub fn normalize_rate(raw: &Numeric) -> Option<Decimal> {
    match raw {
        Numeric::Number(value) => decimal_from_f64(*value),
        Numeric::Text(text) => parse_decimal(&text.replace(',', "")),
        Numeric::Other(_) => None,
    }
}

/// Resolves an ISO currency code used by rate sources.
pub fn resolve_currency(code: &str) -> Option<&'static Currency> {
    let currency = match code.trim().to_ascii_uppercase().as_str() {
        "PKR" => PKR,
        "INR" => INR,
        "AED" => AED,
        "SAR" => SAR,
        "USD" => USD,
        "GBP" => GBP,
        "EUR" => EUR,
        _ => return None,
    };

    Some(currency)
}

/// A market-rate quote for one metal, as received from the rate source.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuote {
    /// Quoted metal, when the source states it.
    #[serde(default)]
    pub metal: Option<Metal>,

    /// Price per tola, as a number or a comma-separated string.
    #[serde(default)]
    pub price: Option<Numeric>,

    /// Currency code, e.g. `PKR`.
    #[serde(default)]
    pub currency: String,

    /// Quoted unit, e.g. `Tola`.
    #[serde(default)]
    pub unit: String,

    /// Purity label, e.g. `24K`.
    #[serde(default)]
    pub purity: String,

    /// Set by the rate source when it could not produce a price.
    #[serde(default)]
    pub error: Option<String>,
}

impl RateQuote {
    /// Creates a quote with the given price per tola.
    pub fn new(price: impl Into<Numeric>) -> Self {
        Self {
            price: Some(price.into()),
            ..Self::default()
        }
    }

    /// Parses a quote from a JSON response body.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the body is not a quote object.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Sets the quoted metal.
    #[must_use]
    pub fn with_metal(mut self, metal: Metal) -> Self {
        self.metal = Some(metal);
        self
    }

    /// Sets the currency code.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Marks the quote as failed.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Normalised price per tola, if any.
    pub fn price_per_tola(&self) -> Option<Decimal> {
        self.price.as_ref().and_then(normalize_rate)
    }

    /// Validates the quote for pricing.
    ///
    /// # Errors
    ///
    /// - [`RateError::Reported`]: the source set a non-empty `error`.
    /// - [`RateError::MissingPrice`]: there is no price.
    /// - [`RateError::InvalidPrice`]: the price is not a finite number.
    /// - [`RateError::NonPositivePrice`]: the price is zero or negative.
    pub fn usability(&self) -> Result<MarketRate, RateError> {
        if let Some(error) = self.error.as_deref().filter(|e| !e.is_empty()) {
            return Err(RateError::Reported(error.to_string()));
        }

        let raw = self.price.as_ref().ok_or(RateError::MissingPrice)?;
        let price = normalize_rate(raw).ok_or_else(|| RateError::InvalidPrice(raw.to_string()))?;

        if price <= Decimal::ZERO {
            return Err(RateError::NonPositivePrice(price));
        }

        Ok(MarketRate {
            metal: self.metal,
            price_per_tola: price,
            currency: resolve_currency(&self.currency),
            unit: self.unit.clone(),
            purity: self.purity.clone(),
        })
    }

    /// Returns true when the quote can be used for pricing.
    pub fn is_usable(&self) -> bool {
        self.usability().is_ok()
    }
}

/// Validates an optional quote.
///
/// # Errors
///
/// Returns [`RateError::Missing`] for `None`, otherwise the result of
/// [`RateQuote::usability`].
pub fn usable_rate(quote: Option<&RateQuote>) -> Result<MarketRate, RateError> {
    quote.ok_or(RateError::Missing)?.usability()
}

/// A validated quote with a positive price per tola.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketRate {
    metal: Option<Metal>,
    price_per_tola: Decimal,
    currency: Option<&'static Currency>,
    unit: String,
    purity: String,
}

impl MarketRate {
    /// Quoted metal, when known.
    pub fn metal(&self) -> Option<Metal> {
        self.metal
    }

    /// Price of one tola, always greater than zero.
    pub fn price_per_tola(&self) -> Decimal {
        self.price_per_tola
    }

    /// Quote currency, when it is a recognised ISO code.
    pub fn currency(&self) -> Option<&'static Currency> {
        self.currency
    }

    /// Quoted unit label.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Purity label.
    pub fn purity(&self) -> &str {
        &self.purity
    }
}

/// Latest quote per metal.
///
/// Callers refresh quotes on their own cadence; pricing always uses whatever
/// snapshot is on the board.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RateBoard {
    #[serde(default)]
    gold: Option<RateQuote>,

    #[serde(default)]
    silver: Option<RateQuote>,
}

impl RateBoard {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a quote, replacing any existing quote for the metal.
    #[must_use]
    pub fn with_quote(mut self, metal: Metal, quote: RateQuote) -> Self {
        self.set(metal, quote);
        self
    }

    /// Replaces the quote for a metal.
    pub fn set(&mut self, metal: Metal, quote: RateQuote) {
        *self.slot_mut(metal) = Some(quote);
    }

    /// Removes the quote for a metal.
    pub fn clear(&mut self, metal: Metal) -> Option<RateQuote> {
        self.slot_mut(metal).take()
    }

    /// Quote for a metal, if one has been fetched.
    pub fn quote_for(&self, metal: Metal) -> Option<&RateQuote> {
        match metal {
            Metal::Gold => self.gold.as_ref(),
            Metal::Silver => self.silver.as_ref(),
        }
    }

    fn slot_mut(&mut self, metal: Metal) -> &mut Option<RateQuote> {
        match metal {
            Metal::Gold => &mut self.gold,
            Metal::Silver => &mut self.silver,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn normalize_strips_thousands_separators() {
        assert_eq!(
            normalize_rate(&Numeric::from("58,430")),
            Some(Decimal::from(58_430))
        );
        assert_eq!(
            normalize_rate(&Numeric::from("58,430.50")),
            Some(Decimal::new(5_843_050, 2))
        );
        assert_eq!(
            normalize_rate(&Numeric::from(58_430.0)),
            Some(Decimal::from(58_430))
        );
    }

    #[test]
    fn normalize_rejects_non_numbers() {
        assert_eq!(normalize_rate(&Numeric::from("N/A")), None);
        assert_eq!(normalize_rate(&Numeric::from(",")), None);
        assert_eq!(normalize_rate(&Numeric::from(f64::NAN)), None);
    }

    #[test]
    fn usability_accepts_positive_price() -> TestResult {
        let rate = RateQuote::new("250,000")
            .with_metal(Metal::Gold)
            .with_currency("PKR")
            .usability()?;

        assert_eq!(rate.price_per_tola(), Decimal::from(250_000));
        assert_eq!(rate.metal(), Some(Metal::Gold));
        assert_eq!(rate.currency(), Some(PKR));

        Ok(())
    }

    #[test]
    fn usability_rejects_reported_error() {
        let quote = RateQuote::new(100.0).with_error("upstream timeout");

        assert_eq!(
            quote.usability(),
            Err(RateError::Reported("upstream timeout".to_string()))
        );
    }

    #[test]
    fn empty_error_does_not_block_quote() {
        assert!(RateQuote::new(100.0).with_error("").is_usable());
    }

    #[test]
    fn whitespace_error_blocks_quote() {
        assert_eq!(
            RateQuote::new(100.0).with_error("  ").usability(),
            Err(RateError::Reported("  ".to_string()))
        );
    }

    #[test]
    fn huge_numeric_rate_is_usable() -> TestResult {
        let rate = RateQuote::new(1e30).usability()?;

        assert_eq!(rate.price_per_tola(), Decimal::MAX);

        Ok(())
    }

    #[test]
    fn usability_rejects_zero_negative_and_missing() {
        assert_eq!(
            RateQuote::new(0.0).usability(),
            Err(RateError::NonPositivePrice(Decimal::ZERO))
        );
        assert_eq!(
            RateQuote::new(-5.0).usability(),
            Err(RateError::NonPositivePrice(Decimal::from(-5)))
        );
        assert_eq!(
            RateQuote::default().usability(),
            Err(RateError::MissingPrice)
        );
        assert_eq!(
            RateQuote::new("abc").usability(),
            Err(RateError::InvalidPrice("abc".to_string()))
        );
        assert_eq!(usable_rate(None), Err(RateError::Missing));
    }

    #[test]
    fn unknown_currency_is_kept_unresolved() -> TestResult {
        let rate = RateQuote::new(1.0).with_currency("XYZ").usability()?;

        assert_eq!(rate.currency(), None);

        Ok(())
    }

    #[test]
    fn from_json_reads_api_payload() -> TestResult {
        let quote = RateQuote::from_json(
            r#"{"metal":"gold","price":"2,45,500","currency":"PKR","unit":"Tola","purity":"24K"}"#,
        )?;

        assert_eq!(quote.metal, Some(Metal::Gold));
        assert_eq!(quote.unit, "Tola");
        assert_eq!(quote.purity, "24K");
        assert_eq!(quote.price_per_tola(), Some(Decimal::from(245_500)));

        Ok(())
    }

    #[test]
    fn from_json_reads_error_payload() -> TestResult {
        let quote = RateQuote::from_json(r#"{"error":"rate feed unavailable"}"#)?;

        assert!(!quote.is_usable());

        Ok(())
    }

    #[test]
    fn board_replaces_and_clears_quotes() {
        let mut board = RateBoard::new()
            .with_quote(Metal::Gold, RateQuote::new(100.0))
            .with_quote(Metal::Silver, RateQuote::new(10.0));

        board.set(Metal::Gold, RateQuote::new(200.0));

        assert_eq!(
            board.quote_for(Metal::Gold).and_then(RateQuote::price_per_tola),
            Some(Decimal::from(200))
        );

        assert!(board.clear(Metal::Silver).is_some());
        assert!(board.quote_for(Metal::Silver).is_none());
    }
}
