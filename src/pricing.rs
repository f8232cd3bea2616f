//! Pricing
//!
//! Dynamic prices are the metal value of a product at the current market rate
//! plus its labor charge. When no usable rate is available the labor charge
//! alone is returned, so a product always has a price.
//!
//! [`calculate_dynamic_price`] rounds once, after summing. [`price_breakdown`]
//! rounds the metal value and labor charge separately and adds the rounded
//! parts, so the two totals can differ by one unit for fractional inputs.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};

use crate::{
    products::Product,
    rates::{MarketRate, RateBoard, RateError, RateQuote, usable_rate},
    weight::Weight,
};

/// Price of a product split into its parts, in whole currency units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceBreakdown {
    /// Value of the metal at the quoted rate
    pub metal_value: i64,

    /// Labor (making) charge
    pub labor_charge: i64,

    /// Sum of the two rounded parts
    pub total: i64,
}

impl PriceBreakdown {
    fn labor_only(labor_charge: i64) -> Self {
        Self {
            metal_value: 0,
            labor_charge,
            total: labor_charge,
        }
    }

    fn from_parts(metal_value: i64, labor_charge: i64) -> Self {
        Self {
            metal_value,
            labor_charge,
            total: metal_value.saturating_add(labor_charge),
        }
    }

    /// Converts the breakdown into money in the given currency.
    pub fn to_money<'a>(&self, currency: &'a Currency) -> MoneyBreakdown<'a> {
        MoneyBreakdown {
            metal_value: Money::from_major(self.metal_value, currency),
            labor_charge: Money::from_major(self.labor_charge, currency),
            total: Money::from_major(self.total, currency),
        }
    }
}

/// A [`PriceBreakdown`] expressed as money.
#[derive(Debug, Clone, PartialEq)]
pub struct MoneyBreakdown<'a> {
    /// Value of the metal at the quoted rate
    pub metal_value: Money<'a, Currency>,

    /// Labor (making) charge
    pub labor_charge: Money<'a, Currency>,

    /// Total price
    pub total: Money<'a, Currency>,
}

/// Calculates the final price of a product at a market rate.
///
/// Returns the rounded labor charge, ignoring weight, when the rate is missing,
/// reports an error, or has no positive price. Otherwise the metal value and
/// labor charge are summed and rounded once, half away from zero.
pub fn calculate_dynamic_price(product: &Product, rate: Option<&RateQuote>) -> i64 {
    match usable_rate(rate) {
        Ok(rate) => {
            let price = metal_value(&product.weight, &rate).saturating_add(product.labor_charge);

            round_units(price)
        }
        Err(reason) => {
            log_fallback(product, &reason);

            round_units(product.labor_charge)
        }
    }
}

/// Calculates the price of a product split into metal value and labor charge.
///
/// Uses the same fallback as [`calculate_dynamic_price`], reporting a metal
/// value of zero. Each part is rounded on its own and `total` is their sum.
pub fn price_breakdown(product: &Product, rate: Option<&RateQuote>) -> PriceBreakdown {
    let labor_charge = round_units(product.labor_charge);

    match usable_rate(rate) {
        Ok(rate) => {
            let metal_value = round_units(metal_value(&product.weight, &rate));

            PriceBreakdown::from_parts(metal_value, labor_charge)
        }
        Err(reason) => {
            log_fallback(product, &reason);

            PriceBreakdown::labor_only(labor_charge)
        }
    }
}

/// Calculates the final price using the board's quote for the product's metal.
pub fn calculate_board_price(product: &Product, board: &RateBoard) -> i64 {
    calculate_dynamic_price(product, board.quote_for(product.metal))
}

/// Calculates a breakdown using the board's quote for the product's metal.
pub fn board_price_breakdown(product: &Product, board: &RateBoard) -> PriceBreakdown {
    price_breakdown(product, board.quote_for(product.metal))
}

fn metal_value(weight: &Weight, rate: &MarketRate) -> Decimal {
    weight.in_tola().saturating_mul(rate.price_per_tola())
}

fn round_units(value: Decimal) -> i64 {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

fn log_fallback(product: &Product, reason: &RateError) {
    tracing::debug!(
        product = %product.name,
        metal = %product.metal,
        %reason,
        "market rate unusable; pricing labor charge only"
    );
}
