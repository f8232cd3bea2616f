//! Receipt

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::catalog::CatalogLine;

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Writes a price table for the given lines followed by the grand total.
///
/// `Total` is the sum of the separately rounded parts and `Price` is the
/// value rounded once after summing; the two can differ by one unit. The
/// grand total sums `Total`.
///
/// # Errors
///
/// Returns [`ReceiptError::IO`] if the output cannot be written.
pub fn write_breakdowns(
    mut out: impl io::Write,
    lines: &[CatalogLine<'_>],
    currency: &Currency,
) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record([
        "", "Item", "Metal", "Weight", "Metal Value", "Labor", "Total", "Price",
    ]);

    for (idx, line) in lines.iter().enumerate() {
        let money = line.breakdown.to_money(currency);

        builder.push_record([
            format!("#{:<3}", idx + 1),
            line.product.name.clone(),
            line.product.metal.to_string(),
            line.product.weight.to_string(),
            money.metal_value.to_string(),
            money.labor_charge.to_string(),
            money.total.to_string(),
            Money::from_major(line.dynamic_price, currency).to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(4..8), Alignment::right());

    writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)?;

    let grand_total = lines
        .iter()
        .fold(0_i64, |acc, line| acc.saturating_add(line.breakdown.total));

    writeln!(
        out,
        " \x1b[1mTotal:\x1b[0m {}\n",
        Money::from_major(grand_total, currency)
    )
    .map_err(|_err| ReceiptError::IO)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;
    use crate::{
        metals::Metal,
        pricing::{calculate_dynamic_price, price_breakdown},
        products::Product,
        rates::RateQuote,
        weight::Weight,
    };

    #[test]
    fn writes_rows_and_grand_total() -> TestResult {
        let ring = Product::new(
            "Ring",
            Metal::Gold,
            Weight::new(Decimal::ONE, Decimal::from(6), Decimal::ZERO),
            Decimal::from(5000),
        );
        let rate = RateQuote::new("200,000");

        let lines = [CatalogLine {
            key: "ring",
            product: &ring,
            dynamic_price: calculate_dynamic_price(&ring, Some(&rate)),
            breakdown: price_breakdown(&ring, Some(&rate)),
        }];

        let mut out = Vec::new();
        write_breakdowns(&mut out, &lines, iso::PKR)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Ring"), "missing item name: {rendered}");
        assert!(rendered.contains("1 tola 6 masha"), "missing weight: {rendered}");
        assert!(rendered.contains("Total:"), "missing total: {rendered}");
        assert!(
            rendered.contains(&Money::from_major(305_000, iso::PKR).to_string()),
            "missing grand total: {rendered}"
        );

        Ok(())
    }

    #[test]
    fn shows_price_next_to_breakdown_total() -> TestResult {
        let ring = Product::new(
            "Ring",
            Metal::Gold,
            Weight::new(Decimal::ZERO, Decimal::from(6), Decimal::ZERO),
            Decimal::new(105, 1),
        );
        let rate = RateQuote::new(201.0);

        let lines = [CatalogLine {
            key: "ring",
            product: &ring,
            dynamic_price: calculate_dynamic_price(&ring, Some(&rate)),
            breakdown: price_breakdown(&ring, Some(&rate)),
        }];

        let mut out = Vec::new();
        write_breakdowns(&mut out, &lines, iso::PKR)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Price"), "missing price column: {rendered}");
        assert!(
            rendered.contains(&Money::from_major(111, iso::PKR).to_string()),
            "missing dynamic price: {rendered}"
        );
        assert!(
            rendered.contains(&Money::from_major(112, iso::PKR).to_string()),
            "missing breakdown total: {rendered}"
        );

        Ok(())
    }

    #[test]
    fn empty_receipt_totals_zero() -> TestResult {
        let mut out = Vec::new();
        write_breakdowns(&mut out, &[], iso::PKR)?;

        let rendered = String::from_utf8(out)?;

        assert!(
            rendered.contains(&Money::from_major(0, iso::PKR).to_string()),
            "missing zero total: {rendered}"
        );

        Ok(())
    }
}
