//! Sarraf calculator
//!
//! Prices a single piece (`sarraf price`) or a whole catalog
//! (`sarraf catalog`) against precious-metal market rates.

use std::io::{self, Write};

use anyhow::Result;
use rusty_money::Money;
use sarraf::{
    catalog::{Catalog, CatalogLine},
    config::{CalculatorConfig, CatalogArgs, Command, PriceArgs},
    logging::init_subscriber,
    metals::Metal,
    pricing::{calculate_dynamic_price, price_breakdown},
    rates::usable_rate,
    receipt::write_breakdowns,
};

fn main() -> Result<()> {
    let config = CalculatorConfig::load().unwrap_or_else(|err| err.exit());

    init_subscriber(&config.logging)?;

    match &config.command {
        Command::Price(args) => run_price(args),
        Command::Catalog(args) => run_catalog(args),
    }
}

fn run_price(args: &PriceArgs) -> Result<()> {
    let product = args.product();
    let quote = args.quote();

    if let Err(reason) = usable_rate(quote.as_ref()) {
        tracing::warn!(%reason, "no usable market rate; price excludes metal value");
    }

    let dynamic_price = calculate_dynamic_price(&product, quote.as_ref());
    let breakdown = price_breakdown(&product, quote.as_ref());

    let lines = [CatalogLine {
        key: "piece",
        product: &product,
        dynamic_price,
        breakdown,
    }];

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    write_breakdowns(&mut handle, &lines, args.currency)?;

    writeln!(
        handle,
        " Price: {} ({} g)",
        Money::from_major(dynamic_price, args.currency),
        product.weight.in_grams().round_dp(3)
    )?;

    Ok(())
}

fn run_catalog(args: &CatalogArgs) -> Result<()> {
    let mut catalog = Catalog::with_base_path(&args.fixtures);
    catalog.load_products(&args.products)?.load_rates(&args.rates)?;

    for metal in Metal::ALL {
        if let Err(reason) = usable_rate(catalog.rates().quote_for(metal)) {
            tracing::warn!(%metal, %reason, "no usable market rate; prices exclude metal value");
        }
    }

    let lines = catalog.price_all();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    write_breakdowns(&mut handle, &lines, args.currency)?;

    Ok(())
}
