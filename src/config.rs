//! Calculator configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rusty_money::iso::Currency;

use crate::{
    metals::Metal,
    numeric::{Numeric, coerce_non_negative},
    products::Product,
    rates::{RateQuote, resolve_currency},
    weight::Weight,
};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        env = "SARRAF_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact,
        global = true
    )]
    pub log_format: LogFormat,
}

/// Precious-metal price calculator
#[derive(Debug, Parser)]
#[command(name = "sarraf", version, about)]
pub struct CalculatorConfig {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// What to calculate.
    #[command(subcommand)]
    pub command: Command,
}

impl CalculatorConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Calculator subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price a single piece from its weight and labor charge
    Price(PriceArgs),

    /// Price every product in a catalog against a rate sheet
    Catalog(CatalogArgs),
}

/// Arguments for pricing a single piece
#[derive(Debug, Args)]
pub struct PriceArgs {
    /// Metal the piece is made of
    #[arg(short, long, default_value = "gold")]
    pub metal: Metal,

    /// Whole tola
    #[arg(short, long)]
    pub tola: Option<String>,

    /// Masha (12 per tola)
    #[arg(short = 'M', long)]
    pub masha: Option<String>,

    /// Rati (8 per masha)
    #[arg(short, long)]
    pub rati: Option<String>,

    /// Labor (making) charge
    #[arg(short, long)]
    pub labor: Option<String>,

    /// Market price per tola, e.g. "245,500"; omit to price labor only
    #[arg(long, env = "SARRAF_RATE")]
    pub rate: Option<String>,

    /// Display currency
    #[arg(short, long, env = "SARRAF_CURRENCY", default_value = "PKR", value_parser = parse_currency)]
    pub currency: &'static Currency,
}

impl PriceArgs {
    /// The piece described by the arguments.
    pub fn product(&self) -> Product {
        let numeric = |value: Option<&str>| value.map(Numeric::from);

        let weight = Weight::from_wire(
            numeric(self.tola.as_deref()).as_ref(),
            numeric(self.masha.as_deref()).as_ref(),
            numeric(self.rati.as_deref()).as_ref(),
        );

        let labor = coerce_non_negative(numeric(self.labor.as_deref()).as_ref(), "labor");

        Product::new("Piece", self.metal, weight, labor)
    }

    /// The quote given on the command line, if any.
    pub fn quote(&self) -> Option<RateQuote> {
        self.rate.as_deref().map(|rate| {
            RateQuote::new(rate)
                .with_metal(self.metal)
                .with_currency(self.currency.iso_alpha_code)
        })
    }
}

/// Arguments for pricing a catalog
#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Directory containing `products/` and `rates/`
    #[arg(short, long, env = "SARRAF_FIXTURES", default_value = "./fixtures")]
    pub fixtures: PathBuf,

    /// Products file name, without extension
    #[arg(short, long, default_value = "catalog")]
    pub products: String,

    /// Rate sheet name, without extension
    #[arg(short, long, default_value = "today")]
    pub rates: String,

    /// Display currency
    #[arg(short, long, env = "SARRAF_CURRENCY", default_value = "PKR", value_parser = parse_currency)]
    pub currency: &'static Currency,
}

fn parse_currency(code: &str) -> Result<&'static Currency, String> {
    resolve_currency(code).ok_or_else(|| format!("unsupported currency: {code}"))
}
