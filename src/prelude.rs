//! Sarraf prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, CatalogError, CatalogLine},
    metals::{Metal, UnknownMetal},
    numeric::Numeric,
    pricing::{
        MoneyBreakdown, PriceBreakdown, board_price_breakdown, calculate_board_price,
        calculate_dynamic_price, price_breakdown,
    },
    products::{Product, ProductKey, ProductRecord},
    rates::{MarketRate, RateBoard, RateError, RateQuote, normalize_rate, usable_rate},
    receipt::{ReceiptError, write_breakdowns},
    weight::{MASHA_PER_TOLA, RATI_PER_MASHA, RATI_PER_TOLA, Weight, total_weight_in_tola},
};
