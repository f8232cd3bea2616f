//! Sarraf
//!
//! Sarraf prices jewellery against live precious-metal rates. A product's
//! weight in tola, masha and rati is valued at the quoted price per tola and
//! its labor charge is added on top. Pricing never fails: when no usable rate
//! is available the labor charge alone is returned.

pub mod catalog;
pub mod config;
pub mod logging;
pub mod metals;
pub mod numeric;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod rates;
pub mod receipt;
pub mod weight;
