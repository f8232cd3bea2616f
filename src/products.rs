//! Products

use rust_decimal::Decimal;
use serde::Deserialize;
use slotmap::new_key_type;

use crate::{
    metals::Metal,
    numeric::{Numeric, coerce_non_negative},
    weight::Weight,
};

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Product record as served by the storefront API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Product name
    #[serde(default)]
    pub name: Option<String>,

    /// Metal the piece is made of
    #[serde(default)]
    pub metal: Option<Metal>,

    /// Whole tola
    #[serde(default)]
    pub weight_tola: Option<Numeric>,

    /// Masha
    #[serde(default)]
    pub weight_masha: Option<Numeric>,

    /// Rati
    #[serde(default)]
    pub weight_rati: Option<Numeric>,

    /// Labor (making) charge
    #[serde(default)]
    pub price: Option<Numeric>,
}

/// A product ready for pricing.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product name
    pub name: String,

    /// Metal the piece is made of
    pub metal: Metal,

    /// Product weight
    pub weight: Weight,

    /// Labor (making) charge in the shop currency, never negative
    pub labor_charge: Decimal,
}

impl Product {
    /// Creates a product, clamping a negative labor charge to zero.
    pub fn new(
        name: impl Into<String>,
        metal: Metal,
        weight: Weight,
        labor_charge: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            metal,
            weight,
            labor_charge: labor_charge.max(Decimal::ZERO),
        }
    }
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        let weight = Weight::from_wire(
            record.weight_tola.as_ref(),
            record.weight_masha.as_ref(),
            record.weight_rati.as_ref(),
        );

        Self {
            name: record.name.unwrap_or_default(),
            metal: record.metal.unwrap_or_default(),
            weight,
            labor_charge: coerce_non_negative(record.price.as_ref(), "price"),
        }
    }
}
