//! Weights
//!
//! Jewellery is weighed in tola, masha and rati. One tola is twelve masha and
//! one masha is eight rati, so one tola is ninety-six rati.

use std::fmt;

use rust_decimal::Decimal;

use crate::numeric::{Numeric, coerce_non_negative};

/// Masha in one tola.
pub const MASHA_PER_TOLA: u32 = 12;

/// Rati in one tola.
pub const RATI_PER_TOLA: u32 = 96;

/// Rati in one masha.
pub const RATI_PER_MASHA: u32 = RATI_PER_TOLA / MASHA_PER_TOLA;

/// Grams in one tola, scaled by 10^7 (11.6638038 g).
const GRAMS_PER_TOLA_SCALED: i64 = 116_638_038;

/// Converts a tola/masha/rati triple into tola.
///
/// No rounding is applied; the result keeps full decimal precision.
pub fn total_weight_in_tola(tola: Decimal, masha: Decimal, rati: Decimal) -> Decimal {
    let masha_in_tola = masha / Decimal::from(MASHA_PER_TOLA);
    let rati_in_tola = rati / Decimal::from(RATI_PER_TOLA);

    tola.saturating_add(masha_in_tola)
        .saturating_add(rati_in_tola)
}

/// A product weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Weight {
    tola: Decimal,
    masha: Decimal,
    rati: Decimal,
}

impl Weight {
    /// Creates a weight, clamping negative components to zero.
    pub fn new(tola: Decimal, masha: Decimal, rati: Decimal) -> Self {
        Self {
            tola: tola.max(Decimal::ZERO),
            masha: masha.max(Decimal::ZERO),
            rati: rati.max(Decimal::ZERO),
        }
    }

    /// Creates a weight from loosely typed wire values.
    ///
    /// Missing, non-numeric and negative components are treated as zero.
    pub fn from_wire(
        tola: Option<&Numeric>,
        masha: Option<&Numeric>,
        rati: Option<&Numeric>,
    ) -> Self {
        Self {
            tola: coerce_non_negative(tola, "weightTola"),
            masha: coerce_non_negative(masha, "weightMasha"),
            rati: coerce_non_negative(rati, "weightRati"),
        }
    }

    /// Whole tola component.
    pub fn tola(&self) -> Decimal {
        self.tola
    }

    /// Masha component.
    pub fn masha(&self) -> Decimal {
        self.masha
    }

    /// Rati component.
    pub fn rati(&self) -> Decimal {
        self.rati
    }

    /// Total weight expressed in tola.
    pub fn in_tola(&self) -> Decimal {
        total_weight_in_tola(self.tola, self.masha, self.rati)
    }

    /// Total weight expressed in grams.
    pub fn in_grams(&self) -> Decimal {
        self.in_tola()
            .saturating_mul(Decimal::new(GRAMS_PER_TOLA_SCALED, 7))
    }

    /// Returns true when every component is zero.
    pub fn is_zero(&self) -> bool {
        self.tola.is_zero() && self.masha.is_zero() && self.rati.is_zero()
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0 tola");
        }

        let parts = [
            (self.tola, "tola"),
            (self.masha, "masha"),
            (self.rati, "rati"),
        ];

        let mut first = true;

        for (amount, unit) in parts {
            if amount.is_zero() {
                continue;
            }

            if !first {
                f.write_str(" ")?;
            }

            write!(f, "{} {unit}", amount.normalize())?;
            first = false;
        }

        Ok(())
    }
}
