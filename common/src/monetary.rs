//! Monetary helpers.
//!
//! Quote arithmetic runs on `f64` end to end; values are only turned into
//! fixed-point decimals here, when they are formatted for display.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payout currency code (e.g. `VES`, `COP`, `USDT`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Create a new currency from code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    /// Get the currency code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Get the standard decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self.0.as_str() {
            "JPY" | "KRW" | "VND" | "CLP" | "PYG" => 0,
            "BHD" | "KWD" | "OMR" => 3,
            _ => 2,
        }
    }

    /// Venezuelan bolívar.
    pub fn ves() -> Self {
        Self::new("VES")
    }

    /// Tether.
    pub fn usdt() -> Self {
        Self::new("USDT")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Round a computed figure for display.
///
/// Midpoints round away from zero. NaN and infinities render as zero.
pub fn round_display(value: f64, places: u32) -> Decimal {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or(Decimal::ZERO)
}

/// Whether `value` fits a display decimal. Figures that don't render as zero
/// from [`round_display`].
pub fn is_displayable(value: f64) -> bool {
    Decimal::from_f64(value).is_some()
}
