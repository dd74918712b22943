//! Identifier types for QuoteDesk configuration entities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::QuoteDeskError;

/// Identifier of a settlement channel (a gateway or balance type).
/// Matched case-sensitively against the configured slugs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelSlug(String);

impl ChannelSlug {
    /// Create a new channel slug.
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// The channel quotes default to when the caller names none.
    pub fn primary() -> Self {
        Self::new("PAYPAL")
    }

    /// Get the slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ChannelSlug {
    fn default() -> Self {
        Self::primary()
    }
}

impl fmt::Display for ChannelSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ChannelSlug {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identifier of an operation profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(String);

impl ProfileId {
    /// Create a new profile ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProfileId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A promotional code as typed by a client.
///
/// Matching against configured coupons is exact; use [`CouponCode::normalized`]
/// before handing user input to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CouponCode(String);

impl CouponCode {
    /// Create a coupon code exactly as given.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Trimmed, upper-cased copy of this code.
    pub fn normalized(&self) -> Self {
        Self(self.0.trim().to_uppercase())
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CouponCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Direction of an exchange, seen from the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Client surrenders channel balance and receives payout currency.
    #[default]
    Sell,
    /// Client pays payout-equivalent value to receive channel balance.
    Buy,
}

impl Direction {
    /// Wire name of the direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Sell => "SELL",
            Direction::Buy => "BUY",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = QuoteDeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SELL" => Ok(Direction::Sell),
            "BUY" => Ok(Direction::Buy),
            other => Err(QuoteDeskError::InvalidInput {
                field: "direction".to_string(),
                message: format!("unknown direction '{}'", other),
            }),
        }
    }
}
