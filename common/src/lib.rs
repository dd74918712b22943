//! QuoteDesk Common Types
//!
//! This crate contains the pricing configuration model shared by the quote
//! engine and its callers, together with identifiers, currency metadata and
//! the error type used when loading configuration.

pub mod identifiers;
pub mod monetary;
pub mod profile;
pub mod snapshot;
pub mod error;

pub use identifiers::*;
pub use monetary::*;
pub use profile::*;
pub use snapshot::*;
pub use error::*;
