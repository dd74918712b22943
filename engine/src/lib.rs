//! QuoteDesk Quote Engine
//!
//! Computes what a client receives for an exchange between a settlement
//! channel balance and a payout currency, and what the business nets.
//!
//! # Pipeline
//!
//! - Profile resolution: channel and direction select an operation profile
//! - Rate resolution: manual rate, or selected reference minus margin
//! - Cost aggregation: deductive, absorbed and additive buckets
//! - Quote assembly: exchangeable base and payout
//! - Coupon overlay on the payout
//! - Profit estimation
//!
//! Every step is a pure function over an immutable [`ConfigSnapshot`].
//! Missing configuration never fails a quote; it yields zero figures and
//! [`QuoteWarning`]s.
//!
//! # Example
//!
//! ```rust,ignore
//! use quotedesk_common::ConfigSnapshot;
//! use quotedesk_engine::{EngineConfig, QuoteEngine, QuoteRequest};
//!
//! let engine = QuoteEngine::new(EngineConfig::default());
//! let snapshot = ConfigSnapshot::from_path("snapshot.json")?;
//!
//! let quote = engine.quote(&snapshot, &QuoteRequest::new(100.0, "VES").with_coupon("BIENVENIDA"));
//! println!("{}", quote.result.rounded().final_amount);
//! ```
//!
//! [`ConfigSnapshot`]: quotedesk_common::ConfigSnapshot

pub mod engine;
pub mod config;
pub mod profile;
pub mod rate;
pub mod cost;
pub mod assemble;
pub mod coupon;
pub mod profit;
pub mod quote;
pub mod diagnostics;
pub mod snapshot;

pub use engine::QuoteEngine;
pub use config::EngineConfig;
pub use cost::CostBreakdown;
pub use rate::RateBreakdown;
pub use assemble::{AssembledQuote, BasePolicy};
pub use quote::{DisplayQuote, Quote, QuoteRequest, QuoteResult, RatePreview};
pub use diagnostics::QuoteWarning;
pub use snapshot::{SharedSnapshot, SnapshotCell};
