//! Dcafolio Core - estimators, analyzers, and domain traits.
//!
//! This crate contains the business logic for dcafolio:
//!
//! - [`dca`]: the dollar-cost-average portfolio estimator
//! - [`irr`]: internal rate of return solving and annualization
//! - [`retirement`]: inflation-adjusted retirement savings projection
//! - [`analyzer`]: rating aggregation, DCF valuation calls, and
//!   news-sentiment aggregation
//! - [`recommender`]: risk-tolerance-driven ETF and stock picks
//! - [`calendar`]: the trading-day oracle used to adjust request dates
//!
//! All market data I/O goes through the `MarketDataProvider` trait from
//! `dcafolio-market-data`; every service here is stateless between
//! invocations.

pub mod analyzer;
pub mod calendar;
pub mod constants;
pub mod dca;
pub mod errors;
pub mod irr;
pub mod recommender;
pub mod retirement;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
