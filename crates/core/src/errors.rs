//! Core error types for dcafolio.
//!
//! Every variant is a per-request error: it is reported to the caller and
//! never terminates the host process.

use thiserror::Error;

use dcafolio_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the estimator library.
#[derive(Error, Debug)]
pub enum Error {
    /// A market data fetch failed. Wraps the provider-layer taxonomy
    /// (unknown symbol, empty range, transport failures).
    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    /// The IRR root finder did not converge on a rate.
    #[error("IRR did not converge after {iterations} iterations")]
    IrrNoConvergence {
        /// Iterations spent before giving up
        iterations: u32,
    },

    /// Input validation failed.
    #[error("Input validation failed: {0}")]
    Validation(String),
}
