//! Market data provider trait and implementations.

pub mod fmp;
mod traits;

pub use traits::MarketDataProvider;
