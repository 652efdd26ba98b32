//! Dcafolio Market Data Crate
//!
//! This crate provides market data fetching for the dcafolio estimators.
//!
//! # Overview
//!
//! The market data crate supports:
//! - Daily closing-price history for equities and ETFs
//! - Intraday candles at selectable resolutions
//! - Company profiles, ratings, analyst recommendations, DCF valuations,
//!   income summaries, news, and a market-cap screener
//!
//! All data is served by implementations of the [`MarketDataProvider`]
//! trait. The only bundled implementation is [`FmpProvider`], backed by the
//! Financial Modeling Prep REST API.
//!
//! # Core Types
//!
//! - [`Quote`] - One trading day's closing price (optionally full OHLCV)
//! - [`Candle`] - Intraday OHLC sample with a timestamp
//! - [`CompanyProfile`] - Company identity and classification flags
//! - [`RatingSnapshot`] / [`AnalystRecommendations`] - Rating inputs
//! - [`DcfValuation`] / [`IncomeSummary`] - Fundamental data
//! - [`NewsArticle`] - One news item for sentiment scoring
//! - [`ScreenerEntry`] - One row of the market-cap screener

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;

pub use models::{
    AnalystRecommendations, Candle, CompanyProfile, DcfValuation, IncomeSummary, Interval,
    NewsArticle, ProviderId, Quote, RatingSnapshot, ScreenerEntry,
};

pub use provider::fmp::FmpProvider;
pub use provider::MarketDataProvider;
