//! Market data provider trait definitions.
//!
//! This module defines the core `MarketDataProvider` trait that all
//! market data providers must implement.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::MarketDataError;
use crate::models::{
    AnalystRecommendations, Candle, CompanyProfile, DcfValuation, IncomeSummary, Interval,
    NewsArticle, Quote, RatingSnapshot, ScreenerEntry,
};

/// Trait for market data providers.
///
/// Implement this trait to add support for a new market data source. The
/// estimators and analyzers in `dcafolio-core` are generic over this trait,
/// which also serves as the seam for in-memory test providers.
///
/// Every method is a single blocking round trip from the caller's point of
/// view: a failure is returned immediately and never retried.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "FMP". Used for logging and for
    /// error attribution.
    fn id(&self) -> &'static str;

    /// Fetch the company profile for a symbol.
    ///
    /// Returns [`MarketDataError::SymbolNotFound`] when the provider has no
    /// record of the symbol.
    async fn get_profile(&self, symbol: &str) -> Result<CompanyProfile, MarketDataError>;

    /// Fetch daily closing quotes for a symbol over a date range.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The ticker symbol
    /// * `start` - Start of the date range (inclusive)
    /// * `end` - End of the date range (inclusive)
    ///
    /// # Returns
    ///
    /// Quotes ordered by date ascending, one per trading day, with no
    /// duplicate dates. An empty range yields
    /// [`MarketDataError::NoDataForRange`] rather than an empty vector.
    async fn get_historical_quotes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Quote>, MarketDataError>;

    /// Fetch intraday candles for a symbol at the given resolution.
    ///
    /// Candles are ordered by timestamp ascending. An empty range yields
    /// [`MarketDataError::NoDataForRange`].
    async fn get_intraday_quotes(
        &self,
        symbol: &str,
        interval: Interval,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Candle>, MarketDataError>;

    /// Fetch recent news articles for a symbol.
    async fn get_news(&self, symbol: &str) -> Result<Vec<NewsArticle>, MarketDataError>;

    /// Fetch the provider's composite rating snapshot for a symbol.
    async fn get_rating(&self, symbol: &str) -> Result<RatingSnapshot, MarketDataError>;

    /// Fetch analyst recommendation counts for a symbol.
    async fn get_analyst_recommendations(
        &self,
        symbol: &str,
    ) -> Result<AnalystRecommendations, MarketDataError>;

    /// Fetch the discounted-cash-flow valuation for a symbol.
    async fn get_dcf_valuation(&self, symbol: &str) -> Result<DcfValuation, MarketDataError>;

    /// Fetch headline income statement figures for a symbol.
    async fn get_income_summary(&self, symbol: &str) -> Result<IncomeSummary, MarketDataError>;

    /// Fetch the company screener universe.
    async fn screen_companies(&self) -> Result<Vec<ScreenerEntry>, MarketDataError>;
}
