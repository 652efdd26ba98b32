//! Financial Modeling Prep (FMP) provider implementation.
//!
//! This provider fetches market data from the FMP REST API with API-key
//! query authentication.
//!
//! # API Endpoints
//!
//! - Profile: `/api/v3/profile/{symbol}`
//! - Daily history: `/api/v3/historical-price-full/{symbol}?from={start}&to={end}`
//! - Intraday candles: `/api/v3/historical-chart/{interval}/{symbol}?from={start}&to={end}`
//! - News: `/api/v3/stock_news?tickers={symbol}`
//! - Rating: `/api/v3/rating/{symbol}`
//! - Analyst recommendations: `/api/v3/analyst-stock-recommendations/{symbol}`
//! - DCF valuation: `/api/v3/discounted-cash-flow/{symbol}`
//! - Income statement: `/api/v3/income-statement/{symbol}?limit=1`
//! - Screener: `/stable/company-screener`
//!
//! # Response Format
//!
//! Most endpoints return a JSON array with a single object per symbol; the
//! daily-history endpoint wraps its rows in a `historical` array ordered
//! newest-first. This provider re-sorts all series ascending before
//! returning them.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, warn};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::MarketDataError;
use crate::models::{
    AnalystRecommendations, Candle, CompanyProfile, DcfValuation, IncomeSummary, Interval,
    NewsArticle, Quote, RatingSnapshot, ScreenerEntry,
};
use crate::provider::MarketDataProvider;

const BASE_URL: &str = "https://financialmodelingprep.com";
const PROVIDER_ID: &str = "FMP";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Timestamp format used by the chart and news endpoints,
/// e.g. "2024-03-15 16:00:00"
const FMP_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// Response structures for the FMP API
// ============================================================================

/// Row of the `/profile/{symbol}` response array
#[derive(Debug, Deserialize)]
struct FmpProfile {
    symbol: String,
    #[serde(rename = "companyName")]
    company_name: String,
    #[serde(default)]
    price: Option<f64>,
    #[serde(rename = "mktCap", default)]
    market_cap: Option<f64>,
    #[serde(rename = "pe", default)]
    pe_ratio: Option<f64>,
    #[serde(rename = "isEtf", default)]
    is_etf: bool,
    #[serde(rename = "isFund", default)]
    is_fund: bool,
    #[serde(rename = "isActivelyTrading", default)]
    is_actively_trading: bool,
}

/// `/historical-price-full/{symbol}` response envelope
#[derive(Debug, Deserialize)]
struct FmpHistoricalResponse {
    #[serde(default)]
    historical: Vec<FmpEodRow>,
}

/// One end-of-day row, newest first in the payload
#[derive(Debug, Deserialize)]
struct FmpEodRow {
    date: String,
    #[serde(default)]
    open: Option<f64>,
    #[serde(default)]
    high: Option<f64>,
    #[serde(default)]
    low: Option<f64>,
    close: f64,
    #[serde(default)]
    volume: Option<f64>,
}

/// One row of the `/historical-chart/{interval}/{symbol}` response
#[derive(Debug, Deserialize)]
struct FmpChartRow {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volume: Option<f64>,
}

/// One row of the `/stock_news` response
#[derive(Debug, Deserialize)]
struct FmpNewsRow {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(rename = "publishedDate", default)]
    published_date: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    site: Option<String>,
    #[serde(default)]
    url: String,
}

/// Row of the `/rating/{symbol}` response array
#[derive(Debug, Deserialize)]
struct FmpRating {
    symbol: String,
    #[serde(rename = "ratingScore")]
    rating_score: f64,
    #[serde(rename = "ratingDetailsDCFScore")]
    dcf_score: f64,
    #[serde(rename = "ratingDetailsROEScore")]
    roe_score: f64,
    #[serde(rename = "ratingDetailsROAScore")]
    roa_score: f64,
    #[serde(rename = "ratingDetailsDEScore")]
    de_score: f64,
    #[serde(rename = "ratingDetailsPEScore")]
    pe_score: f64,
    #[serde(rename = "ratingDetailsPBScore")]
    pb_score: f64,
}

/// Row of the `/analyst-stock-recommendations/{symbol}` response array.
/// Field casing is preserved from the API, including the lowercase `b`
/// in `analystRatingsbuy`.
#[derive(Debug, Deserialize)]
struct FmpAnalystRatings {
    symbol: String,
    #[serde(rename = "analystRatingsStrongBuy")]
    strong_buy: u32,
    #[serde(rename = "analystRatingsbuy")]
    buy: u32,
    #[serde(rename = "analystRatingsHold")]
    hold: u32,
    #[serde(rename = "analystRatingsSell")]
    sell: u32,
    #[serde(rename = "analystRatingsStrongSell")]
    strong_sell: u32,
}

/// Row of the `/discounted-cash-flow/{symbol}` response array
#[derive(Debug, Deserialize)]
struct FmpDcf {
    symbol: String,
    dcf: f64,
    #[serde(rename = "Stock Price")]
    stock_price: f64,
}

/// Row of the `/income-statement/{symbol}` response array
#[derive(Debug, Deserialize)]
struct FmpIncomeStatement {
    symbol: String,
    revenue: f64,
    #[serde(rename = "netIncome")]
    net_income: f64,
}

/// Row of the `/stable/company-screener` response array
#[derive(Debug, Deserialize)]
struct FmpScreenerRow {
    symbol: String,
    #[serde(rename = "companyName", default)]
    company_name: String,
    #[serde(rename = "marketCap", default)]
    market_cap: Option<f64>,
}

/// Financial Modeling Prep provider.
///
/// The API key is passed explicitly at construction; there is no ambient
/// configuration lookup.
///
/// # Example
///
/// ```ignore
/// let provider = FmpProvider::new("your-api-key".to_string());
/// let quotes = provider.get_historical_quotes("AAPL", start, end).await?;
/// ```
pub struct FmpProvider {
    client: Client,
    api_key: String,
}

impl FmpProvider {
    /// Create a new FMP provider with the given API key.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    /// Fetch a URL, appending the API key, and map HTTP failures onto
    /// [`MarketDataError`]. The URL must already contain a query string
    /// separator decision (`?` vs `&`) via `sep`.
    async fn fetch(&self, url: &str, sep: char) -> Result<String, MarketDataError> {
        let full_url = format!("{}{}apikey={}", url, sep, self.api_key);
        debug!("FMP request: {}{}apikey=***", url, sep);

        let response = self.client.get(&full_url).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !response.status().is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP error: {}", response.status()),
            });
        }

        response
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })
    }

    /// Fetch and deserialize a JSON body.
    async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        sep: char,
    ) -> Result<T, MarketDataError> {
        let body = self.fetch(url, sep).await?;
        serde_json::from_str(&body).map_err(|e| MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse response: {}", e),
        })
    }

    fn provider_error(message: String) -> MarketDataError {
        MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message,
        }
    }

    fn decimal(value: f64, field: &str) -> Result<Decimal, MarketDataError> {
        Decimal::from_f64_retain(value).ok_or_else(|| {
            Self::provider_error(format!("Failed to convert {} {} to Decimal", field, value))
        })
    }

    fn convert_eod_rows(rows: Vec<FmpEodRow>) -> Vec<Quote> {
        let mut quotes: Vec<Quote> = rows
            .into_iter()
            .filter_map(|row| {
                let date = match NaiveDate::parse_from_str(&row.date, "%Y-%m-%d") {
                    Ok(d) => d,
                    Err(e) => {
                        warn!("Skipping EOD row with bad date '{}': {}", row.date, e);
                        return None;
                    }
                };
                let close = match Decimal::from_f64_retain(row.close) {
                    Some(c) => c,
                    None => {
                        warn!("Skipping EOD row {} with bad close {}", row.date, row.close);
                        return None;
                    }
                };
                Some(Quote {
                    date,
                    open: row.open.and_then(Decimal::from_f64_retain),
                    high: row.high.and_then(Decimal::from_f64_retain),
                    low: row.low.and_then(Decimal::from_f64_retain),
                    close,
                    volume: row.volume.and_then(Decimal::from_f64_retain),
                })
            })
            .collect();

        // Payload is newest-first; callers expect ascending.
        quotes.sort_by_key(|q| q.date);
        quotes
    }

    fn convert_chart_rows(rows: Vec<FmpChartRow>) -> Vec<Candle> {
        let mut candles: Vec<Candle> = rows
            .into_iter()
            .filter_map(|row| {
                let timestamp =
                    match NaiveDateTime::parse_from_str(&row.date, FMP_TIMESTAMP_FORMAT) {
                        Ok(t) => t,
                        // Daily-resolution chart rows carry a bare date.
                        Err(_) => match NaiveDate::parse_from_str(&row.date, "%Y-%m-%d") {
                            Ok(d) => d.and_hms_opt(0, 0, 0)?,
                            Err(e) => {
                                warn!("Skipping chart row with bad date '{}': {}", row.date, e);
                                return None;
                            }
                        },
                    };
                Some(Candle {
                    timestamp,
                    open: Decimal::from_f64_retain(row.open)?,
                    high: Decimal::from_f64_retain(row.high)?,
                    low: Decimal::from_f64_retain(row.low)?,
                    close: Decimal::from_f64_retain(row.close)?,
                    volume: row.volume.and_then(Decimal::from_f64_retain),
                })
            })
            .collect();

        candles.sort_by_key(|c| c.timestamp);
        candles
    }

    fn convert_news_rows(rows: Vec<FmpNewsRow>, symbol: &str) -> Vec<NewsArticle> {
        rows.into_iter()
            .map(|row| NewsArticle {
                symbol: row.symbol.unwrap_or_else(|| symbol.to_string()),
                published_at: row
                    .published_date
                    .as_deref()
                    .and_then(|d| NaiveDateTime::parse_from_str(d, FMP_TIMESTAMP_FORMAT).ok()),
                title: row.title,
                text: row.text,
                site: row.site,
                url: row.url,
            })
            .collect()
    }
}

#[async_trait]
impl MarketDataProvider for FmpProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_profile(&self, symbol: &str) -> Result<CompanyProfile, MarketDataError> {
        let url = format!(
            "{}/api/v3/profile/{}",
            BASE_URL,
            urlencoding::encode(symbol)
        );
        let rows: Vec<FmpProfile> = self.fetch_json(&url, '?').await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        Ok(CompanyProfile {
            symbol: row.symbol,
            company_name: row.company_name,
            price: row.price.and_then(Decimal::from_f64_retain),
            market_cap: row.market_cap.and_then(Decimal::from_f64_retain),
            pe_ratio: row.pe_ratio.and_then(Decimal::from_f64_retain),
            is_etf: row.is_etf,
            is_fund: row.is_fund,
            is_actively_trading: row.is_actively_trading,
        })
    }

    async fn get_historical_quotes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Quote>, MarketDataError> {
        let url = format!(
            "{}/api/v3/historical-price-full/{}?from={}&to={}",
            BASE_URL,
            urlencoding::encode(symbol),
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
        );
        let response: FmpHistoricalResponse = self.fetch_json(&url, '&').await?;

        if response.historical.is_empty() {
            return Err(MarketDataError::NoDataForRange);
        }

        let quotes = Self::convert_eod_rows(response.historical);
        if quotes.is_empty() {
            return Err(MarketDataError::NoDataForRange);
        }
        Ok(quotes)
    }

    async fn get_intraday_quotes(
        &self,
        symbol: &str,
        interval: Interval,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let url = format!(
            "{}/api/v3/historical-chart/{}/{}?from={}&to={}",
            BASE_URL,
            interval.as_str(),
            urlencoding::encode(symbol),
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
        );
        let rows: Vec<FmpChartRow> = self.fetch_json(&url, '&').await?;

        if rows.is_empty() {
            return Err(MarketDataError::NoDataForRange);
        }

        let candles = Self::convert_chart_rows(rows);
        if candles.is_empty() {
            return Err(MarketDataError::NoDataForRange);
        }
        Ok(candles)
    }

    async fn get_news(&self, symbol: &str) -> Result<Vec<NewsArticle>, MarketDataError> {
        let url = format!(
            "{}/api/v3/stock_news?tickers={}",
            BASE_URL,
            urlencoding::encode(symbol)
        );
        let rows: Vec<FmpNewsRow> = self.fetch_json(&url, '&').await?;
        Ok(Self::convert_news_rows(rows, symbol))
    }

    async fn get_rating(&self, symbol: &str) -> Result<RatingSnapshot, MarketDataError> {
        let url = format!("{}/api/v3/rating/{}", BASE_URL, urlencoding::encode(symbol));
        let rows: Vec<FmpRating> = self.fetch_json(&url, '?').await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        Ok(RatingSnapshot {
            symbol: row.symbol,
            rating_score: Self::decimal(row.rating_score, "ratingScore")?,
            dcf_score: Self::decimal(row.dcf_score, "ratingDetailsDCFScore")?,
            roe_score: Self::decimal(row.roe_score, "ratingDetailsROEScore")?,
            roa_score: Self::decimal(row.roa_score, "ratingDetailsROAScore")?,
            de_score: Self::decimal(row.de_score, "ratingDetailsDEScore")?,
            pe_score: Self::decimal(row.pe_score, "ratingDetailsPEScore")?,
            pb_score: Self::decimal(row.pb_score, "ratingDetailsPBScore")?,
        })
    }

    async fn get_analyst_recommendations(
        &self,
        symbol: &str,
    ) -> Result<AnalystRecommendations, MarketDataError> {
        let url = format!(
            "{}/api/v3/analyst-stock-recommendations/{}",
            BASE_URL,
            urlencoding::encode(symbol)
        );
        let rows: Vec<FmpAnalystRatings> = self.fetch_json(&url, '?').await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        Ok(AnalystRecommendations {
            symbol: row.symbol,
            strong_buy: row.strong_buy,
            buy: row.buy,
            hold: row.hold,
            sell: row.sell,
            strong_sell: row.strong_sell,
        })
    }

    async fn get_dcf_valuation(&self, symbol: &str) -> Result<DcfValuation, MarketDataError> {
        let url = format!(
            "{}/api/v3/discounted-cash-flow/{}",
            BASE_URL,
            urlencoding::encode(symbol)
        );
        let rows: Vec<FmpDcf> = self.fetch_json(&url, '?').await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        Ok(DcfValuation {
            symbol: row.symbol,
            intrinsic_value: Self::decimal(row.dcf, "dcf")?,
            stock_price: Self::decimal(row.stock_price, "Stock Price")?,
        })
    }

    async fn get_income_summary(&self, symbol: &str) -> Result<IncomeSummary, MarketDataError> {
        let url = format!(
            "{}/api/v3/income-statement/{}?limit=1",
            BASE_URL,
            urlencoding::encode(symbol)
        );
        let rows: Vec<FmpIncomeStatement> = self.fetch_json(&url, '&').await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        Ok(IncomeSummary {
            symbol: row.symbol,
            revenue: Self::decimal(row.revenue, "revenue")?,
            net_income: Self::decimal(row.net_income, "netIncome")?,
        })
    }

    async fn screen_companies(&self) -> Result<Vec<ScreenerEntry>, MarketDataError> {
        let url = format!("{}/stable/company-screener", BASE_URL);
        let rows: Vec<FmpScreenerRow> = self.fetch_json(&url, '?').await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let market_cap = Decimal::from_f64_retain(row.market_cap.unwrap_or(0.0))?;
                Some(ScreenerEntry {
                    symbol: row.symbol,
                    company_name: row.company_name,
                    market_cap,
                })
            })
            .collect())
    }
}
