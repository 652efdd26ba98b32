//! Rule-based ETF and stock recommendations.
//!
//! Low risk tolerances map straight to broad-market ETFs. Higher tolerances
//! screen the market-cap tier matching the tolerance, keep actively traded
//! individual stocks, and rank them by composite rating.

use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use dcafolio_market_data::MarketDataProvider;

use crate::analyzer::{composite_rating, RatingLabel};
use crate::errors::{Error, Result};

/// $200 billion or more
const MEGA_CAP_THRESHOLD: Decimal = dec!(200_000_000_000);
/// $10 billion or more (but less than mega cap)
const LARGE_CAP_THRESHOLD: Decimal = dec!(10_000_000_000);
/// $2 billion or more (but less than large cap)
const MID_CAP_THRESHOLD: Decimal = dec!(2_000_000_000);

/// Number of ranked picks returned for stock recommendations.
const DEFAULT_PICK_COUNT: usize = 10;

/// The user's risk tolerance on a 1..=5 scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskTolerance {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl TryFrom<u8> for RiskTolerance {
    type Error = Error;

    fn try_from(level: u8) -> Result<Self> {
        match level {
            1 => Ok(RiskTolerance::VeryLow),
            2 => Ok(RiskTolerance::Low),
            3 => Ok(RiskTolerance::Medium),
            4 => Ok(RiskTolerance::High),
            5 => Ok(RiskTolerance::VeryHigh),
            other => Err(Error::Validation(format!(
                "risk tolerance must be between 1 and 5, got {}",
                other
            ))),
        }
    }
}

/// Market capitalization tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CapTier {
    Mega,
    Large,
    Mid,
    Small,
}

impl CapTier {
    pub fn for_market_cap(market_cap: Decimal) -> Self {
        if market_cap >= MEGA_CAP_THRESHOLD {
            CapTier::Mega
        } else if market_cap >= LARGE_CAP_THRESHOLD {
            CapTier::Large
        } else if market_cap >= MID_CAP_THRESHOLD {
            CapTier::Mid
        } else {
            CapTier::Small
        }
    }

    pub fn contains(&self, market_cap: Decimal) -> bool {
        Self::for_market_cap(market_cap) == *self
    }
}

/// One ranked stock pick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPick {
    pub symbol: String,
    pub company_name: String,
    /// Composite rating score, 1..=5
    pub rating: Decimal,
    pub label: RatingLabel,
}

/// What the recommender suggests for a risk tolerance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Recommendation {
    /// A single broad-market ETF
    Etf { symbol: String },
    /// Ranked individual stock picks from a market-cap tier
    Stocks { tier: CapTier, picks: Vec<StockPick> },
}

/// Rule-based recommender over a market data provider.
pub struct Recommender<P> {
    provider: P,
    pick_count: usize,
}

impl<P: MarketDataProvider> Recommender<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            pick_count: DEFAULT_PICK_COUNT,
        }
    }

    pub fn with_pick_count(provider: P, pick_count: usize) -> Self {
        Self {
            provider,
            pick_count,
        }
    }

    pub async fn recommend(&self, risk: RiskTolerance) -> Result<Recommendation> {
        match risk {
            RiskTolerance::VeryLow => Ok(Recommendation::Etf {
                symbol: "VOO".to_string(),
            }),
            RiskTolerance::Low => Ok(Recommendation::Etf {
                symbol: "QQQM".to_string(),
            }),
            RiskTolerance::Medium => self.recommend_tier(CapTier::Mega).await,
            RiskTolerance::High => self.recommend_tier(CapTier::Mid).await,
            RiskTolerance::VeryHigh => self.recommend_tier(CapTier::Small).await,
        }
    }

    /// Screen the tier's constituents, keep actively traded individual
    /// stocks, rank by composite rating descending, and return the top
    /// picks. Symbols whose profile or rating lookups fail are skipped
    /// rather than failing the whole recommendation.
    async fn recommend_tier(&self, tier: CapTier) -> Result<Recommendation> {
        let universe = self.provider.screen_companies().await?;

        let mut picks = Vec::new();
        for entry in universe
            .into_iter()
            .filter(|e| tier.contains(e.market_cap))
        {
            let profile = match self.provider.get_profile(&entry.symbol).await {
                Ok(p) => p,
                Err(e) => {
                    warn!("Skipping {}: profile lookup failed: {}", entry.symbol, e);
                    continue;
                }
            };
            if !profile.is_tradable_stock() {
                continue;
            }

            let rating = match self.rate(&entry.symbol).await {
                Ok(r) => r,
                Err(e) => {
                    warn!("Skipping {}: rating lookup failed: {}", entry.symbol, e);
                    continue;
                }
            };

            picks.push(StockPick {
                symbol: entry.symbol,
                company_name: entry.company_name,
                rating,
                label: RatingLabel::from_score(rating),
            });
        }

        picks.sort_by(|a, b| b.rating.cmp(&a.rating));
        picks.truncate(self.pick_count);

        Ok(Recommendation::Stocks { tier, picks })
    }

    async fn rate(&self, symbol: &str) -> Result<Decimal> {
        let snapshot = self.provider.get_rating(symbol).await?;
        let recommendations = self.provider.get_analyst_recommendations(symbol).await?;
        composite_rating(&snapshot, &recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::result::Result;

    use dcafolio_market_data::{
        AnalystRecommendations, Candle, CompanyProfile, DcfValuation, IncomeSummary, Interval,
        MarketDataError, NewsArticle, Quote, RatingSnapshot, ScreenerEntry,
    };

    struct ScreenerProvider {
        entries: Vec<ScreenerEntry>,
        profiles: HashMap<String, CompanyProfile>,
        scores: HashMap<String, Decimal>,
    }

    impl ScreenerProvider {
        fn new() -> Self {
            Self {
                entries: Vec::new(),
                profiles: HashMap::new(),
                scores: HashMap::new(),
            }
        }

        fn with_company(
            mut self,
            symbol: &str,
            market_cap: Decimal,
            is_etf: bool,
            score: Decimal,
        ) -> Self {
            self.entries.push(ScreenerEntry {
                symbol: symbol.to_string(),
                company_name: format!("{} Inc.", symbol),
                market_cap,
            });
            self.profiles.insert(
                symbol.to_string(),
                CompanyProfile {
                    symbol: symbol.to_string(),
                    company_name: format!("{} Inc.", symbol),
                    price: None,
                    market_cap: Some(market_cap),
                    pe_ratio: None,
                    is_etf,
                    is_fund: false,
                    is_actively_trading: true,
                },
            );
            self.scores.insert(symbol.to_string(), score);
            self
        }
    }

    #[async_trait]
    impl MarketDataProvider for ScreenerProvider {
        fn id(&self) -> &'static str {
            "SCREENER"
        }

        async fn get_profile(&self, symbol: &str) -> Result<CompanyProfile, MarketDataError> {
            self.profiles
                .get(symbol)
                .cloned()
                .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))
        }

        async fn get_historical_quotes(
            &self,
            _symbol: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<Quote>, MarketDataError> {
            Err(MarketDataError::NoDataForRange)
        }

        async fn get_intraday_quotes(
            &self,
            _symbol: &str,
            _interval: Interval,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<Candle>, MarketDataError> {
            Err(MarketDataError::NoDataForRange)
        }

        async fn get_news(&self, _symbol: &str) -> Result<Vec<NewsArticle>, MarketDataError> {
            Ok(Vec::new())
        }

        async fn get_rating(&self, symbol: &str) -> Result<RatingSnapshot, MarketDataError> {
            let score = self
                .scores
                .get(symbol)
                .copied()
                .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;
            Ok(RatingSnapshot {
                symbol: symbol.to_string(),
                rating_score: score,
                dcf_score: score,
                roe_score: score,
                roa_score: score,
                de_score: score,
                pe_score: score,
                pb_score: score,
            })
        }

        async fn get_analyst_recommendations(
            &self,
            symbol: &str,
        ) -> Result<AnalystRecommendations, MarketDataError> {
            // One analyst per bucketed score keeps the analyst component
            // equal to the snapshot scores.
            let score = self
                .scores
                .get(symbol)
                .copied()
                .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;
            let mut recs = AnalystRecommendations {
                symbol: symbol.to_string(),
                strong_buy: 0,
                buy: 0,
                hold: 0,
                sell: 0,
                strong_sell: 0,
            };
            match score.round().to_string().as_str() {
                "5" => recs.strong_buy = 1,
                "4" => recs.buy = 1,
                "2" => recs.sell = 1,
                "1" => recs.strong_sell = 1,
                _ => recs.hold = 1,
            }
            Ok(recs)
        }

        async fn get_dcf_valuation(&self, symbol: &str) -> Result<DcfValuation, MarketDataError> {
            Err(MarketDataError::SymbolNotFound(symbol.to_string()))
        }

        async fn get_income_summary(&self, symbol: &str) -> Result<IncomeSummary, MarketDataError> {
            Err(MarketDataError::SymbolNotFound(symbol.to_string()))
        }

        async fn screen_companies(&self) -> Result<Vec<ScreenerEntry>, MarketDataError> {
            Ok(self.entries.clone())
        }
    }

    use rust_decimal_macros::dec;

    #[test]
    fn test_cap_tier_thresholds() {
        assert_eq!(CapTier::for_market_cap(dec!(250_000_000_000)), CapTier::Mega);
        assert_eq!(CapTier::for_market_cap(dec!(200_000_000_000)), CapTier::Mega);
        assert_eq!(CapTier::for_market_cap(dec!(50_000_000_000)), CapTier::Large);
        assert_eq!(CapTier::for_market_cap(dec!(5_000_000_000)), CapTier::Mid);
        assert_eq!(CapTier::for_market_cap(dec!(500_000_000)), CapTier::Small);
    }

    #[test]
    fn test_risk_tolerance_from_level() {
        assert_eq!(RiskTolerance::try_from(1).unwrap(), RiskTolerance::VeryLow);
        assert_eq!(RiskTolerance::try_from(5).unwrap(), RiskTolerance::VeryHigh);
        assert!(RiskTolerance::try_from(0).is_err());
        assert!(RiskTolerance::try_from(6).is_err());
    }

    #[tokio::test]
    async fn test_low_risk_maps_to_etfs() {
        let recommender = Recommender::new(ScreenerProvider::new());
        assert_eq!(
            recommender.recommend(RiskTolerance::VeryLow).await.unwrap(),
            Recommendation::Etf {
                symbol: "VOO".to_string()
            }
        );
        assert_eq!(
            recommender.recommend(RiskTolerance::Low).await.unwrap(),
            Recommendation::Etf {
                symbol: "QQQM".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_mega_cap_picks_ranked_by_rating() {
        let provider = ScreenerProvider::new()
            .with_company("AAA", dec!(300_000_000_000), false, dec!(3))
            .with_company("BBB", dec!(400_000_000_000), false, dec!(5))
            .with_company("MID", dec!(5_000_000_000), false, dec!(4));
        let recommender = Recommender::new(provider);

        let recommendation = recommender.recommend(RiskTolerance::Medium).await.unwrap();
        match recommendation {
            Recommendation::Stocks { tier, picks } => {
                assert_eq!(tier, CapTier::Mega);
                let symbols: Vec<&str> = picks.iter().map(|p| p.symbol.as_str()).collect();
                // MID is below the mega-cap threshold and excluded.
                assert_eq!(symbols, vec!["BBB", "AAA"]);
                assert_eq!(picks[0].label, RatingLabel::StrongBuy);
            }
            other => panic!("expected stock picks, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_etfs_are_excluded_from_stock_picks() {
        let provider = ScreenerProvider::new()
            .with_company("AAA", dec!(300_000_000_000), false, dec!(3))
            .with_company("ETF", dec!(400_000_000_000), true, dec!(5));
        let recommender = Recommender::new(provider);

        let recommendation = recommender.recommend(RiskTolerance::Medium).await.unwrap();
        match recommendation {
            Recommendation::Stocks { picks, .. } => {
                assert_eq!(picks.len(), 1);
                assert_eq!(picks[0].symbol, "AAA");
            }
            other => panic!("expected stock picks, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_pick_count_truncates() {
        let mut provider = ScreenerProvider::new();
        for i in 0..5 {
            provider = provider.with_company(
                &format!("S{}", i),
                dec!(300_000_000_000),
                false,
                Decimal::from(i % 5 + 1),
            );
        }
        let recommender = Recommender::with_pick_count(provider, 3);
        let recommendation = recommender.recommend(RiskTolerance::Medium).await.unwrap();
        match recommendation {
            Recommendation::Stocks { picks, .. } => assert_eq!(picks.len(), 3),
            other => panic!("expected stock picks, got {:?}", other),
        }
    }
}
