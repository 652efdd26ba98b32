//! News sentiment aggregation.
//!
//! The classifier itself is an external collaborator (a pretrained model
//! served elsewhere); this module defines the seam and averages per-article
//! compound scores into an overall call for a symbol.

use log::debug;
use serde::{Deserialize, Serialize};

use dcafolio_market_data::MarketDataProvider;

use crate::errors::{Error, Result};

/// Average compound score above which the overall sentiment is positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;

/// Average compound score below which the overall sentiment is negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Trait for sentiment classifiers.
///
/// Returns a compound score in `[-1.0, 1.0]`: negative for bearish text,
/// positive for bullish text, zero for neutral.
pub trait SentimentClassifier: Send + Sync {
    fn score(&self, text: &str) -> f64;
}

/// Overall sentiment bucket for an average compound score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn from_score(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if score < NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

/// One article's sentiment contribution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSentiment {
    pub title: String,
    pub url: String,
    pub score: f64,
}

/// Aggregated sentiment for a symbol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentReport {
    pub symbol: String,
    pub average_score: f64,
    pub label: SentimentLabel,
    pub articles: Vec<ArticleSentiment>,
}

/// Service that scores recent news for a symbol.
pub struct SentimentAnalyzer<P, S> {
    provider: P,
    classifier: S,
}

impl<P, S> SentimentAnalyzer<P, S>
where
    P: MarketDataProvider,
    S: SentimentClassifier,
{
    pub fn new(provider: P, classifier: S) -> Self {
        Self { provider, classifier }
    }

    /// Fetch recent news for `symbol`, score each article's title and body,
    /// and average the scores. Articles with no scorable text are skipped;
    /// a symbol with no scorable articles is a validation error.
    pub async fn analyze(&self, symbol: &str) -> Result<SentimentReport> {
        let articles = self.provider.get_news(symbol).await?;

        let mut scored = Vec::with_capacity(articles.len());
        for article in &articles {
            if !article.has_content() {
                continue;
            }
            let score = self.classifier.score(&article.content());
            debug!("Scored article '{}': {:.3}", article.title, score);
            scored.push(ArticleSentiment {
                title: article.title.clone(),
                url: article.url.clone(),
                score,
            });
        }

        if scored.is_empty() {
            return Err(Error::Validation(format!(
                "no scorable news articles for {}",
                symbol
            )));
        }

        let average_score = scored.iter().map(|a| a.score).sum::<f64>() / scored.len() as f64;

        Ok(SentimentReport {
            symbol: symbol.to_string(),
            average_score,
            label: SentimentLabel::from_score(average_score),
            articles: scored,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::result::Result;

    use dcafolio_market_data::{
        AnalystRecommendations, Candle, CompanyProfile, DcfValuation, IncomeSummary, Interval,
        MarketDataError, NewsArticle, Quote, RatingSnapshot, ScreenerEntry,
    };

    struct NewsOnlyProvider {
        articles: Vec<NewsArticle>,
    }

    #[async_trait]
    impl MarketDataProvider for NewsOnlyProvider {
        fn id(&self) -> &'static str {
            "NEWS_ONLY"
        }

        async fn get_profile(&self, symbol: &str) -> Result<CompanyProfile, MarketDataError> {
            Err(MarketDataError::SymbolNotFound(symbol.to_string()))
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
            Ok(self.articles.clone())
        }

        async fn get_rating(&self, symbol: &str) -> Result<RatingSnapshot, MarketDataError> {
            Err(MarketDataError::SymbolNotFound(symbol.to_string()))
        }

        async fn get_analyst_recommendations(
            &self,
            symbol: &str,
        ) -> Result<AnalystRecommendations, MarketDataError> {
            Err(MarketDataError::SymbolNotFound(symbol.to_string()))
        }

        async fn get_dcf_valuation(&self, symbol: &str) -> Result<DcfValuation, MarketDataError> {
            Err(MarketDataError::SymbolNotFound(symbol.to_string()))
        }

        async fn get_income_summary(&self, symbol: &str) -> Result<IncomeSummary, MarketDataError> {
            Err(MarketDataError::SymbolNotFound(symbol.to_string()))
        }

        async fn screen_companies(&self) -> Result<Vec<ScreenerEntry>, MarketDataError> {
            Ok(Vec::new())
        }
    }

    /// Scores by keyword so tests control the outcome.
    struct KeywordClassifier;

    impl SentimentClassifier for KeywordClassifier {
        fn score(&self, text: &str) -> f64 {
            if text.contains("beats") {
                0.8
            } else if text.contains("misses") {
                -0.6
            } else {
                0.0
            }
        }
    }

    fn article(title: &str, text: &str) -> NewsArticle {
        NewsArticle {
            symbol: "AAPL".to_string(),
            published_at: None,
            title: title.to_string(),
            text: text.to_string(),
            site: None,
            url: format!("https://example.com/{}", title.len()),
        }
    }

    #[tokio::test]
    async fn test_positive_news_averages_positive() {
        let analyzer = SentimentAnalyzer::new(
            NewsOnlyProvider {
                articles: vec![
                    article("Apple beats estimates", "strong quarter"),
                    article("Quiet day", "nothing to report"),
                ],
            },
            KeywordClassifier,
        );
        let report = analyzer.analyze("AAPL").await.unwrap();
        assert_eq!(report.articles.len(), 2);
        assert!((report.average_score - 0.4).abs() < 1e-12);
        assert_eq!(report.label, SentimentLabel::Positive);
    }

    #[tokio::test]
    async fn test_blank_articles_are_skipped() {
        let analyzer = SentimentAnalyzer::new(
            NewsOnlyProvider {
                articles: vec![article("", ""), article("Apple misses targets", "weak")],
            },
            KeywordClassifier,
        );
        let report = analyzer.analyze("AAPL").await.unwrap();
        assert_eq!(report.articles.len(), 1);
        assert_eq!(report.label, SentimentLabel::Negative);
    }

    #[tokio::test]
    async fn test_no_scorable_articles_is_an_error() {
        let analyzer = SentimentAnalyzer::new(
            NewsOnlyProvider {
                articles: vec![article("", "")],
            },
            KeywordClassifier,
        );
        assert!(matches!(
            analyzer.analyze("AAPL").await,
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_neutral_band_is_inclusive() {
        assert_eq!(SentimentLabel::from_score(0.05), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(-0.05), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(0.051), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_score(-0.051), SentimentLabel::Negative);
    }
}
