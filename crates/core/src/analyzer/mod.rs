//! Stock analysis: rating aggregation, valuation calls, and news
//! sentiment.

mod ratings;
mod sentiment;
mod valuation;

pub use ratings::{composite_rating, weighted_analyst_score, RatingLabel, RatingReport, RatingService};
pub use sentiment::{
    ArticleSentiment, SentimentAnalyzer, SentimentClassifier, SentimentLabel, SentimentReport,
};
pub use valuation::{FinancialSummary, FinancialsService, ValuationCall};
