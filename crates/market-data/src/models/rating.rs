use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A provider's composite rating for a symbol with its detail scores.
///
/// All scores are on the provider's 1..=5 scale (5 = best).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSnapshot {
    pub symbol: String,

    /// Overall rating score
    pub rating_score: Decimal,

    /// Discounted cash flow score
    pub dcf_score: Decimal,

    /// Return on equity score
    pub roe_score: Decimal,

    /// Return on assets score
    pub roa_score: Decimal,

    /// Debt to equity score
    pub de_score: Decimal,

    /// Price to earnings score
    pub pe_score: Decimal,

    /// Price to book score
    pub pb_score: Decimal,
}

impl RatingSnapshot {
    /// The overall score followed by the six detail scores.
    pub fn all_scores(&self) -> [Decimal; 7] {
        [
            self.rating_score,
            self.dcf_score,
            self.roe_score,
            self.roa_score,
            self.de_score,
            self.pe_score,
            self.pb_score,
        ]
    }
}

/// Counts of analyst recommendations by bucket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalystRecommendations {
    pub symbol: String,
    pub strong_buy: u32,
    pub buy: u32,
    pub hold: u32,
    pub sell: u32,
    pub strong_sell: u32,
}

impl AnalystRecommendations {
    /// Total number of analysts across all buckets.
    pub fn total_analysts(&self) -> u32 {
        self.strong_buy + self.buy + self.hold + self.sell + self.strong_sell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_all_scores_ordering() {
        let snapshot = RatingSnapshot {
            symbol: "AAPL".to_string(),
            rating_score: dec!(4),
            dcf_score: dec!(3),
            roe_score: dec!(5),
            roa_score: dec!(4),
            de_score: dec!(2),
            pe_score: dec!(3),
            pb_score: dec!(1),
        };
        assert_eq!(
            snapshot.all_scores(),
            [dec!(4), dec!(3), dec!(5), dec!(4), dec!(2), dec!(3), dec!(1)]
        );
    }

    #[test]
    fn test_total_analysts() {
        let recs = AnalystRecommendations {
            symbol: "AAPL".to_string(),
            strong_buy: 10,
            buy: 20,
            hold: 8,
            sell: 1,
            strong_sell: 1,
        };
        assert_eq!(recs.total_analysts(), 40);
    }
}
