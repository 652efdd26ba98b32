//! Rating aggregation.
//!
//! Combines the provider's composite rating snapshot with a score derived
//! from analyst recommendation counts into a single 1..=5 number.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use dcafolio_market_data::{AnalystRecommendations, MarketDataProvider, RatingSnapshot};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::{Error, Result};

const STRONG_BUY_SCORE: u32 = 5;
const BUY_SCORE: u32 = 4;
const HOLD_SCORE: u32 = 3;
const SELL_SCORE: u32 = 2;
const STRONG_SELL_SCORE: u32 = 1;

/// Position of a score on the strong-sell..strong-buy scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RatingLabel {
    StrongSell,
    Sell,
    Neutral,
    Buy,
    StrongBuy,
}

impl RatingLabel {
    /// Nearest label for a 1..=5 score; out-of-range scores clamp to the
    /// ends of the scale.
    pub fn from_score(score: Decimal) -> Self {
        let rounded = score.round();
        if rounded <= Decimal::ONE {
            RatingLabel::StrongSell
        } else if rounded == Decimal::TWO {
            RatingLabel::Sell
        } else if rounded == Decimal::from(3u32) {
            RatingLabel::Neutral
        } else if rounded == Decimal::from(4u32) {
            RatingLabel::Buy
        } else {
            RatingLabel::StrongBuy
        }
    }
}

/// Composite rating for a symbol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingReport {
    pub symbol: String,
    /// Composite 1..=5 score, rounded to two decimal places
    pub score: Decimal,
    pub label: RatingLabel,
}

/// Analyst recommendation counts collapsed to one 1..=5 score: each bucket
/// weighted by its scale position, averaged over the analyst count.
pub fn weighted_analyst_score(recommendations: &AnalystRecommendations) -> Result<Decimal> {
    let total_analysts = recommendations.total_analysts();
    if total_analysts == 0 {
        return Err(Error::Validation(format!(
            "no analyst recommendations for {}",
            recommendations.symbol
        )));
    }

    let total_score = STRONG_BUY_SCORE * recommendations.strong_buy
        + BUY_SCORE * recommendations.buy
        + HOLD_SCORE * recommendations.hold
        + SELL_SCORE * recommendations.sell
        + STRONG_SELL_SCORE * recommendations.strong_sell;

    Ok(Decimal::from(total_score) / Decimal::from(total_analysts))
}

/// Mean of the provider's seven rating scores and the weighted analyst
/// score, rounded to two decimal places.
pub fn composite_rating(
    snapshot: &RatingSnapshot,
    recommendations: &AnalystRecommendations,
) -> Result<Decimal> {
    let analyst_score = weighted_analyst_score(recommendations)?;
    let scores = snapshot.all_scores();
    let sum: Decimal = scores.iter().copied().sum::<Decimal>() + analyst_score;
    let count = Decimal::from(scores.len() as u32 + 1);
    Ok((sum / count).round_dp(DISPLAY_DECIMAL_PRECISION))
}

/// Service wrapper that fetches both rating inputs for a symbol.
pub struct RatingService<P> {
    provider: P,
}

impl<P: MarketDataProvider> RatingService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub async fn rate(&self, symbol: &str) -> Result<RatingReport> {
        let snapshot = self.provider.get_rating(symbol).await?;
        let recommendations = self.provider.get_analyst_recommendations(symbol).await?;
        let score = composite_rating(&snapshot, &recommendations)?;

        Ok(RatingReport {
            symbol: symbol.to_string(),
            score,
            label: RatingLabel::from_score(score),
        })
    }
}
