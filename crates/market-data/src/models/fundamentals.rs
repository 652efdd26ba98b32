use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Intrinsic value estimate from a discounted cash flow model, paired with
/// the price the market currently asks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DcfValuation {
    pub symbol: String,

    /// Intrinsic per-share value from the DCF model
    pub intrinsic_value: Decimal,

    /// Current stock price
    pub stock_price: Decimal,
}

/// Headline figures from the most recent income statement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeSummary {
    pub symbol: String,

    /// Trailing revenue in dollars
    pub revenue: Decimal,

    /// Trailing net income in dollars
    pub net_income: Decimal,
}
