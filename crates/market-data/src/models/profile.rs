use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Company identity and classification data.
///
/// The classification flags drive the stock recommender: only actively
/// trading, non-ETF, non-fund symbols are treated as individual stocks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub symbol: String,
    pub company_name: String,

    /// Last traded price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,

    /// Market capitalization in dollars
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<Decimal>,

    /// Trailing price-to-earnings ratio
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<Decimal>,

    pub is_etf: bool,
    pub is_fund: bool,
    pub is_actively_trading: bool,
}

impl CompanyProfile {
    /// Whether the symbol is an individual stock that still trades.
    pub fn is_tradable_stock(&self) -> bool {
        self.is_actively_trading && !self.is_etf && !self.is_fund
    }
}
