use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the company screener: just enough to bucket by market cap
/// and look the symbol up in detail afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenerEntry {
    pub symbol: String,
    pub company_name: String,

    /// Market capitalization in dollars
    pub market_cap: Decimal,
}
