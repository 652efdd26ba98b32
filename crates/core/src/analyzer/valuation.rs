//! DCF valuation calls and company financial summaries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use dcafolio_market_data::MarketDataProvider;

use crate::errors::Result;

/// Where the market price sits relative to the DCF intrinsic value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValuationCall {
    Undervalued,
    Overvalued,
    FairlyValued,
}

impl ValuationCall {
    pub fn classify(current_price: Decimal, intrinsic_value: Decimal) -> Self {
        if current_price < intrinsic_value {
            ValuationCall::Undervalued
        } else if current_price > intrinsic_value {
            ValuationCall::Overvalued
        } else {
            ValuationCall::FairlyValued
        }
    }
}

/// Headline financials for a symbol, assembled from the profile, the most
/// recent income statement, and the DCF valuation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub symbol: String,
    pub company_name: String,

    /// Trailing revenue in dollars
    pub revenue: Decimal,

    /// Trailing net income in dollars
    pub net_income: Decimal,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<Decimal>,

    pub intrinsic_value: Decimal,
    pub current_price: Decimal,
    pub valuation: ValuationCall,
}

/// Service that assembles [`FinancialSummary`] values.
pub struct FinancialsService<P> {
    provider: P,
}

impl<P: MarketDataProvider> FinancialsService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub async fn summarize(&self, symbol: &str) -> Result<FinancialSummary> {
        let profile = self.provider.get_profile(symbol).await?;
        let income = self.provider.get_income_summary(symbol).await?;
        let dcf = self.provider.get_dcf_valuation(symbol).await?;

        Ok(FinancialSummary {
            symbol: symbol.to_string(),
            company_name: profile.company_name,
            revenue: income.revenue,
            net_income: income.net_income,
            market_cap: profile.market_cap,
            pe_ratio: profile.pe_ratio,
            intrinsic_value: dcf.intrinsic_value,
            current_price: dcf.stock_price,
            valuation: ValuationCall::classify(dcf.stock_price, dcf.intrinsic_value),
        })
    }
}
