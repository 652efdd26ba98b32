//! DCA estimator domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{MONTHS_PER_YEAR, TRADING_DAYS_PER_YEAR};

/// A periodic contribution plan.
///
/// Every frequency normalizes onto an assumed 252-trading-day year, so the
/// estimator downstream only ever sees a per-trading-day amount.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "frequency", content = "amount", rename_all = "camelCase")]
pub enum InvestmentPlan {
    /// A fixed amount invested every trading day
    Daily(Decimal),
    /// A fixed amount invested every month
    Monthly(Decimal),
    /// A fixed amount invested every year
    Yearly(Decimal),
}

impl InvestmentPlan {
    /// The contribution amount as entered, before normalization.
    pub fn amount(&self) -> Decimal {
        match self {
            InvestmentPlan::Daily(a) | InvestmentPlan::Monthly(a) | InvestmentPlan::Yearly(a) => {
                *a
            }
        }
    }

    /// The per-trading-day equivalent of this plan.
    ///
    /// Daily plans pass through; monthly plans spread `amount * 12` over
    /// 252 trading days; yearly plans spread `amount` over 252 trading
    /// days. `monthly(a)` therefore equals `yearly(a * 12)`.
    pub fn daily_amount(&self) -> Decimal {
        let trading_days = Decimal::from(TRADING_DAYS_PER_YEAR);
        match self {
            InvestmentPlan::Daily(a) => *a,
            InvestmentPlan::Monthly(a) => *a * Decimal::from(MONTHS_PER_YEAR) / trading_days,
            InvestmentPlan::Yearly(a) => *a / trading_days,
        }
    }
}

/// One estimation request.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DcaRequest {
    /// Ticker symbol; validated only by whether the price source returns
    /// data for it.
    pub symbol: String,
    /// Requested start date; rolled back to the nearest trading day.
    pub start: NaiveDate,
    /// End date of the contribution window (inclusive).
    pub end: NaiveDate,
    pub plan: InvestmentPlan,
}

/// What the position would be worth today, computed only when the request's
/// end date is not in the future.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentValuation {
    /// Most recent trading-day closing price
    pub price: Decimal,
    /// Share count valued at that price
    pub value: Decimal,
    /// Net growth over the invested amount, in percent
    pub net_growth_pct: Decimal,
    /// Net growth in dollars
    pub net_growth: Decimal,
    /// Annualized internal rate of return, in percent
    pub annualized_irr_pct: Decimal,
}

/// Result of a DCA estimation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DcaEstimate {
    pub symbol: String,

    /// Start date actually used, after rolling back to a trading day
    pub start: NaiveDate,

    /// Whether the requested start date was adjusted
    pub start_adjusted: bool,

    pub end: NaiveDate,

    /// Per-trading-day contribution the plan normalized to
    pub daily_amount: Decimal,

    /// Number of trading days contributed on
    pub contribution_days: usize,

    /// Mean closing price over the window
    pub average_price: Decimal,

    /// Closing price on the last trading day of the window
    pub latest_close: Decimal,

    /// Total contributed: daily amount times contribution days
    pub invested: Decimal,

    /// Absolute rate of return of the averaged position, in percent
    pub return_pct: Decimal,

    /// Dollar profit over the invested amount
    pub profit: Decimal,

    /// Invested amount plus profit
    pub portfolio_value: Decimal,

    /// Number of shares the portfolio value buys at the latest close
    pub shares: Decimal,

    /// Present-day valuation; `None` when the end date is in the future
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<CurrentValuation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_daily_amount_passes_through() {
        assert_eq!(InvestmentPlan::Daily(dec!(10)).daily_amount(), dec!(10));
    }

    #[test]
    fn test_monthly_normalization() {
        // $210/month = $2520/year = $10 per trading day
        assert_eq!(InvestmentPlan::Monthly(dec!(210)).daily_amount(), dec!(10));
    }

    #[test]
    fn test_yearly_normalization() {
        assert_eq!(InvestmentPlan::Yearly(dec!(2520)).daily_amount(), dec!(10));
    }

    #[test]
    fn test_monthly_equals_yearly_times_twelve() {
        let amount = dec!(137.50);
        assert_eq!(
            InvestmentPlan::Monthly(amount).daily_amount(),
            InvestmentPlan::Yearly(amount * dec!(12)).daily_amount()
        );
    }

    #[test]
    fn test_plan_serde_tagging() {
        let plan = InvestmentPlan::Monthly(dec!(100));
        let json = serde_json::to_string(&plan).unwrap();
        assert_eq!(json, r#"{"frequency":"monthly","amount":100.0}"#);
        let parsed: InvestmentPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, plan);
    }
}
