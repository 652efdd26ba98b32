//! Retirement projection domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What the user tells us about their retirement plans.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementInput {
    /// Estimated annual expenditure: living expenses, bills, and
    /// discretionary costs.
    pub annual_expenses: Decimal,
    pub current_age: u32,
    pub retirement_age: u32,
}

/// Projected savings target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementProjection {
    pub years_until_retirement: u32,

    /// Savings target in today's dollars: annual expenses times the
    /// FIRE expense multiple.
    pub target_today: Decimal,

    /// The target compounded forward by average annual inflation; the
    /// future value to have saved at the time of retirement.
    pub inflation_adjusted_target: Decimal,
}
