//! Retirement projection arithmetic.

use rust_decimal::{Decimal, MathematicalOps};

use crate::constants::{AVERAGE_ANNUAL_INFLATION_RATE, FIRE_EXPENSE_MULTIPLE};
use crate::errors::{Error, Result};
use crate::retirement::{RetirementInput, RetirementProjection};

/// Project the savings target for a retirement plan.
///
/// The target is the FIRE expense multiple of annual expenses, compounded
/// forward by the long-run average annual inflation rate over the years
/// remaining until retirement.
pub fn project_retirement(input: &RetirementInput) -> Result<RetirementProjection> {
    if input.annual_expenses < Decimal::ZERO {
        return Err(Error::Validation(
            "annual expenses must not be negative".to_string(),
        ));
    }
    if input.retirement_age < input.current_age {
        return Err(Error::Validation(
            "retirement age must not be before current age".to_string(),
        ));
    }

    let years_until_retirement = input.retirement_age - input.current_age;
    let target_today = input.annual_expenses * FIRE_EXPENSE_MULTIPLE;
    let growth =
        (Decimal::ONE + AVERAGE_ANNUAL_INFLATION_RATE).powi(i64::from(years_until_retirement));

    Ok(RetirementProjection {
        years_until_retirement,
        target_today,
        inflation_adjusted_target: target_today * growth,
    })
}
