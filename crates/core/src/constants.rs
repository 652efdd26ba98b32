//! Shared constants for estimator calculations.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Trading days in a year on the reference exchange. All contribution
/// frequencies are normalized onto this assumption.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Months in a year
pub const MONTHS_PER_YEAR: u32 = 12;

/// Decimal precision for intermediate calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display values
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Expense multiple targeted for a comfortable ("fat FIRE") retirement
pub const FIRE_EXPENSE_MULTIPLE: Decimal = dec!(50);

/// Long-run average annual US inflation rate used to project retirement
/// targets forward
pub const AVERAGE_ANNUAL_INFLATION_RATE: Decimal = dec!(0.037);
