//! Human-readable formatting for large dollar amounts.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const MILLION: Decimal = dec!(1_000_000);
const BILLION: Decimal = dec!(1_000_000_000);
const TRILLION: Decimal = dec!(1_000_000_000_000);

/// Format a dollar amount with a million/billion/trillion suffix.
///
/// Values below a million (including negatives) are rendered plain with
/// two decimal places.
pub fn format_dollar_value(value: Decimal) -> String {
    if value >= TRILLION {
        format!("{:.2} trillion", value / TRILLION)
    } else if value >= BILLION {
        format!("{:.2} billion", value / BILLION)
    } else if value >= MILLION {
        format!("{:.2} million", value / MILLION)
    } else {
        format!("{:.2}", value)
    }
}
