use chrono::NaiveDate;

/// Trait for the market-calendar oracle consumed by the estimators.
///
/// Implementations answer whether a calendar date is a trading day and can
/// roll a date backward onto one.
pub trait MarketCalendar: Send + Sync {
    /// Whether the exchange is open for regular trading on `date`.
    fn is_trading_day(&self, date: NaiveDate) -> bool;

    /// The nearest trading day at or before `date`.
    ///
    /// Idempotent: a date that is already a trading day is returned
    /// unchanged.
    fn previous_trading_day(&self, date: NaiveDate) -> NaiveDate {
        let mut current = date;
        while !self.is_trading_day(current) {
            if let Some(prev) = current.pred_opt() {
                current = prev;
            } else {
                // Should not happen for typical date ranges
                break;
            }
        }
        current
    }
}
