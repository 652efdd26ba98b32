//! Trading-day calendar for the reference exchange.

mod calendar_traits;
mod nyse_calendar;

pub use calendar_traits::MarketCalendar;
pub use nyse_calendar::NyseCalendar;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Canonical timezone for market dates. Quotes and "today" comparisons are
/// anchored to the exchange's local calendar date, not UTC.
pub const DEFAULT_MARKET_TZ: Tz = chrono_tz::America::New_York;

/// Converts a UTC instant to a market date in the given timezone.
pub fn market_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Today's calendar date at the exchange.
/// Equivalent to `market_date_from_utc(Utc::now(), DEFAULT_MARKET_TZ)`.
pub fn today_market_date() -> NaiveDate {
    market_date_from_utc(Utc::now(), DEFAULT_MARKET_TZ)
}
