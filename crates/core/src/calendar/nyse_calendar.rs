//! NYSE trading-day rules: weekends plus the exchange's full-day holidays.

use chrono::{Datelike, NaiveDate, Weekday};

use super::MarketCalendar;

/// Market calendar for the New York Stock Exchange.
///
/// Covers the regular full-day holiday schedule: New Year's Day, Martin
/// Luther King Jr. Day, Washington's Birthday, Good Friday, Memorial Day,
/// Juneteenth (from 2022), Independence Day, Labor Day, Thanksgiving, and
/// Christmas. Saturday holidays are observed the preceding Friday and
/// Sunday holidays the following Monday, except New Year's Day falling on
/// a Saturday, which the exchange does not observe.
///
/// Unscheduled closures (mourning days, weather) are not modeled.
#[derive(Clone, Copy, Debug, Default)]
pub struct NyseCalendar;

impl NyseCalendar {
    pub fn new() -> Self {
        Self
    }

    fn holidays(year: i32) -> Vec<NaiveDate> {
        let mut days = Vec::with_capacity(10);

        // New Year's Day: no Friday observance when Jan 1 is a Saturday.
        if let Some(new_year) = NaiveDate::from_ymd_opt(year, 1, 1) {
            match new_year.weekday() {
                Weekday::Sat => {}
                Weekday::Sun => days.extend(new_year.succ_opt()),
                _ => days.push(new_year),
            }
        }

        days.extend(nth_weekday_of_month(year, 1, Weekday::Mon, 3)); // MLK Day
        days.extend(nth_weekday_of_month(year, 2, Weekday::Mon, 3)); // Washington's Birthday
        days.extend(easter_sunday(year).and_then(|d| d.checked_sub_days(chrono::Days::new(2)))); // Good Friday
        days.extend(last_weekday_of_month(year, 5, Weekday::Mon)); // Memorial Day
        if year >= 2022 {
            days.extend(observed(NaiveDate::from_ymd_opt(year, 6, 19))); // Juneteenth
        }
        days.extend(observed(NaiveDate::from_ymd_opt(year, 7, 4))); // Independence Day
        days.extend(nth_weekday_of_month(year, 9, Weekday::Mon, 1)); // Labor Day
        days.extend(nth_weekday_of_month(year, 11, Weekday::Thu, 4)); // Thanksgiving
        days.extend(observed(NaiveDate::from_ymd_opt(year, 12, 25))); // Christmas

        days
    }
}

impl MarketCalendar for NyseCalendar {
    fn is_trading_day(&self, date: NaiveDate) -> bool {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => false,
            _ => !Self::holidays(date.year()).contains(&date),
        }
    }
}

/// Saturday holidays observed Friday, Sunday holidays observed Monday.
fn observed(date: Option<NaiveDate>) -> Option<NaiveDate> {
    let date = date?;
    match date.weekday() {
        Weekday::Sat => date.pred_opt(),
        Weekday::Sun => date.succ_opt(),
        _ => Some(date),
    }
}

fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = (7 + weekday.num_days_from_monday() - first.weekday().num_days_from_monday()) % 7;
    first.checked_add_days(chrono::Days::new(u64::from(offset + (n - 1) * 7)))
}

fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }?;
    let last = next_month.pred_opt()?;
    let offset = (7 + last.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    last.checked_sub_days(chrono::Days::new(u64::from(offset)))
}

/// Easter Sunday by the anonymous Gregorian computus.
fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}
