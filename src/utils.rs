use crate::period::Period;
use chrono::{NaiveDate, NaiveDateTime};

/// Last calendar day of the month; `NaiveDate::MAX` past chrono's range.
pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Every month-end falling within `start..=end`, oldest first.
pub fn month_ends_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    std::iter::successors(Some(Period::from_date(start)), |period| Some(period.next()))
        .map(|period| period.last_day())
        .take_while(|month_end| *month_end <= end && *month_end < NaiveDate::MAX)
        .collect()
}

/// Parses the date layouts seen in transaction exports.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD` and a `YYYY-MM-DD HH:MM:SS` timestamp
/// (the time part is dropped). Returns `None` for anything else.
pub fn parse_transaction_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(timestamp.date());
        }
    }

    None
}

/// Rounds to one decimal place, ties to even.
pub fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
