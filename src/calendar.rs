//! Month arithmetic on calendar dates

use crate::error::{ProjectionError, Result};
use chrono::{Datelike, Months, NaiveDate};

/// Date `months` calendar months after `date` (day clamped to month end)
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months)).ok_or_else(|| {
        ProjectionError::Computation(format!("date overflow adding {} months to {}", months, date))
    })
}

/// Whole calendar months from `from` to `to`, ignoring the day of month.
/// Negative when `to` falls in an earlier month.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to.year() as i64 - from.year() as i64) * 12 + (to.month() as i64 - from.month() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_months_clamps_day() {
        assert_eq!(add_months(date(2026, 1, 31), 1).unwrap(), date(2026, 2, 28));
        assert_eq!(add_months(date(2026, 10, 16), 0).unwrap(), date(2026, 10, 16));
        assert_eq!(add_months(date(2026, 10, 16), 14).unwrap(), date(2027, 12, 16));
    }

    #[test]
    fn test_months_between() {
        assert_eq!(months_between(date(2026, 10, 16), date(2027, 10, 1)), 12);
        assert_eq!(months_between(date(2026, 10, 16), date(2026, 10, 30)), 0);
        assert_eq!(months_between(date(2026, 10, 16), date(2026, 8, 30)), -2);
    }
}
