//! Weekday calendar helpers.

use chrono::{Datelike, NaiveDate, Weekday};

/// Monday through Friday. Exchange holidays are not modeled.
#[inline]
pub fn is_trading_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Every weekday in `[start, end]`, ascending. Empty when `start > end`.
pub fn trading_days(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start
        .iter_days()
        .take_while(move |day| *day <= end)
        .filter(|day| is_trading_day(*day))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekends_skipped() {
        // Fri 2024-01-05 through Tue 2024-01-09
        let days: Vec<_> = trading_days(date(2024, 1, 5), date(2024, 1, 9)).collect();

        assert_eq!(days, vec![date(2024, 1, 5), date(2024, 1, 8), date(2024, 1, 9)]);
    }

    #[test]
    fn test_weekend_only_range_is_empty() {
        assert_eq!(trading_days(date(2024, 1, 6), date(2024, 1, 7)).count(), 0);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        assert_eq!(trading_days(date(2024, 2, 1), date(2024, 1, 1)).count(), 0);
    }

    #[test]
    fn test_full_year_count() {
        // 2023 has 260 weekdays
        assert_eq!(trading_days(date(2023, 1, 1), date(2023, 12, 31)).count(), 260);
    }
}
