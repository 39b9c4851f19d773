//! Business-day counting.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::models::HolidayCalendar;

/// Counts business days in `[start, end]` inclusive.
///
/// A business day is Monday through Friday that is not a holiday for the
/// given scope: national entries always exclude the day; region- or
/// municipality-scoped entries exclude it only when the scope matches.
/// Returns 0 when `start > end`.
///
/// # Example
///
/// ```
/// use benefit_engine::calendar::business_days;
/// use benefit_engine::models::HolidayCalendar;
/// use chrono::NaiveDate;
///
/// let cal = HolidayCalendar::default();
/// let start = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 6, 6).unwrap();
/// assert_eq!(business_days(start, end, None, None, &cal), 5);
/// ```
pub fn business_days(
    start: NaiveDate,
    end: NaiveDate,
    region: Option<&str>,
    municipality: Option<&str>,
    calendar: &HolidayCalendar,
) -> u32 {
    if start > end {
        return 0;
    }
    let mut count = 0;
    let mut current = start;
    while current <= end {
        let weekday = current.weekday();
        let is_weekend = weekday == Weekday::Sat || weekday == Weekday::Sun;
        if !is_weekend && !calendar.is_holiday(current, region, municipality) {
            count += 1;
        }
        current = match current.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Holiday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn national_holiday(d: NaiveDate) -> Holiday {
        Holiday {
            date: d,
            region: None,
            municipality: None,
            description: None,
        }
    }

    /// CAL-001: Mon-Fri week with no holidays counts 5.
    #[test]
    fn test_full_week_no_holidays() {
        let cal = HolidayCalendar::default();
        assert_eq!(
            business_days(date(2025, 6, 2), date(2025, 6, 6), None, None, &cal),
            5
        );
    }

    /// CAL-002: a national holiday inside the range removes one day.
    #[test]
    fn test_national_holiday_removes_day() {
        let cal = HolidayCalendar::new(vec![national_holiday(date(2025, 6, 4))]);
        assert_eq!(
            business_days(date(2025, 6, 2), date(2025, 6, 6), None, None, &cal),
            4
        );
    }

    #[test]
    fn test_weekend_holiday_does_not_double_count() {
        // 2025-06-07 is a Saturday; already skipped as a weekend.
        let cal = HolidayCalendar::new(vec![national_holiday(date(2025, 6, 7))]);
        assert_eq!(
            business_days(date(2025, 6, 2), date(2025, 6, 8), None, None, &cal),
            5
        );
    }

    #[test]
    fn test_regional_holiday_only_affects_matching_region() {
        let cal = HolidayCalendar::new(vec![Holiday {
            date: date(2025, 7, 9),
            region: Some("SP".to_string()),
            municipality: None,
            description: None,
        }]);
        // 2025-07-07 to 2025-07-11 is Mon-Fri.
        let start = date(2025, 7, 7);
        let end = date(2025, 7, 11);
        assert_eq!(business_days(start, end, Some("SP"), None, &cal), 4);
        assert_eq!(business_days(start, end, Some("RJ"), None, &cal), 5);
        assert_eq!(business_days(start, end, None, None, &cal), 5);
    }

    #[test]
    fn test_municipal_holiday_scoping() {
        let cal = HolidayCalendar::new(vec![Holiday {
            date: date(2025, 1, 20),
            region: None,
            municipality: Some("RIO DE JANEIRO".to_string()),
            description: None,
        }]);
        let start = date(2025, 1, 20);
        let end = date(2025, 1, 24);
        assert_eq!(
            business_days(start, end, Some("RJ"), Some("RIO DE JANEIRO"), &cal),
            4
        );
        assert_eq!(
            business_days(start, end, Some("RJ"), Some("NITEROI"), &cal),
            5
        );
    }

    /// CAL-003: inverted range returns 0.
    #[test]
    fn test_start_after_end_returns_zero() {
        let cal = HolidayCalendar::default();
        assert_eq!(
            business_days(date(2025, 6, 10), date(2025, 6, 2), None, None, &cal),
            0
        );
    }

    #[test]
    fn test_single_weekday_counts_one() {
        let cal = HolidayCalendar::default();
        let monday = date(2025, 6, 2);
        assert_eq!(business_days(monday, monday, None, None, &cal), 1);
    }

    #[test]
    fn test_single_weekend_day_counts_zero() {
        let cal = HolidayCalendar::default();
        let saturday = date(2025, 6, 7);
        assert_eq!(business_days(saturday, saturday, None, None, &cal), 0);
    }

    #[test]
    fn test_full_month_june_2025() {
        // June 2025: 21 weekdays.
        let cal = HolidayCalendar::default();
        assert_eq!(
            business_days(date(2025, 6, 1), date(2025, 6, 30), None, None, &cal),
            21
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// The count never exceeds the number of calendar days in range.
            #[test]
            fn prop_count_bounded_by_span(start_off in 0i64..400, len in 0i64..60) {
                let base = date(2025, 1, 1);
                let start = base + chrono::Duration::days(start_off);
                let end = start + chrono::Duration::days(len);
                let cal = HolidayCalendar::default();
                let count = business_days(start, end, None, None, &cal);
                prop_assert!(count as i64 <= len + 1);
            }

            /// Adding a holiday never increases the count.
            #[test]
            fn prop_holiday_never_increases(day in 1u32..29) {
                let start = date(2025, 6, 1);
                let end = date(2025, 6, 30);
                let empty = HolidayCalendar::default();
                let with = HolidayCalendar::new(vec![national_holiday(date(2025, 6, day))]);
                let before = business_days(start, end, None, None, &empty);
                let after = business_days(start, end, None, None, &with);
                prop_assert!(after <= before);
            }
        }
    }
}
