//! Subtraction of leave/vacation intervals from a base window.

use chrono::NaiveDate;

use crate::models::{DateInterval, HolidayCalendar};

use super::business_days;

/// Counts the business days in `[base_start, base_end]` minus the business
/// days of each exclusion interval, clamped to the base window.
///
/// The result is floored at 0. Overlapping exclusion intervals are each
/// subtracted independently, so a day covered by two intervals is removed
/// twice; source behavior is preserved rather than merged.
///
/// # Example
///
/// ```
/// use benefit_engine::calendar::usable_days;
/// use benefit_engine::models::{DateInterval, HolidayCalendar};
/// use chrono::NaiveDate;
///
/// let cal = HolidayCalendar::default();
/// let start = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 6, 13).unwrap();
/// let leave = DateInterval {
///     start: NaiveDate::from_ymd_opt(2025, 6, 9).unwrap(),
///     end: NaiveDate::from_ymd_opt(2025, 6, 13).unwrap(),
/// };
/// assert_eq!(usable_days(start, end, None, None, &[leave], &cal), 5);
/// ```
pub fn usable_days(
    base_start: NaiveDate,
    base_end: NaiveDate,
    region: Option<&str>,
    municipality: Option<&str>,
    exclusions: &[DateInterval],
    calendar: &HolidayCalendar,
) -> u32 {
    let total = business_days(base_start, base_end, region, municipality, calendar);
    let mut subtracted: u32 = 0;
    for interval in exclusions {
        if let Some(clamped) = interval.clamp_to(base_start, base_end) {
            subtracted = subtracted.saturating_add(business_days(
                clamped.start,
                clamped.end,
                region,
                municipality,
                calendar,
            ));
        }
    }
    total.saturating_sub(subtracted)
}
