//! Competence period and holiday calendar models.
//!
//! This module contains the [`Competence`] payroll window and the
//! [`HolidayCalendar`] used to scope holiday matches by region and
//! municipality.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The payroll competence period being calculated.
///
/// The window normally covers the reference month, but may start on a day of
/// the previous month and/or end before the last day of the reference month.
///
/// # Example
///
/// ```
/// use benefit_engine::models::Competence;
/// use chrono::NaiveDate;
///
/// let competence = Competence {
///     year: 2025,
///     month: 6,
///     start_day_prev_month: None,
///     end_day_ref_month: None,
/// };
/// assert_eq!(competence.start_date().unwrap(), NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
/// assert_eq!(competence.end_date().unwrap(), NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
/// assert_eq!(competence.label(), "2025-06");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competence {
    /// Reference year.
    pub year: i32,
    /// Reference month (1-12).
    pub month: u32,
    /// Optional start day inside the previous month.
    #[serde(default)]
    pub start_day_prev_month: Option<u32>,
    /// Optional end day inside the reference month.
    #[serde(default)]
    pub end_day_ref_month: Option<u32>,
}

impl Competence {
    /// Returns the first day of the competence window.
    ///
    /// When `start_day_prev_month` is set the window starts on that day of
    /// the previous month (clamped to its length); otherwise on the 1st of
    /// the reference month.
    pub fn start_date(&self) -> EngineResult<NaiveDate> {
        match self.start_day_prev_month {
            None => first_of_month(self.year, self.month),
            Some(day) => {
                let (py, pm) = if self.month == 1 {
                    (self.year - 1, 12)
                } else {
                    (self.year, self.month - 1)
                };
                let last = last_of_month(py, pm)?;
                let day = day.min(last.day().max(1));
                NaiveDate::from_ymd_opt(py, pm, day).ok_or_else(|| {
                    EngineError::InvalidCompetence {
                        message: format!("invalid start day {day} for {py}-{pm:02}"),
                    }
                })
            }
        }
    }

    /// Returns the last day of the competence window.
    pub fn end_date(&self) -> EngineResult<NaiveDate> {
        let last = last_of_month(self.year, self.month)?;
        match self.end_day_ref_month {
            None => Ok(last),
            Some(day) => {
                let day = day.min(last.day()).max(1);
                NaiveDate::from_ymd_opt(self.year, self.month, day).ok_or_else(|| {
                    EngineError::InvalidCompetence {
                        message: format!(
                            "invalid end day {day} for {}-{:02}",
                            self.year, self.month
                        ),
                    }
                })
            }
        }
    }

    /// Validates the window and returns `(start, end)`.
    ///
    /// Fails when the month is out of range or the derived start date falls
    /// after the end date.
    pub fn window(&self) -> EngineResult<(NaiveDate, NaiveDate)> {
        if !(1..=12).contains(&self.month) {
            return Err(EngineError::InvalidCompetence {
                message: format!("month {} out of range", self.month),
            });
        }
        let start = self.start_date()?;
        let end = self.end_date()?;
        if start > end {
            return Err(EngineError::InvalidCompetence {
                message: format!("start {start} after end {end}"),
            });
        }
        Ok((start, end))
    }

    /// Returns the "YYYY-MM" label used on result rows.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

fn first_of_month(year: i32, month: u32) -> EngineResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| EngineError::InvalidCompetence {
        message: format!("invalid month {year}-{month:02}"),
    })
}

fn last_of_month(year: i32, month: u32) -> EngineResult<NaiveDate> {
    let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let first_next = first_of_month(ny, nm)?;
    Ok(first_next.pred_opt().unwrap_or(first_next))
}

/// A holiday entry, scoped nationally, by region, or by municipality.
///
/// Absence of both `region` and `municipality` marks a national holiday.
/// Multiple entries may share a date for different scopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// Two-letter region code, when regionally scoped.
    #[serde(default)]
    pub region: Option<String>,
    /// Municipality name, when municipally scoped.
    #[serde(default)]
    pub municipality: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Read-only holiday lookup table.
///
/// Region and municipality comparisons are case-insensitive; entries are
/// normalized to uppercase on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    entries: Vec<Holiday>,
}

impl HolidayCalendar {
    /// Creates a calendar from holiday entries, normalizing scope casing.
    pub fn new(entries: Vec<Holiday>) -> Self {
        let entries = entries
            .into_iter()
            .map(|mut h| {
                h.region = h.region.map(|r| r.trim().to_uppercase());
                h.municipality = h.municipality.map(|m| m.trim().to_uppercase());
                h
            })
            .collect();
        Self { entries }
    }

    /// Returns the number of entries in the calendar.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the calendar has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks whether `date` is a holiday for the given scope.
    ///
    /// A date matches when any entry on that date is national (no scope), or
    /// its region equals `region`, or its municipality equals `municipality`.
    /// Any match excludes the day.
    pub fn is_holiday(
        &self,
        date: NaiveDate,
        region: Option<&str>,
        municipality: Option<&str>,
    ) -> bool {
        let region = region.map(|r| r.trim().to_uppercase());
        let municipality = municipality.map(|m| m.trim().to_uppercase());
        self.entries.iter().any(|h| {
            if h.date != date {
                return false;
            }
            if h.region.is_none() && h.municipality.is_none() {
                return true;
            }
            if let (Some(hr), Some(er)) = (&h.region, &region) {
                if hr == er {
                    return true;
                }
            }
            if let (Some(hm), Some(em)) = (&h.municipality, &municipality) {
                if hm == em {
                    return true;
                }
            }
            false
        })
    }
}
