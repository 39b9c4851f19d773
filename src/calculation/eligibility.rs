//! Per-employee eligibility window resolution.
//!
//! Applies, in order: exclusion flags, admission/termination window clamping,
//! the day-15 termination rule, and normal business-day proration with leave
//! intervals subtracted.

use chrono::{Datelike, NaiveDate};

use crate::calendar::usable_days;
use crate::models::{Competence, Employee, HolidayCalendar};

/// The outcome of resolving an employee's eligibility window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eligibility {
    /// Benefit-eligible business days in the competence window.
    pub eligible_days: u32,
    /// Observation recorded on the result row, when a rule zeroed or
    /// prorated the count.
    pub observation: Option<String>,
}

impl Eligibility {
    fn zero(observation: impl Into<String>) -> Self {
        Self {
            eligible_days: 0,
            observation: Some(observation.into()),
        }
    }
}

/// Resolves the eligible business days for one employee.
///
/// Decision order:
/// 1. an exclusion flag zeroes the count with the exclusion reason;
/// 2. the window is clamped to `[max(start, admission), min(end, termination)]`,
///    and an empty window yields 0;
/// 3. when the termination date falls inside the reference month and the
///    communication was acknowledged, day <= 15 zeroes the count and day > 15
///    prorates to the termination date, capped at the full-window figure;
/// 4. otherwise the count is the business days of the clamped window minus
///    leave intervals.
pub fn resolve_eligibility(
    employee: &Employee,
    competence: &Competence,
    window_start: NaiveDate,
    window_end: NaiveDate,
    calendar: &HolidayCalendar,
) -> Eligibility {
    if let Some(reason) = employee.exclusion {
        return Eligibility::zero(reason.observation());
    }

    let region = employee.region.as_deref();
    let municipality = employee.municipality.as_deref();

    let effective_start = match employee.admission_date {
        Some(admission) => admission.max(window_start),
        None => window_start,
    };
    let effective_end = match employee.termination_date {
        Some(termination) => termination.min(window_end),
        None => window_end,
    };
    if effective_start > effective_end {
        return Eligibility::zero("No eligible days in competence window");
    }

    let full_window = || {
        usable_days(
            effective_start,
            effective_end,
            region,
            municipality,
            &employee.leave_intervals,
            calendar,
        )
    };

    if let Some(termination) = employee.termination_date {
        let in_reference_month =
            termination.year() == competence.year && termination.month() == competence.month;
        if in_reference_month && employee.termination_acknowledged() {
            if termination.day() <= 15 {
                return Eligibility::zero(
                    "Terminated on or before day 15 with acknowledged notice",
                );
            }
            let prorated = usable_days(
                effective_start,
                termination,
                region,
                municipality,
                &employee.leave_intervals,
                calendar,
            );
            return Eligibility {
                eligible_days: prorated.min(full_window()),
                observation: Some("Prorated to termination date".to_string()),
            };
        }
    }

    Eligibility {
        eligible_days: full_window(),
        observation: None,
    }
}
