//! Employee model and related types.
//!
//! This module defines the [`Employee`] struct along with the controlled
//! vocabularies used for termination-notice status and benefit exclusions.
//! Free-text source fields are mapped into these enums at the adapter
//! boundary (see [`crate::adapter`]), never inside the calculation core.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status of the termination communication for an employee.
///
/// Source data carries this as free text; anything containing "OK" is mapped
/// to [`CommunicationStatus::Acknowledged`] by the input adapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationStatus {
    /// The termination was communicated and acknowledged ("OK").
    Acknowledged,
    /// A communication exists but was not acknowledged.
    Pending,
    /// No communication information is available.
    #[default]
    Unknown,
}

/// Reason an employee is excluded from benefit eligibility.
///
/// Derived from free-text category/role fields at the adapter boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// Directors and board members.
    Director,
    /// Apprentices.
    Apprentice,
    /// Interns.
    Intern,
    /// Employees working abroad.
    International,
    /// Employees on leave per their status field.
    OnLeave,
}

impl ExclusionReason {
    /// Returns the observation text recorded on the result row.
    pub fn observation(&self) -> &'static str {
        match self {
            ExclusionReason::Director => "Excluded: director",
            ExclusionReason::Apprentice => "Excluded: apprentice",
            ExclusionReason::Intern => "Excluded: intern",
            ExclusionReason::International => "Excluded: working abroad",
            ExclusionReason::OnLeave => "Excluded: on leave",
        }
    }
}

/// A closed date interval, used for leave/vacation sub-periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateInterval {
    /// First day of the interval (inclusive).
    pub start: NaiveDate,
    /// Last day of the interval (inclusive).
    pub end: NaiveDate,
}

impl DateInterval {
    /// Returns the intersection of this interval with `[start, end]`,
    /// or `None` when they do not overlap.
    pub fn clamp_to(&self, start: NaiveDate, end: NaiveDate) -> Option<DateInterval> {
        let s = self.start.max(start);
        let e = self.end.min(end);
        if s <= e { Some(DateInterval { start: s, end: e }) } else { None }
    }
}

/// Represents an employee subject to benefit calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier (matricula).
    pub matricula: String,
    /// The employee's name.
    pub name: String,
    /// Labor-union affiliation, as it appears in the source data.
    pub union_name: String,
    /// Two-letter region code, when known or inferred from the union text.
    #[serde(default)]
    pub region: Option<String>,
    /// Municipality, when known.
    #[serde(default)]
    pub municipality: Option<String>,
    /// Admission date, when present in the source data.
    #[serde(default)]
    pub admission_date: Option<NaiveDate>,
    /// Termination date, when present in the source data.
    #[serde(default)]
    pub termination_date: Option<NaiveDate>,
    /// Status of the termination communication.
    #[serde(default)]
    pub termination_notice: CommunicationStatus,
    /// Date the termination was communicated, when present.
    #[serde(default)]
    pub termination_notice_date: Option<NaiveDate>,
    /// Leave/vacation intervals to subtract from the eligibility window.
    #[serde(default)]
    pub leave_intervals: Vec<DateInterval>,
    /// Exclusion reason, when the employee is out of scope for the benefit.
    #[serde(default)]
    pub exclusion: Option<ExclusionReason>,
}

impl Employee {
    /// Returns true if the employee is excluded from benefit eligibility.
    pub fn is_excluded(&self) -> bool {
        self.exclusion.is_some()
    }

    /// Returns true if the termination communication was acknowledged.
    pub fn termination_acknowledged(&self) -> bool {
        self.termination_notice == CommunicationStatus::Acknowledged
    }
}
