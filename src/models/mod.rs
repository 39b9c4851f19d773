//! Domain models for the Benefit Engine.
//!
//! This module contains the employee, competence period, holiday, rate, and
//! result types shared by the calendar, eligibility, and cascade components.

mod competence;
mod employee;
mod rate;
mod result;

pub use competence::{Competence, Holiday, HolidayCalendar};
pub use employee::{CommunicationStatus, DateInterval, Employee, ExclusionReason};
pub use rate::{Periodicity, RateOrigin, RawRateRecord, ResolvedRate};
pub use result::{BenefitRow, CalculationReport, ValidationNote};
