//! Calculation result models.
//!
//! This module contains the per-employee [`BenefitRow`], the advisory
//! [`ValidationNote`], and the [`CalculationReport`] returned by a run.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RateOrigin;

/// One result row per employee per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitRow {
    /// The employee's matricula.
    pub employee_id: String,
    /// Admission date carried from the source data.
    #[serde(default)]
    pub admission_date: Option<NaiveDate>,
    /// Labor-union affiliation.
    pub union_name: String,
    /// Competence label, "YYYY-MM".
    pub competence: String,
    /// Benefit-eligible business days in the window.
    pub eligible_days: u32,
    /// Resolved daily voucher rate (0 when unresolved).
    pub daily_rate: Decimal,
    /// `eligible_days * daily_rate`, rounded to 2dp.
    pub total: Decimal,
    /// Employer share, 80% of total rounded independently.
    pub employer_share: Decimal,
    /// Employee share, 20% of total rounded independently.
    pub employee_share: Decimal,
    /// The cascade tier that produced the rate, when one resolved.
    #[serde(default)]
    pub rate_origin: Option<RateOrigin>,
    /// Observation text (exclusion reason, day-15 zeroing, etc).
    #[serde(default)]
    pub observation: Option<String>,
}

/// A non-fatal, advisory note accumulated during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationNote {
    /// The matricula of the employee the note refers to.
    pub employee_id: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl ValidationNote {
    /// Creates a new validation note.
    pub fn new(employee_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            message: message.into(),
        }
    }
}

/// The complete output of a calculation run.
///
/// `rows` and `notes` are deterministic for identical inputs (tiers 1-4 and
/// 6); `run_id` and `generated_at` are per-run metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationReport {
    /// Unique id for this run.
    pub run_id: Uuid,
    /// Competence label, "YYYY-MM".
    pub competence: String,
    /// Timestamp the report was produced.
    pub generated_at: DateTime<Utc>,
    /// One row per employee, in snapshot order.
    pub rows: Vec<BenefitRow>,
    /// Advisory notes accumulated during the run.
    pub notes: Vec<ValidationNote>,
}
