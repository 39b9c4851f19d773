//! Batch calculation over an employee snapshot.
//!
//! Combines per-employee eligibility with the rate cascade and emits one
//! result row per employee, in snapshot order. Missing rates and missing
//! regions degrade to zero-valued rows with notes; only structural problems
//! (empty snapshot, invalid competence) abort the run.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::cascade::{RateCascade, RateResolution};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BenefitRow, CalculationReport, Competence, Employee, HolidayCalendar, ValidationNote,
};

use super::eligibility::resolve_eligibility;
use super::money::round2;

/// The inputs of one calculation run.
pub struct CalculationInput<'a> {
    /// Employee snapshot, one entry per matricula.
    pub employees: &'a [Employee],
    /// The competence period being calculated.
    pub competence: &'a Competence,
    /// Holiday calendar scoped per employee region/municipality.
    pub holidays: &'a HolidayCalendar,
}

/// Runs the full calculation for a snapshot.
///
/// Produces exactly one [`BenefitRow`] per employee, preserving input order.
/// The employer/employee split is 80/20, each share rounded independently
/// from the total.
///
/// # Errors
///
/// Returns [`EngineError::EmptyEmployeeDataset`] for an empty snapshot and
/// [`EngineError::InvalidCompetence`] when the competence window cannot be
/// materialized into dates.
pub fn run_calculation(
    input: CalculationInput<'_>,
    cascade: &RateCascade<'_>,
) -> EngineResult<CalculationReport> {
    if input.employees.is_empty() {
        return Err(EngineError::EmptyEmployeeDataset {
            message: "employee snapshot contains no rows".to_string(),
        });
    }
    let (window_start, window_end) = input.competence.window()?;
    let competence_label = input.competence.label();

    let mut rows = Vec::with_capacity(input.employees.len());
    let mut notes = Vec::new();
    let mut unresolved = 0usize;

    for employee in input.employees {
        let eligibility = resolve_eligibility(
            employee,
            input.competence,
            window_start,
            window_end,
            input.holidays,
        );

        let mut observation = eligibility.observation;
        let mut rate_origin = None;
        let mut daily = Decimal::ZERO;

        // The cascade only matters when there are days to pay.
        if eligibility.eligible_days > 0 {
            match employee.region.as_deref() {
                Some(region) => match cascade.resolve(region, &employee.union_name) {
                    RateResolution::Resolved(rate) => {
                        daily = rate.voucher_rate;
                        rate_origin = Some(rate.origin);
                    }
                    RateResolution::Unresolved => {
                        unresolved += 1;
                        notes.push(ValidationNote::new(
                            &employee.matricula,
                            format!(
                                "Rate not found for region={}, union='{}'",
                                region, employee.union_name
                            ),
                        ));
                        observation
                            .get_or_insert_with(|| "Rate not resolved".to_string());
                    }
                },
                None => {
                    notes.push(ValidationNote::new(
                        &employee.matricula,
                        "Region missing and not inferable from union name",
                    ));
                    observation.get_or_insert_with(|| "Region unknown".to_string());
                }
            }
        }

        let total = round2(Decimal::from(eligibility.eligible_days) * daily);
        let employer_share = round2(total * Decimal::new(80, 2));
        let employee_share = round2(total * Decimal::new(20, 2));

        rows.push(BenefitRow {
            employee_id: employee.matricula.clone(),
            admission_date: employee.admission_date,
            union_name: employee.union_name.clone(),
            competence: competence_label.clone(),
            eligible_days: eligibility.eligible_days,
            daily_rate: daily,
            total,
            employer_share,
            employee_share,
            rate_origin,
            observation,
        });
    }

    if unresolved > 0 {
        warn!(unresolved, "some keys exhausted the rate cascade");
    }
    info!(
        competence = %competence_label,
        employees = rows.len(),
        notes = notes.len(),
        "calculation run completed"
    );

    Ok(CalculationReport {
        run_id: Uuid::new_v4(),
        competence: competence_label,
        generated_at: Utc::now(),
        rows,
        notes,
    })
}
