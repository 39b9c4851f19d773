//! Calculation logic for the Benefit Engine.
//!
//! This module contains the monetary/periodicity normalizer, the per-employee
//! eligibility window resolver (exclusions, admission/termination clamping,
//! day-15 termination rule), and the batch orchestrator that combines
//! eligibility with the rate cascade to produce result rows.

mod eligibility;
mod money;
mod orchestrator;

pub use eligibility::{Eligibility, resolve_eligibility};
pub use money::{daily_rate, parse_currency, round2};
pub use orchestrator::{CalculationInput, run_calculation};
