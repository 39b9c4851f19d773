//! Request types for the Benefit Engine API.
//!
//! A calculation request carries the employee snapshot and competence period,
//! plus optional inline rate sources. Inline holidays and overrides replace
//! the server-side configuration for that request; absent fields fall back
//! to the loaded configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cascade::SpreadsheetTable;
use crate::config::OverrideEntry;
use crate::models::{Competence, Employee, Holiday, RawRateRecord, ResolvedRate};

/// Request body for the POST /calculate endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The competence period to calculate.
    pub competence: Competence,
    /// Employee snapshot, one entry per matricula.
    pub employees: Vec<Employee>,
    /// Inline holiday calendar; falls back to the configured one when absent.
    #[serde(default)]
    pub holidays: Option<Vec<Holiday>>,
    /// Inline `"REGION::UNION"` keyed overrides; falls back to the configured
    /// store when absent.
    #[serde(default)]
    pub overrides: Option<HashMap<String, OverrideEntry>>,
    /// Previously consolidated rates seeding the repository tier.
    #[serde(default)]
    pub resolved_rates: Vec<ResolvedRate>,
    /// Raw extracted rule records for the index tier.
    #[serde(default)]
    pub rate_index: Vec<RawRateRecord>,
    /// Imported spreadsheet for the spreadsheet tier.
    #[serde(default)]
    pub spreadsheet: Option<SpreadsheetTable>,
}
