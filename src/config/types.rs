//! Configuration types for the benefit engine.
//!
//! This module contains the strongly-typed structures that are deserialized
//! from YAML configuration files.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Holiday, Periodicity};

/// Holidays configuration file structure (`holidays.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct HolidaysFile {
    /// Holiday entries, national or scoped by region/municipality.
    pub holidays: Vec<Holiday>,
}

/// One curated rate entry in the overrides file or an API request.
///
/// Values are kept as source text so the same BRL parsing path applies to
/// curated and extracted data alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideEntry {
    /// Daily or monthly voucher value, e.g. `"R$ 25,00"`.
    pub voucher_rate: String,
    /// Meal value, when the agreement grants one.
    #[serde(default)]
    pub meal_rate: Option<String>,
    /// Working days per month the agreement assumes.
    #[serde(default)]
    pub required_days: Option<u32>,
    /// How `voucher_rate` is expressed.
    #[serde(default)]
    pub periodicity: Option<Periodicity>,
    /// Free-form provenance note, kept for audit only.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Overrides configuration file structure (`overrides.yaml`).
///
/// Keys are `"REGION::UNION NAME"`, e.g. `"SP::SINDICATO DOS COMERCIARIOS"`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverridesFile {
    /// Map of composite key to curated entry.
    #[serde(default)]
    pub overrides: HashMap<String, OverrideEntry>,
}
