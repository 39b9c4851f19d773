//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the holiday
//! calendar and the manual override store from YAML files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::cascade::OverrideStore;
use crate::error::{EngineError, EngineResult};
use crate::models::{HolidayCalendar, RawRateRecord, RateOrigin};

use super::types::{HolidaysFile, OverrideEntry, OverridesFile};

/// Loads and provides access to engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// exposes the holiday calendar and override store used by a run.
///
/// # Directory Structure
///
/// ```text
/// config/benefit/
/// ├── holidays.yaml   # National and scoped holidays
/// └── overrides.yaml  # Curated rate overrides (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use benefit_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/benefit").unwrap();
/// println!("{} overrides loaded", loader.overrides().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    holidays: HolidayCalendar,
    overrides: OverrideStore,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// `holidays.yaml` is required; `overrides.yaml` is optional and an
    /// absent file yields an empty override store.
    ///
    /// # Errors
    ///
    /// Returns an error when a required file is missing, a file contains
    /// invalid YAML, or an override key is not `"REGION::UNION"` shaped.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let holidays_path = path.join("holidays.yaml");
        let holidays_file = Self::load_yaml::<HolidaysFile>(&holidays_path)?;
        let holidays = HolidayCalendar::new(holidays_file.holidays);

        let overrides_path = path.join("overrides.yaml");
        let overrides_file = if overrides_path.exists() {
            Self::load_yaml::<OverridesFile>(&overrides_path)?
        } else {
            OverridesFile::default()
        };
        let overrides = override_store_from_entries(&overrides_file.overrides)?;

        Ok(Self {
            holidays,
            overrides,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded holiday calendar.
    pub fn holidays(&self) -> &HolidayCalendar {
        &self.holidays
    }

    /// Returns the loaded override store.
    pub fn overrides(&self) -> &OverrideStore {
        &self.overrides
    }
}

/// Builds an [`OverrideStore`] from `"REGION::UNION"` keyed entries.
///
/// The same conversion serves the YAML file and inline API overrides.
///
/// # Errors
///
/// Returns [`EngineError::ConfigParseError`] for a key without exactly one
/// `::` separator or with an empty side.
pub fn override_store_from_entries(
    entries: &HashMap<String, OverrideEntry>,
) -> EngineResult<OverrideStore> {
    let mut store = OverrideStore::default();
    for (key, entry) in entries {
        let (region, union_name) = key.split_once("::").ok_or_else(|| {
            EngineError::ConfigParseError {
                path: "overrides".to_string(),
                message: format!("override key '{}' is not REGION::UNION shaped", key),
            }
        })?;
        if region.trim().is_empty() || union_name.trim().is_empty() {
            return Err(EngineError::ConfigParseError {
                path: "overrides".to_string(),
                message: format!("override key '{}' has an empty side", key),
            });
        }
        let mut record = RawRateRecord::new(region, union_name);
        record.voucher_rate = Some(entry.voucher_rate.clone());
        record.meal_rate = entry.meal_rate.clone();
        record.required_days = entry.required_days;
        record.periodicity = entry.periodicity;
        record.has_voucher_clause = true;
        record.has_meal_clause = entry.meal_rate.is_some();
        record.confidence = Some(RateOrigin::Override.default_confidence());
        store.insert(record);
    }
    Ok(store)
}
