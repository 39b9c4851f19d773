//! Manual override store, the highest-priority cascade tier.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::RawRateRecord;

/// Builds the canonical `"REGION::UNION"` key.
fn override_key(region: &str, union_name: &str) -> String {
    format!("{}::{}", region.trim().to_uppercase(), union_name.trim())
}

/// Map of manually maintained rate overrides keyed by `"REGION::UNION"`.
///
/// An override short-circuits every other cascade tier for its key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideStore {
    entries: HashMap<String, RawRateRecord>,
}

impl OverrideStore {
    /// Inserts an override, replacing any existing entry for the same key.
    pub fn insert(&mut self, record: RawRateRecord) {
        let key = override_key(&record.region, &record.union_name);
        self.entries.insert(key, record);
    }

    /// Looks up the override for a (region, union) key.
    pub fn get(&self, region: &str, union_name: &str) -> Option<&RawRateRecord> {
        self.entries.get(&override_key(region, union_name))
    }

    /// Returns the number of overrides in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the store has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
