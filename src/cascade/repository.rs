//! Resolved-rate repository, the consolidated tier shared across runs.
//!
//! The repository is an injected dependency so tests and callers can
//! substitute their own storage; the engine only needs read-by-key and
//! upsert-by-key semantics. Writes follow last-run-wins.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::models::ResolvedRate;

fn repository_key(region: &str, union_name: &str) -> (String, String) {
    (
        region.trim().to_uppercase(),
        union_name.trim().to_string(),
    )
}

/// Read + upsert access to previously consolidated rates.
pub trait RateRepository: Send + Sync {
    /// Returns the consolidated rate for a (region, union) key, if any.
    fn get(&self, region: &str, union_name: &str) -> Option<ResolvedRate>;

    /// Inserts or replaces the consolidated rate for its key.
    fn upsert(&self, rate: ResolvedRate);
}

/// In-memory [`RateRepository`] used by tests and the HTTP surface.
#[derive(Debug, Default)]
pub struct InMemoryRateRepository {
    entries: Mutex<HashMap<(String, String), ResolvedRate>>,
}

impl InMemoryRateRepository {
    /// Creates a repository seeded with the given rates.
    pub fn from_rates(rates: Vec<ResolvedRate>) -> Self {
        let repository = Self::default();
        for rate in rates {
            repository.upsert(rate);
        }
        repository
    }

    /// Returns a snapshot of all stored rates, in unspecified order.
    pub fn snapshot(&self) -> Vec<ResolvedRate> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }
}

impl RateRepository for InMemoryRateRepository {
    fn get(&self, region: &str, union_name: &str) -> Option<ResolvedRate> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&repository_key(region, union_name))
            .cloned()
    }

    fn upsert(&self, rate: ResolvedRate) {
        let key = repository_key(&rate.region, &rate.union_name);
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, rate);
    }
}
