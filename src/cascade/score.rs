//! Deterministic scoring for raw-index candidates.

use crate::models::{Periodicity, RawRateRecord};

/// Score components compared lexicographically, in order: monetary values
/// present, explicit clauses present, required-days present, daily
/// periodicity preferred.
fn candidate_score(record: &RawRateRecord) -> (u8, u8, u8, u8) {
    let values = record.voucher_rate.is_some() as u8 + record.meal_rate.is_some() as u8;
    let clauses = record.has_voucher_clause as u8 + record.has_meal_clause as u8;
    let days = record.required_days.is_some() as u8;
    let daily = matches!(record.periodicity, Some(Periodicity::Daily)) as u8;
    (values, clauses, days, daily)
}

/// Selects the best candidate by score; ties keep the earliest in input
/// order, so re-runs over the same snapshot are deterministic.
pub fn best_candidate<'a>(
    candidates: impl Iterator<Item = &'a RawRateRecord>,
) -> Option<&'a RawRateRecord> {
    let mut best: Option<(&'a RawRateRecord, (u8, u8, u8, u8))> = None;
    for candidate in candidates {
        let score = candidate_score(candidate);
        let replaces = match &best {
            Some((_, best_score)) => score > *best_score,
            None => true,
        };
        if replaces {
            best = Some((candidate, score));
        }
    }
    best.map(|(record, _)| record)
}
