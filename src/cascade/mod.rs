//! Multi-tier rate resolution cascade.
//!
//! Resolves one authoritative daily rate per (region, union) key from six
//! ranked sources: the manual override store, the previously consolidated
//! rate repository, the raw extracted rule index, an imported spreadsheet,
//! an assisted-extraction collaborator, and a similarity-retrieval fallback.
//! The first tier whose candidate normalizes to a daily voucher rate wins.

mod assisted;
mod overrides;
mod repository;
mod score;
mod spreadsheet;

pub use assisted::{AgreementRetriever, AssistedExtractor};
pub use overrides::OverrideStore;
pub use repository::{InMemoryRateRepository, RateRepository};
pub use score::best_candidate;
pub use spreadsheet::SpreadsheetTable;

use tracing::debug;

use crate::calculation::{daily_rate, parse_currency};
use crate::models::{Periodicity, RateOrigin, RawRateRecord, ResolvedRate};

/// The outcome of a cascade resolution for one (region, union) key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateResolution {
    /// A tier produced a usable daily rate.
    Resolved(ResolvedRate),
    /// Every tier was exhausted without a usable value.
    Unresolved,
}

impl RateResolution {
    /// Returns the resolved rate, when one was produced.
    pub fn resolved(self) -> Option<ResolvedRate> {
        match self {
            RateResolution::Resolved(rate) => Some(rate),
            RateResolution::Unresolved => None,
        }
    }
}

/// The ranked set of rate sources consulted for a run.
///
/// Tiers 5 and 6 are optional collaborators injected behind traits; when
/// absent those tiers are skipped. A successful assisted extraction is
/// normalized and upserted into the repository so later runs hit tier 2.
pub struct RateCascade<'a> {
    overrides: &'a OverrideStore,
    repository: &'a dyn RateRepository,
    raw_index: &'a [RawRateRecord],
    spreadsheet: Option<&'a SpreadsheetTable>,
    assisted: Option<&'a dyn AssistedExtractor>,
    retriever: Option<&'a dyn AgreementRetriever>,
}

impl<'a> RateCascade<'a> {
    /// Creates a cascade over the three always-present tiers.
    pub fn new(
        overrides: &'a OverrideStore,
        repository: &'a dyn RateRepository,
        raw_index: &'a [RawRateRecord],
    ) -> Self {
        Self {
            overrides,
            repository,
            raw_index,
            spreadsheet: None,
            assisted: None,
            retriever: None,
        }
    }

    /// Attaches an imported spreadsheet as tier 4.
    pub fn with_spreadsheet(mut self, spreadsheet: &'a SpreadsheetTable) -> Self {
        self.spreadsheet = Some(spreadsheet);
        self
    }

    /// Attaches an assisted-extraction collaborator as tier 5.
    pub fn with_assisted(mut self, assisted: &'a dyn AssistedExtractor) -> Self {
        self.assisted = Some(assisted);
        self
    }

    /// Attaches a similarity-retrieval collaborator as tier 6.
    pub fn with_retriever(mut self, retriever: &'a dyn AgreementRetriever) -> Self {
        self.retriever = Some(retriever);
        self
    }

    /// Resolves the authoritative daily rate for a (region, union) key.
    ///
    /// Tiers are evaluated in strict priority order; a tier whose candidate
    /// fails monetary/periodicity normalization falls through to the next.
    /// Exhaustion returns [`RateResolution::Unresolved`], never an error.
    pub fn resolve(&self, region: &str, union_name: &str) -> RateResolution {
        // Tier 1: manual overrides.
        if let Some(record) = self.overrides.get(region, union_name) {
            if let Some(rate) = normalize_record(record, RateOrigin::Override) {
                debug!(region, union_name, "rate resolved from override store");
                return RateResolution::Resolved(rate);
            }
        }

        // Tier 2: previously consolidated rates.
        if let Some(rate) = self.repository.get(region, union_name) {
            debug!(region, union_name, origin = ?rate.origin, "rate resolved from repository");
            return RateResolution::Resolved(rate);
        }

        // Tier 3: raw extracted index, best candidate by score.
        let candidates = self.raw_index.iter().filter(|r| {
            r.region.trim().eq_ignore_ascii_case(region.trim())
                && r.union_name.trim() == union_name.trim()
        });
        if let Some(best) = best_candidate(candidates) {
            if let Some(rate) = normalize_record(best, RateOrigin::RawIndex) {
                debug!(region, union_name, "rate resolved from raw index");
                return RateResolution::Resolved(rate);
            }
        }

        // Tier 4: imported spreadsheet.
        if let Some(table) = self.spreadsheet {
            if let Some(record) = table.lookup(region, union_name) {
                if let Some(rate) = normalize_record(&record, RateOrigin::Spreadsheet) {
                    debug!(region, union_name, "rate resolved from spreadsheet");
                    return RateResolution::Resolved(rate);
                }
            }
        }

        // Tier 5: assisted extraction; cache success back into tier 2.
        if let Some(assisted) = self.assisted {
            if let Some(record) = assisted.resolve(region, union_name) {
                if let Some(rate) = normalize_record(&record, RateOrigin::Assisted) {
                    debug!(region, union_name, "rate resolved from assisted extraction");
                    self.repository.upsert(rate.clone());
                    return RateResolution::Resolved(rate);
                }
            }
        }

        // Tier 6: similarity retrieval, last resort.
        if let Some(retriever) = self.retriever {
            if let Some(record) = retriever.search(region, union_name) {
                if let Some(rate) = normalize_record(&record, RateOrigin::Retrieval) {
                    debug!(region, union_name, "rate resolved from retrieval metadata");
                    return RateResolution::Resolved(rate);
                }
            }
        }

        debug!(region, union_name, "rate cascade exhausted");
        RateResolution::Unresolved
    }
}

/// Normalizes a raw record into a [`ResolvedRate`] for the given origin.
///
/// Requires a parseable voucher value that converts to a daily rate; the
/// meal value is normalized when present but never mandatory.
pub fn normalize_record(record: &RawRateRecord, origin: RateOrigin) -> Option<ResolvedRate> {
    let voucher_value = parse_currency(record.voucher_rate.as_deref()?)?;
    let voucher = daily_rate(voucher_value, record.periodicity, record.required_days)?;
    let meal = record
        .meal_rate
        .as_deref()
        .and_then(parse_currency)
        .and_then(|v| daily_rate(v, record.periodicity, record.required_days));
    Some(ResolvedRate {
        region: record.region.trim().to_uppercase(),
        union_name: record.union_name.trim().to_string(),
        voucher_rate: voucher,
        meal_rate: meal,
        periodicity: record.periodicity.unwrap_or(Periodicity::Daily),
        required_days: record.required_days,
        origin,
        confidence: record
            .confidence
            .unwrap_or_else(|| origin.default_confidence()),
    })
}
