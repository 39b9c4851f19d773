//! Collaborator traits for the two fallback tiers.
//!
//! The engine stays agnostic to how these collaborators work: tier 5 is
//! typically an LLM-assisted text extraction and tier 6 a vector-similarity
//! retrieval over agreement metadata, but both reduce to "maybe produce a raw
//! record for a key". Neither trait is invoked unless every earlier tier
//! came up empty.

use crate::models::RawRateRecord;

/// Assisted text-extraction fallback (tier 5).
///
/// The one permitted source of non-determinism in a run; the cascade caches
/// a successful result into the resolved-rate repository so subsequent runs
/// resolve deterministically from tier 2.
pub trait AssistedExtractor: Send + Sync {
    /// Attempts to extract a raw rate record for the key.
    fn resolve(&self, region: &str, union_name: &str) -> Option<RawRateRecord>;
}

/// Similarity-retrieval fallback over indexed agreement metadata (tier 6).
pub trait AgreementRetriever: Send + Sync {
    /// Searches indexed agreement metadata for a rate record.
    fn search(&self, region: &str, union_name: &str) -> Option<RawRateRecord>;
}
