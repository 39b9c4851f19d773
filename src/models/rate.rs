//! Rate record models for the cascade resolver.
//!
//! Raw records keep their monetary fields as source strings (BRL formatted);
//! normalization into [`rust_decimal::Decimal`] happens in
//! [`crate::calculation::money`] when a cascade tier is evaluated.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How often a rate value applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Periodicity {
    /// The value is already a per-day rate.
    Daily,
    /// The value is a monthly amount, converted using the required-days figure.
    Monthly,
}

/// The cascade tier a resolved rate came from.
///
/// Ordering follows tier priority; it is carried into result rows so an
/// auditor can see which source won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateOrigin {
    /// Manual override store (tier 1).
    Override,
    /// Previously consolidated rate table (tier 2).
    ResolvedTable,
    /// Raw extracted rule index (tier 3).
    RawIndex,
    /// Imported spreadsheet lookup (tier 4).
    Spreadsheet,
    /// Assisted text-extraction fallback (tier 5).
    Assisted,
    /// Similarity-retrieval fallback (tier 6).
    Retrieval,
}

impl RateOrigin {
    /// Default confidence assigned when the source record carries none.
    pub fn default_confidence(&self) -> Decimal {
        match self {
            RateOrigin::Override => Decimal::new(100, 2),
            RateOrigin::ResolvedTable => Decimal::new(95, 2),
            RateOrigin::RawIndex => Decimal::new(90, 2),
            RateOrigin::Spreadsheet => Decimal::new(75, 2),
            RateOrigin::Assisted => Decimal::new(50, 2),
            RateOrigin::Retrieval => Decimal::new(40, 2),
        }
    }
}

/// A raw rule record as supplied by one of the cascade sources.
///
/// Many raw records may exist for the same (region, union) key; the cascade
/// selects at most one per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRateRecord {
    /// Two-letter region code.
    pub region: String,
    /// Labor-union name the record applies to.
    pub union_name: String,
    /// Voucher (VR) value as found in the source, e.g. `"R$ 25,00"`.
    #[serde(default)]
    pub voucher_rate: Option<String>,
    /// Meal (VA) value as found in the source.
    #[serde(default)]
    pub meal_rate: Option<String>,
    /// Required business days per month, for monthly periodicity.
    #[serde(default)]
    pub required_days: Option<u32>,
    /// Periodicity of the monetary values.
    #[serde(default)]
    pub periodicity: Option<Periodicity>,
    /// Whether the source document has an explicit voucher clause.
    #[serde(default)]
    pub has_voucher_clause: bool,
    /// Whether the source document has an explicit meal clause.
    #[serde(default)]
    pub has_meal_clause: bool,
    /// Termination condition text, when the agreement states one.
    #[serde(default)]
    pub termination_condition: Option<String>,
    /// Confidence reported by the source, 0.00-1.00.
    #[serde(default)]
    pub confidence: Option<Decimal>,
}

impl RawRateRecord {
    /// Creates an empty record for a (region, union) key.
    pub fn new(region: impl Into<String>, union_name: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            union_name: union_name.into(),
            voucher_rate: None,
            meal_rate: None,
            required_days: None,
            periodicity: None,
            has_voucher_clause: false,
            has_meal_clause: false,
            termination_condition: None,
            confidence: None,
        }
    }

    /// Returns true when the record carries no monetary value at all.
    pub fn is_empty(&self) -> bool {
        self.voucher_rate.is_none() && self.meal_rate.is_none()
    }
}

/// The single authoritative rate resolved for a (region, union) key.
///
/// `voucher_rate` and `meal_rate` are already normalized to daily values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRate {
    /// Two-letter region code.
    pub region: String,
    /// Labor-union name.
    pub union_name: String,
    /// Daily voucher (VR) rate.
    pub voucher_rate: Decimal,
    /// Daily meal (VA) rate, when the source stated one.
    #[serde(default)]
    pub meal_rate: Option<Decimal>,
    /// Periodicity the source stated before normalization.
    pub periodicity: Periodicity,
    /// Required business days per month, when stated.
    #[serde(default)]
    pub required_days: Option<u32>,
    /// The cascade tier that produced this rate.
    pub origin: RateOrigin,
    /// Confidence of the resolution, 0.00-1.00.
    pub confidence: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_default_confidence_is_ordered_by_tier() {
        let origins = [
            RateOrigin::Override,
            RateOrigin::ResolvedTable,
            RateOrigin::RawIndex,
            RateOrigin::Spreadsheet,
            RateOrigin::Assisted,
            RateOrigin::Retrieval,
        ];
        for pair in origins.windows(2) {
            assert!(pair[0].default_confidence() > pair[1].default_confidence());
        }
    }

    #[test]
    fn test_origin_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&RateOrigin::ResolvedTable).unwrap(),
            "\"resolved_table\""
        );
        assert_eq!(
            serde_json::to_string(&RateOrigin::RawIndex).unwrap(),
            "\"raw_index\""
        );
    }

    #[test]
    fn test_raw_record_defaults() {
        let record = RawRateRecord::new("SP", "UNION X");
        assert!(record.is_empty());
        assert_eq!(record.periodicity, None);
        assert!(!record.has_voucher_clause);
    }

    #[test]
    fn test_raw_record_deserializes_with_missing_fields() {
        let json = r#"{
            "region": "SP",
            "union_name": "UNION X",
            "voucher_rate": "R$ 25,00"
        }"#;
        let record: RawRateRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.voucher_rate.as_deref(), Some("R$ 25,00"));
        assert!(!record.is_empty());
    }

    #[test]
    fn test_resolved_rate_round_trip() {
        let rate = ResolvedRate {
            region: "SP".to_string(),
            union_name: "UNION X".to_string(),
            voucher_rate: Decimal::new(2500, 2),
            meal_rate: None,
            periodicity: Periodicity::Daily,
            required_days: Some(22),
            origin: RateOrigin::Override,
            confidence: Decimal::new(100, 2),
        };
        let json = serde_json::to_string(&rate).unwrap();
        let back: ResolvedRate = serde_json::from_str(&json).unwrap();
        assert_eq!(rate, back);
    }
}
