//! Monetary parsing and periodicity normalization.
//!
//! Source documents carry values as BRL-formatted strings (`"R$ 1.234,56"`).
//! Parsing strips the currency symbol, removes thousands separators, and
//! normalizes the decimal separator; percentage strings are rejected rather
//! than coerced.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::models::Periodicity;

/// Rounds a monetary value to 2 decimal places, half away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Parses a BRL-formatted monetary string.
///
/// Accepts an optional leading currency symbol (`R$` or `$`). When a comma is
/// present it is the decimal separator and dots are thousands separators;
/// otherwise a dot is the decimal point. Returns `None` for percentages,
/// empty strings, and anything else that is not monetary.
///
/// # Example
///
/// ```
/// use benefit_engine::calculation::parse_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_currency("R$ 1.234,56"), Some(Decimal::new(123456, 2)));
/// assert_eq!(parse_currency("25,00"), Some(Decimal::new(2500, 2)));
/// assert_eq!(parse_currency("12%"), None);
/// ```
pub fn parse_currency(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.contains('%') {
        return None;
    }
    let without_symbol = trimmed
        .strip_prefix("R$")
        .or_else(|| trimmed.strip_prefix('$'))
        .unwrap_or(trimmed);
    let compact: String = without_symbol
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if compact.is_empty() {
        return None;
    }
    let normalized = if compact.contains(',') {
        compact.replace('.', "").replace(',', ".")
    } else {
        compact
    };
    Decimal::from_str(&normalized).ok()
}

/// Converts a parsed value to a daily rate.
///
/// Monthly values require a positive `required_days` figure and divide by it;
/// daily or unspecified periodicity passes the value through. Returns `None`
/// when a monthly value has no usable required-days figure, which makes the
/// owning cascade tier fall through.
pub fn daily_rate(
    value: Decimal,
    periodicity: Option<Periodicity>,
    required_days: Option<u32>,
) -> Option<Decimal> {
    match periodicity {
        Some(Periodicity::Monthly) => match required_days {
            Some(days) if days > 0 => Some(round2(value / Decimal::from(days))),
            _ => None,
        },
        Some(Periodicity::Daily) | None => Some(round2(value)),
    }
}
