//! Business-day counting against a scoped holiday calendar.
//!
//! This module contains the calendar engine ([`business_days`]) and the
//! interval subtractor ([`usable_days`]) used by the eligibility resolver.

mod business_days;
mod intervals;

pub use business_days::business_days;
pub use intervals::usable_days;
