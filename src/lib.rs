//! Benefit Eligibility & Rate Resolution Engine.
//!
//! This crate computes per-employee meal/food voucher (VR/VA) entitlements for
//! a payroll competence period: business-day proration against a holiday
//! calendar, admission/termination/exclusion policy including the day-15
//! termination rule, and a multi-tier cascade that resolves one authoritative
//! daily rate per (region, union) pair.

#![warn(missing_docs)]

pub mod adapter;
pub mod api;
pub mod calculation;
pub mod calendar;
pub mod cascade;
pub mod config;
pub mod error;
pub mod models;
