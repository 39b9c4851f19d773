//! Tolerant-schema input adapters.
//!
//! Source spreadsheets arrive with messy, accented, inconsistently named
//! headers. This module resolves logical fields through ranked keyword
//! matching, infers region codes from union names, and converts loose
//! employee tables into [`crate::models::Employee`] records before any
//! business logic runs. The calculation core never sees raw headers.

mod columns;
mod employee_table;
mod region;

pub use columns::{find_column, find_column_exact, normalize_header};
pub use employee_table::EmployeeTable;
pub use region::infer_region;
