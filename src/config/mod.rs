//! Configuration loading and management for the Benefit Engine.
//!
//! This module loads the holiday calendar and the curated rate overrides
//! from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use benefit_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/benefit").unwrap();
//! println!("{} overrides loaded", config.overrides().len());
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, override_store_from_entries};
pub use types::{HolidaysFile, OverrideEntry, OverridesFile};
