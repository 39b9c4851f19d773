//! Error types for the Benefit Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Structural errors abort a whole run; per-employee problems are reported as
//! validation notes instead (see [`crate::models::ValidationNote`]).

use thiserror::Error;

/// The main error type for the Benefit Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use benefit_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/holidays.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/holidays.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The employee dataset was missing or empty.
    #[error("Employee dataset is empty: {message}")]
    EmptyEmployeeDataset {
        /// A description of what was missing.
        message: String,
    },

    /// The competence period configuration was invalid.
    #[error("Invalid competence period: {message}")]
    InvalidCompetence {
        /// A description of what made the period invalid.
        message: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/holidays.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/holidays.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_empty_employee_dataset_displays_message() {
        let error = EngineError::EmptyEmployeeDataset {
            message: "no rows in snapshot".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Employee dataset is empty: no rows in snapshot"
        );
    }

    #[test]
    fn test_invalid_competence_displays_message() {
        let error = EngineError::InvalidCompetence {
            message: "start date after end date".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid competence period: start date after end date"
        );
    }

    #[test]
    fn test_invalid_employee_displays_field_and_message() {
        let error = EngineError::InvalidEmployee {
            field: "admission_date".to_string(),
            message: "unparseable value".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid employee field 'admission_date': unparseable value"
        );
    }

    #[test]
    fn test_calculation_error_displays_message() {
        let error = EngineError::CalculationError {
            message: "negative day count".to_string(),
        };
        assert_eq!(error.to_string(), "Calculation error: negative day count");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_competence() -> EngineResult<()> {
            Err(EngineError::InvalidCompetence {
                message: "test".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_competence()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
