//! Error types for the Payslip Extract Engine.
//!
//! The breakdown core never fails: unparseable amounts degrade to zero.
//! These errors belong to the surrounding layers (configuration, extract
//! decoding, pay period resolution) and are built with `thiserror`.

use thiserror::Error;

/// The main error type for the Payslip Extract Engine.
///
/// # Example
///
/// ```
/// use payslip_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/deductions.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/deductions.yaml"
/// );
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

    /// The deduction catalog is structurally unusable.
    #[error("Invalid deduction catalog: {message}")]
    InvalidCatalog {
        /// What is wrong with the catalog.
        message: String,
    },

    /// The payroll extract could not be decoded.
    #[error("Invalid payroll extract: {message}")]
    InvalidExtract {
        /// A description of the decoding failure.
        message: String,
    },

    /// The extract file name does not carry a `MMYY` pay period.
    #[error("Cannot derive pay period from extract name '{name}'")]
    InvalidExtractName {
        /// The offending file name.
        name: String,
    },

    /// A month number outside 1..=12 was supplied.
    #[error("Invalid pay period month: {month}")]
    InvalidPayPeriod {
        /// The month number that was rejected.
        month: u32,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
