//! Error types for the salary calculation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during a calculation.

use thiserror::Error;

/// The main error type for the salary calculation engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use salary_engine::error::EngineError;
///
/// let error = EngineError::CountryNotFound {
///     code: "XX".to_string(),
/// };
/// assert_eq!(error.to_string(), "Country configuration not found: XX");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file or directory was not found at the specified path.
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

    /// Configuration parsed but violates a semantic constraint.
    #[error("Invalid configuration for country '{code}': {message}")]
    InvalidConfig {
        /// The country code of the offending configuration.
        code: String,
        /// A description of the constraint violation.
        message: String,
    },

    /// No tax configuration exists for the requested country code.
    #[error("Country configuration not found: {code}")]
    CountryNotFound {
        /// The country code that was not found.
        code: String,
    },

    /// A currency conversion was requested for a currency with no
    /// configured exchange rate.
    #[error("Currency conversion not supported: {from} to {to}")]
    UnsupportedCurrency {
        /// The currency converted from.
        from: String,
        /// The currency converted to.
        to: String,
    },

    /// A calculation input was out of range or otherwise unusable.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The input field that was invalid.
        field: String,
        /// A description of what made the input invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
