//! Response types for the salary calculation engine API.
//!
//! This module defines the success and error response structures and the
//! mapping from engine errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::CountrySummary;
use crate::error::EngineError;
use crate::models::{AuditTrace, SalaryBreakdown};

/// An amount together with its locale-formatted rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayAmount {
    /// The numeric amount in the display currency.
    pub amount: Decimal,
    /// The amount formatted for display (e.g. "1 551,96 лв.").
    pub formatted: String,
}

/// The headline figures converted into the requested display currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySummary {
    /// The display currency code.
    pub currency: String,
    /// The gross salary in the display currency.
    pub gross_salary: DisplayAmount,
    /// The net salary in the display currency.
    pub net_salary: DisplayAmount,
    /// The total cost to company in the display currency.
    pub total_cost_to_company: DisplayAmount,
}

/// Response body for the `/calculate` endpoint.
///
/// Wraps the deterministic [`SalaryBreakdown`] and audit trace in a
/// per-request envelope carrying the calculation id, timestamp, and
/// timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Unique identifier of this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The engine version that produced the result.
    pub engine_version: String,
    /// The country the calculation ran for.
    pub country_code: String,
    /// The local currency all breakdown amounts are in.
    pub currency: String,
    /// The calculated breakdown.
    pub breakdown: SalaryBreakdown,
    /// Headline figures in the requested display currency.
    pub display: DisplaySummary,
    /// The audit trace explaining the breakdown.
    pub audit_trace: AuditTrace,
    /// The calculation duration in microseconds.
    pub duration_us: u64,
}

/// Response body for the `/countries` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountriesResponse {
    /// All configured countries, sorted by code.
    pub countries: Vec<CountrySummary>,
    /// The code of the default country.
    #[serde(rename = "default")]
    pub default_code: String,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a country not found error response.
    pub fn country_not_found(code: &str) -> Self {
        Self::with_details(
            "COUNTRY_NOT_FOUND",
            format!("Country configuration not found: {}", code),
            format!("The country code '{}' is not supported by this engine", code),
        )
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidConfig { code, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Invalid configuration",
                    format!("Invalid configuration for country '{}': {}", code, message),
                ),
            },
            EngineError::CountryNotFound { code } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::country_not_found(&code),
            },
            EngineError::UnsupportedCurrency { from, to } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "UNSUPPORTED_CURRENCY",
                    format!("Currency conversion not supported: {} to {}", from, to),
                    format!("No exchange rate is configured between '{}' and '{}'", from, to),
                ),
            },
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_INPUT",
                    format!("Invalid input '{}': {}", field, message),
                    "The calculation input contains invalid information",
                ),
            },
        }
    }
}
