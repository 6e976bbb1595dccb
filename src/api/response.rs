//! Response types for the Payslip Extract Engine API.
//!
//! This module defines the success payloads, the error response structure
//! and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{Breakdown, ExtractSummary, PayslipRecord};

/// Response body of the `/breakdowns` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchBreakdownResponse {
    /// One breakdown per request row, in request order.
    pub breakdowns: Vec<Breakdown>,
}

/// Response body of the `/extract` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResponse {
    /// Month number of the pay period.
    pub month: u32,
    /// English month name of the pay period.
    pub month_name: String,
    /// Four-digit year of the pay period.
    pub year: i32,
    /// Payslips for matched rows, in extract order.
    pub payslips: Vec<PayslipRecord>,
    /// Rows skipped because no employee matched.
    pub skipped: usize,
}

impl From<ExtractSummary> for ExtractResponse {
    fn from(summary: ExtractSummary) -> Self {
        Self {
            month: summary.pay_period.month_number(),
            month_name: summary.pay_period.month_name().to_string(),
            year: summary.pay_period.year,
            payslips: summary.payslips,
            skipped: summary.skipped,
        }
    }
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

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a missing query parameter error response.
    pub fn missing_query(message: impl Into<String>) -> Self {
        Self::with_details(
            "MISSING_QUERY",
            message,
            "The extract file name must be supplied as ?file_name=",
        )
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
            EngineError::InvalidCatalog { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Invalid deduction catalog", message),
            },
            EngineError::InvalidExtract { message } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "INVALID_EXTRACT",
                    format!("Invalid payroll extract: {}", message),
                    "The uploaded file is not a readable dBase table",
                ),
            },
            EngineError::InvalidExtractName { name } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_EXTRACT_NAME",
                    format!("Cannot derive pay period from extract name '{}'", name),
                    "Extract names carry the pay period as MMYY at positions 5-8 (e.g. SAL_0525.dbf)",
                ),
            },
            EngineError::InvalidPayPeriod { month } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(format!(
                    "Invalid pay period month: {}",
                    month
                )),
            },
        }
    }
}
