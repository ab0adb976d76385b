//! Error response DTOs.

use serde::Serialize;

use crate::error::ValidationFieldError;

/// Standard error response format.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<Vec<ValidationFieldError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response with code and message.
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            field_errors: None,
            request_id: None,
        }
    }

    /// Not-found response for a single entity lookup or an empty listing.
    pub fn not_found_error(entity: &str, field: &str, value: &str) -> Self {
        Self::new(
            "NOT_FOUND",
            &format!("No {} found with {}={}", entity, field, value),
        )
    }

    /// Conflict response for a unique constraint violation.
    pub fn duplicate_error(entity: &str, field: &str, value: &str) -> Self {
        Self::new(
            "DUPLICATE_ENTRY",
            &format!("{}.{} = '{}' already exists", entity, field, value),
        )
    }

    /// Validation response for a single failing field.
    pub fn validation_error(field: &str, reason: &str) -> Self {
        Self::new("VALIDATION_ERROR", &format!("{}: {}", reason, field))
    }

    /// Attaches the per-field breakdown to the response.
    pub fn with_field_errors(mut self, errors: Vec<ValidationFieldError>) -> Self {
        self.field_errors = Some(errors);
        self
    }

    /// Adds request ID to the error response for correlation.
    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }
}
