//! Error handler for converting AppError to HTTP responses.
//!
//! Implements the IntoResponse trait for AppError, the single place
//! every handler and extractor failure funnels through. Internal
//! failures are logged with their sources and sanitized before leaving
//! the process.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::dto::ErrorResponse;
use crate::error::{AppError, join_field_errors};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            AppError::NotFound {
                entity,
                field,
                value,
            } => (
                StatusCode::NOT_FOUND,
                ErrorResponse::not_found_error(entity, field, value),
            ),
            AppError::Duplicate {
                entity,
                field,
                value,
            } => (
                StatusCode::CONFLICT,
                ErrorResponse::duplicate_error(entity, field, value),
            ),
            AppError::Validation { field, reason } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::validation_error(field, reason),
            ),
            AppError::ValidationErrors { errors } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("VALIDATION_ERROR", &join_field_errors(errors))
                    .with_field_errors(errors.clone()),
            ),
            AppError::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("BAD_REQUEST", message),
            ),
            AppError::InsertFailed { .. } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("INSERT_FAILED", &self.to_string()),
            ),
            AppError::UpdateFailed { .. } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("UPDATE_FAILED", &self.to_string()),
            ),
            AppError::DeleteFailed { .. } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("DELETE_FAILED", &self.to_string()),
            ),
            AppError::Unauthorized { message } => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("UNAUTHORIZED", message),
            ),
            AppError::Forbidden { message } => (
                StatusCode::FORBIDDEN,
                ErrorResponse::new("FORBIDDEN", message),
            ),
            AppError::Database { operation, source } => {
                tracing::error!(operation = %operation, error = %source, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "DATABASE_ERROR",
                        &format!("Database operation failed: {}", operation),
                    ),
                )
            }
            AppError::Configuration { key, source } => {
                tracing::error!(key = %key, error = %source, "Configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("CONFIGURATION_ERROR", &format!("Configuration error: {}", key)),
                )
            }
            AppError::ConnectionPool { source } => {
                tracing::error!(error = %source, "Connection pool error");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::new("SERVICE_UNAVAILABLE", "Database connection unavailable"),
                )
            }
            AppError::Internal { source } => {
                tracing::error!(error = %source, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred"),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::ValidationErrors { .. } => StatusCode::BAD_REQUEST,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::InsertFailed { .. } => StatusCode::BAD_REQUEST,
        AppError::UpdateFailed { .. } => StatusCode::BAD_REQUEST,
        AppError::DeleteFailed { .. } => StatusCode::BAD_REQUEST,
        AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
        AppError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationFieldError;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = AppError::NotFound {
            entity: "cat".to_string(),
            field: "cat_id".to_string(),
            value: "7".to_string(),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::NOT_FOUND);
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_duplicate_maps_to_409() {
        let error = AppError::Duplicate {
            entity: "users".to_string(),
            field: "email".to_string(),
            value: "musti@example.com".to_string(),
        };
        assert_eq!(error.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_validation_errors_map_to_400() {
        let error = AppError::ValidationErrors {
            errors: vec![ValidationFieldError {
                field: "weight".to_string(),
                message: "Weight must be positive".to_string(),
            }],
        };
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_mutation_failures_map_to_400() {
        for error in [
            AppError::InsertFailed { entity: "cat" },
            AppError::UpdateFailed {
                entity: "cat",
                id: 7,
            },
            AppError::DeleteFailed {
                entity: "user",
                id: 3,
            },
        ] {
            assert_eq!(error_to_status_code(&error), StatusCode::BAD_REQUEST);
            assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_auth_failures() {
        let unauthorized = AppError::Unauthorized {
            message: "Token has expired".to_string(),
        };
        assert_eq!(
            unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );

        let forbidden = AppError::Forbidden {
            message: "Admin only".to_string(),
        };
        assert_eq!(forbidden.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_infrastructure_failures_are_sanitized() {
        let error = AppError::Database {
            operation: "insert cat".to_string(),
            source: anyhow::anyhow!("connection reset with credentials inside"),
        };
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let error = AppError::ConnectionPool {
            source: anyhow::anyhow!("pool exhausted"),
        };
        assert_eq!(
            error.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
