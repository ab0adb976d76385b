use crate::error::DatabaseErrorConverter;
use serde::Serialize;
use thiserror::Error;

/// A single failing field from request validation.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

/// Joins field errors into one client-facing message, every failing
/// field listed, `", "`-separated.
pub fn join_field_errors(errors: &[ValidationFieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.message, e.field))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Application-wide error type covering every failure the API surfaces.
///
/// Mutations that affect zero rows map to the `*Failed` variants; that is
/// a terminal failure everywhere, never retried.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found error with entity, field, and value information
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Duplicate entry error for unique constraint violations
    #[error("Duplicate entry: {entity}.{field} = '{value}' already exists")]
    Duplicate {
        entity: String,
        field: String,
        value: String,
    },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Request validation failures, one entry per failing field
    #[error("{}", join_field_errors(.errors))]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// INSERT affected zero rows
    #[error("No {entity} inserted")]
    InsertFailed { entity: &'static str },

    /// UPDATE affected zero rows (missing row and denied ownership are
    /// deliberately indistinguishable here)
    #[error("No {entity} updated with id {id}")]
    UpdateFailed { entity: &'static str, id: i32 },

    /// DELETE affected zero rows
    #[error("No {entity} deleted with id {id}")]
    DeleteFailed { entity: &'static str, id: i32 },

    /// Unauthorized access error with authentication message
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Forbidden access error with authorization message
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<bb8::RunError<diesel_async::pooled_connection::PoolError>> for AppError {
    fn from(error: bb8::RunError<diesel_async::pooled_connection::PoolError>) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::new(error),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<ValidationFieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| ValidationFieldError {
                    field: field.to_string(),
                    message: err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();
        // HashMap iteration order is arbitrary; keep messages stable
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::ValidationErrors { errors: fields }
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(error: axum::extract::multipart::MultipartError) -> Self {
        AppError::BadRequest {
            message: format!("Multipart error: {}", error),
        }
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(error: argon2::password_hash::Error) -> Self {
        AppError::Internal {
            source: anyhow::anyhow!("password hashing failed: {}", error),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        AppError::Internal {
            source: anyhow::Error::new(error),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_field_errors_lists_every_field() {
        let errors = vec![
            ValidationFieldError {
                field: "cat_name".to_string(),
                message: "Cat name must be between 1 and 255 characters".to_string(),
            },
            ValidationFieldError {
                field: "weight".to_string(),
                message: "Weight must be positive".to_string(),
            },
        ];

        assert_eq!(
            join_field_errors(&errors),
            "Cat name must be between 1 and 255 characters: cat_name, Weight must be positive: weight"
        );
    }

    #[test]
    fn test_validation_errors_display_uses_joined_message() {
        let error = AppError::ValidationErrors {
            errors: vec![ValidationFieldError {
                field: "email".to_string(),
                message: "Invalid email format".to_string(),
            }],
        };

        assert_eq!(error.to_string(), "Invalid email format: email");
    }

    #[test]
    fn test_update_failed_display() {
        let error = AppError::UpdateFailed {
            entity: "cat",
            id: 7,
        };
        assert_eq!(error.to_string(), "No cat updated with id 7");
    }
}
