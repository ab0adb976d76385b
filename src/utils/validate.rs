use axum::Json;
use axum::extract::{FromRequest, Request, rejection::JsonRejection};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// JSON extractor that runs `validator` rules after deserialization.
///
/// Deserialization failures become `BadRequest`; rule failures become
/// `ValidationErrors` carrying one entry per failing field.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[validate(length(
            min = 3,
            max = 20,
            message = "Name must be between 3 and 20 characters"
        ))]
        user_name: String,
        #[validate(email(message = "Invalid email format"))]
        email: String,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let request =
            json_request(r#"{"user_name": "musti_owner", "email": "musti@example.com"}"#);

        let result = ValidatedJson::<TestBody>::from_request(request, &()).await;

        assert!(result.is_ok());
        let ValidatedJson(body) = result.unwrap();
        assert_eq!(body.user_name, "musti_owner");
        assert_eq!(body.email, "musti@example.com");
    }

    #[tokio::test]
    async fn test_single_failing_field() {
        let request = json_request(r#"{"user_name": "ab", "email": "musti@example.com"}"#);

        let result = ValidatedJson::<TestBody>::from_request(request, &()).await;

        let error = result.unwrap_err();
        match error {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "user_name");
                assert!(errors[0].message.contains("between 3 and 20 characters"));
            }
            other => panic!("Expected ValidationErrors, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_every_failing_field_is_listed() {
        let request = json_request(r#"{"user_name": "ab", "email": "not-an-email"}"#);

        let result = ValidatedJson::<TestBody>::from_request(request, &()).await;

        let error = result.unwrap_err();
        match error {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 2);
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert!(fields.contains(&"user_name"));
                assert!(fields.contains(&"email"));
                // client-facing message joins every field with ", "
                let message = crate::error::join_field_errors(&errors);
                assert!(message.contains(", "));
            }
            other => panic!("Expected ValidationErrors, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let request = json_request(r#"{"user_name": "musti_owner""#);

        let result = ValidatedJson::<TestBody>::from_request(request, &()).await;

        let error = result.unwrap_err();
        match error {
            AppError::BadRequest { message } => assert!(!message.is_empty()),
            other => panic!("Expected BadRequest, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/test")
            .body(Body::from(
                r#"{"user_name": "musti_owner", "email": "musti@example.com"}"#,
            ))
            .unwrap();

        let result = ValidatedJson::<TestBody>::from_request(request, &()).await;

        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }
}
