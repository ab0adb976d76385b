//! Authentication-related Data Transfer Objects

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::UserResponse;
use crate::models::UserRole;

/// Login request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    /// User's email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "musti@example.com", format = "email")]
    pub email: String,
    /// User's password (plain text)
    #[validate(length(
        min = 6,
        max = 30,
        message = "Password must be between 6 and 30 characters"
    ))]
    #[schema(format = "password", min_length = 6, max_length = 30)]
    pub password: String,
}

/// Refresh token request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token cannot be empty"))]
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub refresh_token: String,
}

/// Login response with user info and tokens
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub user: UserResponse,
    /// Access token (short-lived)
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub access_token: String,
    /// Refresh token (long-lived)
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub refresh_token: String,
}

/// Refresh response with a new token pair
#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshTokenResponse {
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub access_token: String,
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub refresh_token: String,
}

/// The authenticated identity, as returned by the token check.
#[derive(Debug, Serialize, ToSchema)]
pub struct IdentityResponse {
    #[schema(example = 3)]
    pub user_id: i32,
    #[schema(example = "musti_owner")]
    pub user_name: String,
    pub role: UserRole,
}
