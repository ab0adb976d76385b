use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::UserRole;

/// Token type enumeration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Access token for API authentication (short-lived)
    Access,
    /// Refresh token for obtaining new access tokens (long-lived)
    Refresh,
}

/// JWT Claims structure containing the caller identity and token metadata
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Username
    pub user_name: String,
    /// Account role, carried so handlers can authorize without a lookup
    pub role: UserRole,
    /// Token type (access or refresh)
    pub token_type: TokenType,
    /// Issued at (timestamp)
    pub iat: i64,
    /// Expiration time (timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user with the given validity in hours.
    pub fn new(
        user_id: i32,
        user_name: String,
        role: UserRole,
        token_type: TokenType,
        expiration_hours: i64,
    ) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: user_id.to_string(),
            user_name,
            role,
            token_type,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }
}

/// Generates a signed JWT for a user.
pub fn generate_token(
    user_id: i32,
    user_name: String,
    role: UserRole,
    token_type: TokenType,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    let claims = Claims::new(user_id, user_name, role, token_type, expiration_hours);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
    })
}

/// Generates an access token (short-lived).
pub fn generate_access_token(
    user_id: i32,
    user_name: String,
    role: UserRole,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    generate_token(
        user_id,
        user_name,
        role,
        TokenType::Access,
        secret,
        expiration_hours,
    )
}

/// Generates a refresh token (long-lived).
pub fn generate_refresh_token(
    user_id: i32,
    user_name: String,
    role: UserRole,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    generate_token(
        user_id,
        user_name,
        role,
        TokenType::Refresh,
        secret,
        expiration_hours,
    )
}

/// Generates both access and refresh tokens.
///
/// # Returns
/// A tuple of (access_token, refresh_token)
pub fn generate_token_pair(
    user_id: i32,
    user_name: String,
    role: UserRole,
    secret: &str,
    access_expiration_hours: i64,
    refresh_expiration_hours: i64,
) -> AppResult<(String, String)> {
    let access_token = generate_access_token(
        user_id,
        user_name.clone(),
        role,
        secret,
        access_expiration_hours,
    )?;

    let refresh_token =
        generate_refresh_token(user_id, user_name, role, secret, refresh_expiration_hours)?;

    Ok((access_token, refresh_token))
}

/// Validates and decodes a JWT, optionally enforcing the token type.
pub fn validate_token(
    token: &str,
    secret: &str,
    expected_type: Option<TokenType>,
) -> AppResult<Claims> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::Unauthorized {
            message: "Token has expired".to_string(),
        },
        jsonwebtoken::errors::ErrorKind::InvalidToken => AppError::Unauthorized {
            message: "Invalid token".to_string(),
        },
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AppError::Unauthorized {
            message: "Invalid token signature".to_string(),
        },
        _ => AppError::Unauthorized {
            message: format!("Token validation failed: {}", e),
        },
    })?;

    if let Some(expected) = expected_type {
        if claims.token_type != expected {
            return Err(AppError::Unauthorized {
                message: format!(
                    "Invalid token type: expected {:?}, got {:?}",
                    expected, claims.token_type
                ),
            });
        }
    }

    Ok(claims)
}

/// Validates an access token.
pub fn validate_access_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Access))
}

/// Validates a refresh token.
pub fn validate_refresh_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Refresh))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test_secret_key_at_least_32_characters_long";

    #[test]
    fn test_generate_and_validate_access_token() {
        let token = generate_access_token(3, "musti_owner".to_string(), UserRole::User, TEST_SECRET, 1)
            .unwrap();

        let claims = validate_access_token(&token, TEST_SECRET).unwrap();
        assert_eq!(claims.sub, "3");
        assert_eq!(claims.user_name, "musti_owner");
        assert_eq!(claims.role, UserRole::User);
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn test_refresh_token_rejected_as_access_token() {
        let token = generate_refresh_token(3, "musti_owner".to_string(), UserRole::User, TEST_SECRET, 168)
            .unwrap();

        let result = validate_access_token(&token, TEST_SECRET);
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[test]
    fn test_token_pair_types() {
        let (access, refresh) = generate_token_pair(
            1,
            "admin".to_string(),
            UserRole::Admin,
            TEST_SECRET,
            1,
            168,
        )
        .unwrap();

        assert!(validate_access_token(&access, TEST_SECRET).is_ok());
        assert!(validate_refresh_token(&refresh, TEST_SECRET).is_ok());
        assert!(validate_refresh_token(&access, TEST_SECRET).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token =
            generate_access_token(1, "admin".to_string(), UserRole::Admin, TEST_SECRET, 1).unwrap();

        let result = validate_access_token(&token, "another_secret_also_32_characters!!");
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[test]
    fn test_role_survives_round_trip() {
        let token =
            generate_access_token(2, "admin".to_string(), UserRole::Admin, TEST_SECRET, 1).unwrap();

        let claims = validate_access_token(&token, TEST_SECRET).unwrap();
        assert_eq!(claims.role, UserRole::Admin);
    }
}
