//! JWT authentication extractors.
//!
//! Handlers declare the identity they need in their signature:
//! `AuthUser` rejects the request when no valid access token is present,
//! `MaybeAuthUser` never rejects and carries `None` instead.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::UserRole;
use crate::state::AppState;
use crate::utils::jwt::{Claims, validate_access_token};

/// Authenticated caller identity decoded from the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// User ID from JWT claims
    pub user_id: i32,
    /// Username from JWT claims
    pub user_name: String,
    /// Account role from JWT claims
    pub role: UserRole,
}

impl AuthUser {
    /// Admin gate for the user-management endpoints.
    pub fn require_admin(&self) -> Result<(), AppError> {
        match self.role {
            UserRole::Admin => Ok(()),
            UserRole::User => Err(AppError::Forbidden {
                message: "Admin only".to_string(),
            }),
        }
    }
}

impl TryFrom<Claims> for AuthUser {
    type Error = AppError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let user_id = claims.sub.parse().map_err(|_| AppError::Unauthorized {
            message: "Invalid user ID in token".to_string(),
        })?;

        Ok(Self {
            user_id,
            user_name: claims.user_name,
            role: claims.role,
        })
    }
}

/// Pulls the token out of `Authorization: Bearer <token>`.
fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let value = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized {
            message: "Missing authorization header".to_string(),
        })?;

    value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized {
            message: "Invalid authorization header format. Expected: Bearer <token>".to_string(),
        })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = validate_access_token(token, &state.jwt_config.secret)?;
        AuthUser::try_from(claims)
    }
}

/// Extractor variant that never rejects; endpoints with different
/// behavior for authenticated and anonymous callers match on the inner
/// `Option`.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(
            AuthUser::from_request_parts(parts, state).await.ok(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::TokenType;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some(value) = value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_auth_user_from_claims() {
        let claims = Claims {
            sub: "3".to_string(),
            user_name: "musti_owner".to_string(),
            role: UserRole::User,
            token_type: TokenType::Access,
            iat: 0,
            exp: 9999999999,
        };

        let auth_user = AuthUser::try_from(claims).unwrap();
        assert_eq!(auth_user.user_id, 3);
        assert_eq!(auth_user.user_name, "musti_owner");
        assert_eq!(auth_user.role, UserRole::User);
    }

    #[test]
    fn test_auth_user_from_claims_invalid_id() {
        let claims = Claims {
            sub: "not-a-number".to_string(),
            user_name: "musti_owner".to_string(),
            role: UserRole::User,
            token_type: TokenType::Access,
            iat: 0,
            exp: 9999999999,
        };

        assert!(matches!(
            AuthUser::try_from(claims),
            Err(AppError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_bearer_token_missing_header() {
        let parts = parts_with_auth(None);
        assert!(matches!(
            bearer_token(&parts),
            Err(AppError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let parts = parts_with_auth(Some("Basic dXNlcjpwYXNz"));
        assert!(matches!(
            bearer_token(&parts),
            Err(AppError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_bearer_token_extracted() {
        let parts = parts_with_auth(Some("Bearer token-value"));
        assert_eq!(bearer_token(&parts).unwrap(), "token-value");
    }

    #[test]
    fn test_require_admin() {
        let admin = AuthUser {
            user_id: 1,
            user_name: "admin".to_string(),
            role: UserRole::Admin,
        };
        assert!(admin.require_admin().is_ok());

        let user = AuthUser {
            user_id: 3,
            user_name: "musti_owner".to_string(),
            role: UserRole::User,
        };
        assert!(matches!(
            user.require_admin(),
            Err(AppError::Forbidden { .. })
        ));
    }
}
