//! Authentication handlers for login and token refresh.

use axum::{Json, Router, extract::State, routing::post};

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::jwt::{generate_token_pair, validate_refresh_token};
use crate::utils::validate::ValidatedJson;

/// Creates the authentication routes.
///
/// Routes:
/// - `POST /login`   - Authenticate and get a token pair
/// - `POST /refresh` - Trade a refresh token for a new pair
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh_token))
}

/// POST /api/auth/login - Authenticate user
///
/// The same 401 comes back for an unknown email and a wrong password.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (user, access_token, refresh_token) = state
        .services
        .users
        .authenticate(&payload.email, &payload.password, &state.jwt_config)
        .await?;

    Ok(Json(LoginResponse {
        user: user.into(),
        access_token,
        refresh_token,
    }))
}

/// POST /api/auth/refresh - Refresh the token pair
///
/// The refresh token must still verify and its user must still exist.
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = AUTH_TAG,
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Tokens refreshed", body = RefreshTokenResponse),
        (status = 401, description = "Invalid or expired refresh token")
    )
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefreshTokenRequest>,
) -> AppResult<Json<RefreshTokenResponse>> {
    let claims = validate_refresh_token(&payload.refresh_token, &state.jwt_config.secret)?;

    let user_id: i32 = claims.sub.parse().map_err(|_| AppError::Unauthorized {
        message: "Invalid user ID in token".to_string(),
    })?;

    let user = state.services.users.get_user(user_id).await?;

    let (access_token, refresh_token) = generate_token_pair(
        user.user_id,
        user.user_name.clone(),
        user.role,
        &state.jwt_config.secret,
        state.jwt_config.access_token_expiration,
        state.jwt_config.refresh_token_expiration,
    )?;

    Ok(Json(RefreshTokenResponse {
        access_token,
        refresh_token,
    }))
}
