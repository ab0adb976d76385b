//! Self-service endpoints for the authenticated caller.
//!
//! These operate on the caller's own id taken from the token, with no
//! role check, and are mounted on the `/api/users` collection path.

use axum::{Json, extract::State};

use crate::api::doc::USER_TAG;
use crate::api::dto::{IdentityResponse, MessageResponse, UpdateMeRequest};
use crate::api::middleware::{AuthUser, MaybeAuthUser};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// PUT /api/users - Update the caller's own account
///
/// The request body has no role field; self-service can never escalate.
#[utoipa::path(
    put,
    path = "/api/users",
    tag = USER_TAG,
    request_body = UpdateMeRequest,
    responses(
        (status = 200, description = "User modified", body = MessageResponse),
        (status = 400, description = "Validation failure or nothing updated"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearerAuth" = []))
)]
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateMeRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .users
        .update_user(auth.user_id, payload.into_update_user())
        .await?;

    Ok(Json(MessageResponse::with_id("User modified", auth.user_id)))
}

/// DELETE /api/users - Delete the caller's own account
#[utoipa::path(
    delete,
    path = "/api/users",
    tag = USER_TAG,
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Nothing deleted"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearerAuth" = []))
)]
pub async fn delete_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<MessageResponse>> {
    state.services.users.delete_user(auth.user_id).await?;

    Ok(Json(MessageResponse::with_id("User deleted", auth.user_id)))
}

/// GET /api/users/token - Echo the authenticated identity
///
/// Requests without a usable token get 403 rather than 401; the
/// endpoint reports on the token instead of demanding one up front.
#[utoipa::path(
    get,
    path = "/api/users/token",
    tag = USER_TAG,
    responses(
        (status = 200, description = "The authenticated identity", body = IdentityResponse),
        (status = 403, description = "No valid token presented")
    ),
    security(("bearerAuth" = []))
)]
pub async fn check_token(maybe_auth: MaybeAuthUser) -> AppResult<Json<IdentityResponse>> {
    match maybe_auth.0 {
        Some(auth) => Ok(Json(IdentityResponse {
            user_id: auth.user_id,
            user_name: auth.user_name,
            role: auth.role,
        })),
        None => Err(AppError::Forbidden {
            message: "token not valid".to_string(),
        }),
    }
}
