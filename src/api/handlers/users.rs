//! User CRUD request handlers.
//!
//! Listing, fetching and registration are public. Mutating another
//! user's account is admin-only; the self-service variants live in the
//! `me` module and are mounted on the collection path.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::api::doc::USER_TAG;
use crate::api::dto::{CreateUserRequest, MessageResponse, UpdateUserRequest, UserResponse};
use crate::api::handlers::me;
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates user-related routes.
///
/// Routes:
/// - GET /         - List all users (public)
/// - POST /        - Register a new user (public)
/// - PUT /         - Update the caller's own account
/// - DELETE /      - Delete the caller's own account
/// - GET /token    - Echo the authenticated identity
/// - GET /{id}     - Get user by ID (public)
/// - PUT /{id}     - Update any user (admin)
/// - DELETE /{id}  - Delete any user (admin)
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_users)
                .post(create_user)
                .put(me::update_me)
                .delete(me::delete_me),
        )
        .route("/token", get(me::check_token))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}

/// GET /api/users - List all users
///
/// Password hashes never appear in the response. An empty table is a
/// 404, not an empty array.
#[utoipa::path(
    get,
    path = "/api/users",
    tag = USER_TAG,
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 404, description = "No users exist")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.services.users.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/users/{id} - Get user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 404, description = "No such user")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// POST /api/users - Register a new user
///
/// The submitted password is hashed before anything is persisted; the
/// new account always gets the `user` role.
#[utoipa::path(
    post,
    path = "/api/users",
    tag = USER_TAG,
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User added", body = MessageResponse),
        (status = 400, description = "Validation failure"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Json<MessageResponse>> {
    let user = state
        .services
        .users
        .create_user(payload.into_new_user())
        .await?;

    Ok(Json(MessageResponse::with_id("User added", user.user_id)))
}

/// PUT /api/users/{id} - Update any user (admin only)
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User modified", body = MessageResponse),
        (status = 400, description = "Validation failure or nothing updated"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearerAuth" = []))
)]
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<MessageResponse>> {
    auth.require_admin()?;

    state
        .services
        .users
        .update_user(id, payload.into_update_user())
        .await?;

    Ok(Json(MessageResponse::with_id("User modified", id)))
}

/// DELETE /api/users/{id} - Delete any user (admin only)
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Nothing deleted"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearerAuth" = []))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    auth.require_admin()?;

    state.services.users.delete_user(id).await?;

    Ok(Json(MessageResponse::with_id("User deleted", id)))
}
