//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use axum::{Router, extract::DefaultBodyLimit, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added
/// runs first): the request ID is assigned before logging so every log
/// line can carry it.
///
/// # Routes
/// - `/api/cats`   - Cat CRUD operations
/// - `/api/users`  - User CRUD operations plus self-service and token check
/// - `/api/auth`   - Login and token refresh
/// - `/health`     - Probes
/// - `/swagger-ui` - API documentation
pub fn create_router(state: AppState) -> Router {
    let max_body = state.upload_config.max_file_size;

    let api_routes = Router::new()
        .nest("/cats", handlers::cats::cat_routes())
        .nest("/users", handlers::users::user_routes())
        .nest("/auth", handlers::auth::auth_routes());

    Router::new()
        .nest("/api", api_routes)
        .merge(handlers::health::health_routes())
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        // Middleware is applied in reverse order - last added runs first
        // So logging runs after request_id has set the ID
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
