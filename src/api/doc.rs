use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub const CAT_TAG: &str = "Cat";
pub const USER_TAG: &str = "User";
pub const AUTH_TAG: &str = "Auth";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catmap",
        description = "REST API for a cat registry with geotagged records and owner accounts",
    ),
    modifiers(&SecurityAddon),
    paths(
        crate::api::handlers::cats::list_cats,
        crate::api::handlers::cats::get_cat,
        crate::api::handlers::cats::create_cat,
        crate::api::handlers::cats::update_cat,
        crate::api::handlers::cats::delete_cat,
        crate::api::handlers::users::list_users,
        crate::api::handlers::users::get_user,
        crate::api::handlers::users::create_user,
        crate::api::handlers::users::update_user,
        crate::api::handlers::users::delete_user,
        crate::api::handlers::me::update_me,
        crate::api::handlers::me::delete_me,
        crate::api::handlers::me::check_token,
        crate::api::handlers::auth::login,
        crate::api::handlers::auth::refresh_token,
        crate::api::handlers::health::health_check,
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::api::dto::MessageResponse,
        )
    ),
    tags(
        (name = CAT_TAG, description = "Cat registry endpoints"),
        (name = USER_TAG, description = "User management endpoints"),
        (name = AUTH_TAG, description = "Authentication endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer Token Authentication"))
                        .build(),
                ),
            )
        }
    }
}
