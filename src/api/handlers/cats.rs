//! Cat CRUD request handlers.
//!
//! Creation is multipart: the image file is stored under the configured
//! upload directory and the generated filename is persisted with the
//! row. The owner of a new cat is always the authenticated caller;
//! nothing in the request body can override it.

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    routing::get,
};
use chrono::NaiveDate;
use uuid::Uuid;
use validator::Validate;

use crate::api::doc::CAT_TAG;
use crate::api::dto::{CatResponse, CreateCatRequest, MessageResponse, UpdateCatRequest};
use crate::api::middleware::AuthUser;
use crate::error::{AppError, AppResult, ValidationFieldError};
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates cat-related routes.
///
/// Routes:
/// - GET /        - List all cats (public)
/// - POST /       - Create a new cat (authenticated, multipart)
/// - GET /{id}    - Get cat by ID (public)
/// - PUT /{id}    - Update cat by ID (owner or admin)
/// - DELETE /{id} - Delete cat by ID (authenticated)
pub fn cat_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cats).post(create_cat))
        .route("/{id}", get(get_cat).put(update_cat).delete(delete_cat))
}

/// GET /api/cats - List all cats
///
/// Returns every cat with its owner embedded. An empty table is a 404,
/// not an empty array.
#[utoipa::path(
    get,
    path = "/api/cats",
    tag = CAT_TAG,
    responses(
        (status = 200, description = "All cats with embedded owners", body = [CatResponse]),
        (status = 404, description = "No cats exist")
    )
)]
pub async fn list_cats(State(state): State<AppState>) -> AppResult<Json<Vec<CatResponse>>> {
    let cats = state.services.cats.list_cats().await?;
    Ok(Json(cats.into_iter().map(CatResponse::from).collect()))
}

/// GET /api/cats/{id} - Get cat by ID
///
/// A non-numeric id is rejected as 400 before the handler runs.
#[utoipa::path(
    get,
    path = "/api/cats/{id}",
    tag = CAT_TAG,
    params(("id" = i32, Path, description = "Cat ID")),
    responses(
        (status = 200, description = "The cat with its embedded owner", body = CatResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "No such cat")
    )
)]
pub async fn get_cat(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CatResponse>> {
    let cat = state.services.cats.get_cat(id).await?;
    Ok(Json(CatResponse::from(cat)))
}

/// POST /api/cats - Create a new cat
///
/// Multipart form with fields `cat_name`, `weight`, `birthdate`, `lat`,
/// `lng` and a `file` part. Every failing field is reported; a missing
/// file is a request error.
#[utoipa::path(
    post,
    path = "/api/cats",
    tag = CAT_TAG,
    responses(
        (status = 200, description = "Cat added", body = MessageResponse),
        (status = 400, description = "Validation failure or missing file"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearerAuth" = []))
)]
pub async fn create_cat(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<MessageResponse>> {
    let mut cat_name: Option<String> = None;
    let mut weight: Option<f64> = None;
    let mut birthdate: Option<NaiveDate> = None;
    let mut lat: Option<f64> = None;
    let mut lng: Option<f64> = None;
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut errors: Vec<ValidationFieldError> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("file") => {
                let original = field.file_name().map(|n| n.to_string()).unwrap_or_default();
                let data = field.bytes().await?.to_vec();
                file = Some((original, data));
            }
            Some("cat_name") => cat_name = Some(field.text().await?),
            Some("weight") => match field.text().await?.parse() {
                Ok(value) => weight = Some(value),
                Err(_) => errors.push(field_error("weight", "Weight must be a number")),
            },
            Some("birthdate") => match field.text().await?.parse() {
                Ok(value) => birthdate = Some(value),
                Err(_) => errors.push(field_error(
                    "birthdate",
                    "Birthdate must be an ISO date (YYYY-MM-DD)",
                )),
            },
            Some("lat") => match field.text().await?.parse() {
                Ok(value) => lat = Some(value),
                Err(_) => errors.push(field_error("lat", "Latitude must be a number")),
            },
            Some("lng") => match field.text().await?.parse() {
                Ok(value) => lng = Some(value),
                Err(_) => errors.push(field_error("lng", "Longitude must be a number")),
            },
            // unknown fields are ignored, an attempted "owner" included
            _ => {}
        }
    }

    for (present, field, message) in [
        (cat_name.is_some(), "cat_name", "Cat name is required"),
        (weight.is_some(), "weight", "Weight is required"),
        (birthdate.is_some(), "birthdate", "Birthdate is required"),
        (lat.is_some(), "lat", "Latitude is required"),
        (lng.is_some(), "lng", "Longitude is required"),
    ] {
        if !present && !errors.iter().any(|e| e.field == field) {
            errors.push(field_error(field, message));
        }
    }

    if !errors.is_empty() {
        return Err(AppError::ValidationErrors { errors });
    }

    let request = CreateCatRequest {
        cat_name: cat_name.unwrap_or_default(),
        weight: weight.unwrap_or_default(),
        birthdate: birthdate.unwrap_or_default(),
        lat: lat.unwrap_or_default(),
        lng: lng.unwrap_or_default(),
    };
    request.validate()?;

    let (original_name, data) = file.ok_or_else(|| AppError::BadRequest {
        message: "File is missing".to_string(),
    })?;
    if data.is_empty() {
        return Err(AppError::BadRequest {
            message: "File is missing".to_string(),
        });
    }

    let filename = store_upload(&state.upload_config.dir, &original_name, &data).await?;

    let cat = state
        .services
        .cats
        .add_cat(request.into_new_cat(auth.user_id, filename))
        .await?;

    Ok(Json(MessageResponse::with_id("Cat added", cat.cat_id)))
}

/// PUT /api/cats/{id} - Update a cat
///
/// Admins may update any cat; users only their own. A user hitting
/// someone else's cat matches zero rows and gets the update failure.
#[utoipa::path(
    put,
    path = "/api/cats/{id}",
    tag = CAT_TAG,
    params(("id" = i32, Path, description = "Cat ID")),
    request_body = UpdateCatRequest,
    responses(
        (status = 200, description = "Cat updated", body = MessageResponse),
        (status = 400, description = "Validation failure or nothing updated"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearerAuth" = []))
)]
pub async fn update_cat(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateCatRequest>,
) -> AppResult<Json<MessageResponse>> {
    let changes = payload.into_update_cat()?;

    state
        .services
        .cats
        .update_cat(id, changes, auth.user_id, auth.role)
        .await?;

    Ok(Json(MessageResponse::with_id("Cat updated", id)))
}

/// DELETE /api/cats/{id} - Delete a cat
///
/// Any authenticated caller; deletion is not ownership-checked.
#[utoipa::path(
    delete,
    path = "/api/cats/{id}",
    tag = CAT_TAG,
    params(("id" = i32, Path, description = "Cat ID")),
    responses(
        (status = 200, description = "Cat deleted", body = MessageResponse),
        (status = 400, description = "Nothing deleted"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearerAuth" = []))
)]
pub async fn delete_cat(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.cats.delete_cat(id).await?;
    Ok(Json(MessageResponse::with_id("Cat deleted", id)))
}

fn field_error(field: &str, message: &str) -> ValidationFieldError {
    ValidationFieldError {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Writes the upload under a generated name, keeping only the original
/// extension. The client-supplied name never touches the filesystem.
async fn store_upload(
    dir: &std::path::Path,
    original_name: &str,
    data: &[u8],
) -> AppResult<String> {
    let extension = std::path::Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let filename = match extension {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
        None => Uuid::new_v4().to_string(),
    };

    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(dir.join(&filename), data).await?;

    Ok(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_upload_generates_name_with_extension() {
        let dir = tempfile::tempdir().unwrap();

        let filename = store_upload(dir.path(), "musti.JPG", b"fake image data")
            .await
            .unwrap();

        assert!(filename.ends_with(".jpg"));
        assert!(!filename.contains("musti"));
        let stored = std::fs::read(dir.path().join(&filename)).unwrap();
        assert_eq!(stored, b"fake image data");
    }

    #[tokio::test]
    async fn test_store_upload_ignores_path_components() {
        let dir = tempfile::tempdir().unwrap();

        let filename = store_upload(dir.path(), "../../../etc/passwd", b"data")
            .await
            .unwrap();

        assert!(!filename.contains(".."));
        assert!(!filename.contains('/'));
        assert!(dir.path().join(&filename).exists());
    }

    #[tokio::test]
    async fn test_store_upload_without_extension() {
        let dir = tempfile::tempdir().unwrap();

        let filename = store_upload(dir.path(), "noext", b"data").await.unwrap();

        assert!(!filename.contains('.'));
        assert!(dir.path().join(&filename).exists());
    }
}
