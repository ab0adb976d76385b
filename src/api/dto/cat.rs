//! Cat-related DTOs for API requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{Cat, GeoPoint, NewCat, Owner, UpdateCat};

// ============================================================================
// Request DTOs
// ============================================================================

/// Fields of the multipart create request, assembled by the handler
/// before validation. The file part and the owner are handled
/// separately: the stored filename is generated, the owner is always the
/// authenticated caller.
#[derive(Debug, Validate)]
pub struct CreateCatRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Cat name must be between 1 and 255 characters"
    ))]
    pub cat_name: String,
    #[validate(range(
        min = 0.01,
        max = 200.0,
        message = "Weight must be between 0.01 and 200 kilograms"
    ))]
    pub weight: f64,
    pub birthdate: NaiveDate,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub lat: f64,
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub lng: f64,
}

impl CreateCatRequest {
    /// Builds the insertable row for the given owner and stored file.
    pub fn into_new_cat(self, owner: i32, filename: String) -> NewCat {
        NewCat {
            cat_name: self.cat_name,
            weight: self.weight,
            owner,
            filename,
            birthdate: self.birthdate,
            coords: GeoPoint::new(self.lat, self.lng),
        }
    }
}

/// Request body for the partial update. Coordinates, when changed, must
/// come as a full pair.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateCatRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Cat name must be between 1 and 255 characters"
    ))]
    pub cat_name: Option<String>,
    #[validate(range(
        min = 0.01,
        max = 200.0,
        message = "Weight must be between 0.01 and 200 kilograms"
    ))]
    pub weight: Option<f64>,
    #[schema(value_type = Option<String>, format = Date, example = "2020-01-01")]
    pub birthdate: Option<NaiveDate>,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub lat: Option<f64>,
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub lng: Option<f64>,
}

impl UpdateCatRequest {
    /// Converts into an UpdateCat changeset; a lone lat or lng is a
    /// validation failure.
    pub fn into_update_cat(self) -> AppResult<UpdateCat> {
        let coords = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            (None, None) => None,
            _ => {
                return Err(AppError::Validation {
                    field: "coords".to_string(),
                    reason: "lat and lng must be provided together".to_string(),
                });
            }
        };

        Ok(UpdateCat {
            cat_name: self.cat_name,
            weight: self.weight,
            birthdate: self.birthdate,
            coords,
        })
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Owner embedded into cat responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct OwnerResponse {
    #[schema(example = 3)]
    pub user_id: i32,
    #[schema(example = "musti_owner")]
    pub user_name: String,
}

impl From<Owner> for OwnerResponse {
    fn from(owner: Owner) -> Self {
        Self {
            user_id: owner.user_id,
            user_name: owner.user_name,
        }
    }
}

/// Response body for cat data with the owner embedded.
#[derive(Debug, Serialize, ToSchema)]
pub struct CatResponse {
    #[schema(example = 7)]
    pub cat_id: i32,
    #[schema(example = "Musti")]
    pub cat_name: String,
    #[schema(example = 4.2)]
    pub weight: f64,
    #[schema(example = "f4cfd1f0-cat.jpg")]
    pub filename: String,
    #[schema(value_type = String, format = Date, example = "2020-01-01")]
    pub birthdate: NaiveDate,
    #[schema(example = 60.2)]
    pub lat: f64,
    #[schema(example = 24.9)]
    pub lng: f64,
    pub owner: OwnerResponse,
}

impl From<(Cat, Owner)> for CatResponse {
    fn from((cat, owner): (Cat, Owner)) -> Self {
        Self {
            cat_id: cat.cat_id,
            cat_name: cat.cat_name,
            weight: cat.weight,
            filename: cat.filename,
            birthdate: cat.birthdate,
            lat: cat.coords.lat,
            lng: cat.coords.lng,
            owner: OwnerResponse::from(owner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cat() -> Cat {
        let created = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Cat {
            cat_id: 7,
            cat_name: "Musti".to_string(),
            weight: 4.2,
            owner: 3,
            filename: "f4cfd1f0-cat.jpg".to_string(),
            birthdate: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            coords: GeoPoint::new(60.2, 24.9),
            created_at: created,
            updated_at: created,
        }
    }

    fn sample_owner() -> Owner {
        Owner {
            user_id: 3,
            user_name: "musti_owner".to_string(),
        }
    }

    #[test]
    fn test_response_embeds_owner_and_flattens_coords() {
        let json = serde_json::to_value(CatResponse::from((sample_cat(), sample_owner()))).unwrap();

        assert_eq!(json["cat_id"], 7);
        assert_eq!(json["lat"], 60.2);
        assert_eq!(json["lng"], 24.9);
        assert_eq!(json["birthdate"], "2020-01-01");
        assert_eq!(json["owner"]["user_id"], 3);
        assert_eq!(json["owner"]["user_name"], "musti_owner");
    }

    #[test]
    fn test_update_request_requires_coordinate_pair() {
        let request: UpdateCatRequest = serde_json::from_str(r#"{"lat": 60.2}"#).unwrap();

        let result = request.into_update_cat();
        assert!(matches!(result, Err(AppError::Validation { field, .. }) if field == "coords"));
    }

    #[test]
    fn test_update_request_with_pair_builds_point() {
        let request: UpdateCatRequest =
            serde_json::from_str(r#"{"lat": 60.2, "lng": 24.9}"#).unwrap();

        let update = request.into_update_cat().unwrap();
        assert_eq!(update.coords, Some(GeoPoint::new(60.2, 24.9)));
        assert!(update.cat_name.is_none());
    }

    #[test]
    fn test_new_cat_owner_comes_from_caller() {
        let request = CreateCatRequest {
            cat_name: "Musti".to_string(),
            weight: 4.2,
            birthdate: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            lat: 60.2,
            lng: 24.9,
        };

        let new_cat = request.into_new_cat(3, "f4cfd1f0-cat.jpg".to_string());

        assert_eq!(new_cat.owner, 3);
        assert_eq!(new_cat.filename, "f4cfd1f0-cat.jpg");
        assert_eq!(new_cat.coords, GeoPoint::new(60.2, 24.9));
    }

    #[test]
    fn test_create_request_validation_bounds() {
        let request = CreateCatRequest {
            cat_name: String::new(),
            weight: -1.0,
            birthdate: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            lat: 120.0,
            lng: 24.9,
        };

        let errors = request.validate().unwrap_err();
        let fields: Vec<&str> = errors.field_errors().keys().map(|k| k.as_ref()).collect();
        assert!(fields.contains(&"cat_name"));
        assert!(fields.contains(&"weight"));
        assert!(fields.contains(&"lat"));
    }
}
