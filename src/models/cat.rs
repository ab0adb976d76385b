use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::models::GeoPoint;

/// Cat model for reading from database.
/// Derives Queryable for SELECT operations and Selectable for type-safe column selection.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::cats)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Cat {
    pub cat_id: i32,
    pub cat_name: String,
    pub weight: f64,
    /// References `users.user_id`; set once at creation.
    pub owner: i32,
    /// Name of the stored upload, relative to the upload directory.
    pub filename: String,
    pub birthdate: NaiveDate,
    pub coords: GeoPoint,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// NewCat model for inserting new records. The owner always comes from
/// the authenticated caller, never from the request body.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::cats)]
pub struct NewCat {
    pub cat_name: String,
    pub weight: f64,
    pub owner: i32,
    pub filename: String,
    pub birthdate: NaiveDate,
    pub coords: GeoPoint,
}

/// UpdateCat model for partial updates. `owner` and `filename` are not
/// part of the changeset: ownership is immutable and the stored file is
/// only written at creation time.
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::cats)]
pub struct UpdateCat {
    pub cat_name: Option<String>,
    pub weight: Option<f64>,
    pub birthdate: Option<NaiveDate>,
    pub coords: Option<GeoPoint>,
}

impl UpdateCat {
    /// True when no field would be written; an empty changeset is a
    /// request error, not a query.
    pub fn is_noop(&self) -> bool {
        self.cat_name.is_none()
            && self.weight.is_none()
            && self.birthdate.is_none()
            && self.coords.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_cat_noop_detection() {
        assert!(UpdateCat::default().is_noop());

        let update = UpdateCat {
            weight: Some(4.2),
            ..Default::default()
        };
        assert!(!update.is_noop());
    }
}
