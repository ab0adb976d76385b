//! Geographic point stored in a native Postgres `point` column.
//!
//! The column convention throughout the schema is x = latitude,
//! y = longitude.

use diesel::AsExpression;
use diesel::FromSqlRow;
use diesel::deserialize::{self, FromSql};
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::schema::sql_types::Point;

/// A `(lat, lng)` pair in decimal degrees.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Point)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Encodes into the 16-byte binary representation Postgres uses for
    /// `point`: two big-endian float8 values, x first.
    pub fn to_sql_bytes(&self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&self.lat.to_be_bytes());
        bytes[8..].copy_from_slice(&self.lng.to_be_bytes());
        bytes
    }

    /// Decodes the binary representation produced by Postgres. Returns
    /// `None` when the buffer is not exactly two float8 values.
    pub fn from_sql_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != 16 {
            return None;
        }
        let lat = f64::from_be_bytes(bytes[..8].try_into().ok()?);
        let lng = f64::from_be_bytes(bytes[8..].try_into().ok()?);
        Some(Self { lat, lng })
    }
}

impl diesel::query_builder::QueryId for GeoPoint {
    type QueryId = GeoPoint;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Point, Pg> for GeoPoint {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(&self.to_sql_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Point, Pg> for GeoPoint {
    fn from_sql(value: PgValue<'_>) -> deserialize::Result<Self> {
        GeoPoint::from_sql_bytes(value.as_bytes())
            .ok_or_else(|| "invalid binary representation for point".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_layout() {
        let point = GeoPoint::new(60.2, 24.9);
        let bytes = point.to_sql_bytes();

        assert_eq!(&bytes[..8], &60.2f64.to_be_bytes());
        assert_eq!(&bytes[8..], &24.9f64.to_be_bytes());
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        assert!(GeoPoint::from_sql_bytes(&[0u8; 8]).is_none());
        assert!(GeoPoint::from_sql_bytes(&[0u8; 17]).is_none());
        assert!(GeoPoint::from_sql_bytes(&[]).is_none());
    }

    #[test]
    fn test_round_trip_known_coordinates() {
        let point = GeoPoint::new(60.1699, 24.9384);
        let decoded = GeoPoint::from_sql_bytes(&point.to_sql_bytes()).unwrap();

        assert_eq!(decoded, point);
    }

    proptest! {
        #[test]
        fn round_trip_preserves_coordinates(
            lat in -90.0f64..90.0,
            lng in -180.0f64..180.0,
        ) {
            let point = GeoPoint::new(lat, lng);
            let decoded = GeoPoint::from_sql_bytes(&point.to_sql_bytes()).unwrap();

            prop_assert_eq!(decoded.lat.to_bits(), lat.to_bits());
            prop_assert_eq!(decoded.lng.to_bits(), lng.to_bits());
        }
    }
}
