use chrono::NaiveDateTime;
use diesel::AsExpression;
use diesel::FromSqlRow;
use diesel::deserialize::{self, FromSql};
use diesel::pg::{Pg, PgValue};
use diesel::prelude::*;
use diesel::serialize::{self, IsNull, Output, ToSql};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::schema::sql_types::UserRole as UserRoleType;

/// Account role, backed by the Postgres `user_role` enum.
///
/// The enum is closed: authorization code matches on it exhaustively, so
/// there is no "unknown role" fallback path anywhere in the crate.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = UserRoleType)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl diesel::query_builder::QueryId for UserRole {
    type QueryId = UserRole;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<UserRoleType, Pg> for UserRole {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        let label = match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        };
        out.write_all(label.as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<UserRoleType, Pg> for UserRole {
    fn from_sql(value: PgValue<'_>) -> deserialize::Result<Self> {
        match value.as_bytes() {
            b"user" => Ok(UserRole::User),
            b"admin" => Ok(UserRole::Admin),
            other => Err(format!(
                "unrecognized user_role variant: {}",
                String::from_utf8_lossy(other)
            )
            .into()),
        }
    }
}

/// User model for reading from database.
/// Derives Queryable for SELECT operations and Selectable for type-safe column selection.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub user_id: i32,
    pub user_name: String,
    pub email: String,
    pub role: UserRole,
    /// Argon2 hash, never the submitted plaintext.
    pub password: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// The owner columns embedded into cat reads via the join with `users`.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Owner {
    pub user_id: i32,
    pub user_name: String,
}

/// NewUser model for inserting new records. `role` is absent on purpose:
/// registration always gets the database default of `user`.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub user_name: String,
    pub email: String,
    /// Must already be hashed by the service layer.
    pub password: String,
}

/// UpdateUser model for partial updates.
/// Derives AsChangeset for UPDATE operations with optional fields.
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateUser {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    /// Must already be hashed by the service layer when present.
    pub password: Option<String>,
}

impl UpdateUser {
    /// True when no field would be written; an empty changeset is a
    /// request error, not a query.
    pub fn is_noop(&self) -> bool {
        self.user_name.is_none()
            && self.email.is_none()
            && self.role.is_none()
            && self.password.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&UserRole::Admin).unwrap(),
            "\"admin\""
        );
    }

    #[test]
    fn test_role_deserializes_lowercase() {
        let role: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, UserRole::Admin);
    }

    #[test]
    fn test_update_user_noop_detection() {
        assert!(UpdateUser::default().is_noop());

        let update = UpdateUser {
            email: Some("cat@example.com".to_string()),
            ..Default::default()
        };
        assert!(!update.is_noop());
    }
}
