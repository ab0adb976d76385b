//! User repository for async database operations.
//!
//! Provides CRUD operations for the users table using diesel_async.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewUser, UpdateUser, User};

/// User repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap
/// (just reference count increment). No need for `Arc<UserRepository>`.
#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncDbPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Inserts a new user row. The password must already be hashed.
    ///
    /// # Returns
    /// The inserted row, or `None` when the insert affected no rows.
    pub async fn create(&self, new_user: NewUser) -> Result<Option<User>, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(users)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Finds a user by primary key.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .filter(user_id.eq(id))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Finds a user by email address.
    pub async fn find_by_email(&self, address: &str) -> Result<Option<User>, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .filter(email.eq(address))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Lists all users, oldest account first.
    pub async fn list_all(&self) -> Result<Vec<User>, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .order(user_id.asc())
            .select(User::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Applies a partial update to one user.
    ///
    /// # Returns
    /// The number of affected rows (0 or 1).
    pub async fn update(&self, id: i32, update_data: UpdateUser) -> Result<usize, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(users.filter(user_id.eq(id)))
            .set(&update_data)
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Deletes one user by primary key.
    ///
    /// # Returns
    /// The number of affected rows (0 or 1).
    pub async fn delete(&self, id: i32) -> Result<usize, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(users.filter(user_id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
