//! Cat repository for async database operations.
//!
//! Every read joins `users` so the owner comes back embedded; the
//! ownership-scoped update variant carries the access decision in its
//! WHERE clause.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{Cat, NewCat, Owner, UpdateCat};
use crate::schema::{cats, users};

/// Cat repository holding an async connection pool. Cloning is cheap,
/// same as `UserRepository`.
#[derive(Clone)]
pub struct CatRepository {
    pool: AsyncDbPool,
}

impl CatRepository {
    /// Creates a new CatRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Lists all cats with their owner columns joined in.
    pub async fn list_with_owner(&self) -> Result<Vec<(Cat, Owner)>, AppError> {
        let mut conn = self.pool.get().await?;

        cats::table
            .inner_join(users::table)
            .order(cats::cat_id.asc())
            .select((Cat::as_select(), Owner::as_select()))
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Finds one cat by primary key with its owner joined in.
    pub async fn find_with_owner(&self, id: i32) -> Result<Option<(Cat, Owner)>, AppError> {
        let mut conn = self.pool.get().await?;

        cats::table
            .inner_join(users::table)
            .filter(cats::cat_id.eq(id))
            .select((Cat::as_select(), Owner::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Inserts a new cat row, point coordinates included.
    ///
    /// # Returns
    /// The inserted row, or `None` when the insert affected no rows.
    pub async fn create(&self, new_cat: NewCat) -> Result<Option<Cat>, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(cats::table)
            .values(&new_cat)
            .returning(Cat::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Applies a partial update matched on `cat_id` alone (admin path).
    ///
    /// # Returns
    /// The number of affected rows (0 or 1).
    pub async fn update(&self, id: i32, changes: UpdateCat) -> Result<usize, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::update(cats::table.filter(cats::cat_id.eq(id)))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Applies a partial update matched on `cat_id` AND `owner`. A caller
    /// updating a cat they do not own matches zero rows.
    ///
    /// # Returns
    /// The number of affected rows (0 or 1).
    pub async fn update_owned(
        &self,
        id: i32,
        owner_id: i32,
        changes: UpdateCat,
    ) -> Result<usize, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::update(
            cats::table
                .filter(cats::cat_id.eq(id))
                .filter(cats::owner.eq(owner_id)),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map_err(AppError::from)
    }

    /// Deletes one cat by primary key.
    ///
    /// # Returns
    /// The number of affected rows (0 or 1).
    pub async fn delete(&self, id: i32) -> Result<usize, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::delete(cats::table.filter(cats::cat_id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
