//! Cat service for business logic operations.
//!
//! Carries the caller identity and role as explicit parameters; the
//! role decides whether an update is matched on id alone or on
//! id + ownership.

use crate::error::{AppError, AppResult};
use crate::models::{Cat, NewCat, Owner, UpdateCat, UserRole};
use crate::repositories::CatRepository;

/// Cat service for handling cat-related business logic. Cloning is
/// cheap since the repository holds the pool by `Arc`.
#[derive(Clone)]
pub struct CatService {
    repo: CatRepository,
}

impl CatService {
    /// Creates a new CatService with the given repository.
    pub fn new(repo: CatRepository) -> Self {
        Self { repo }
    }

    /// Lists all cats with embedded owners.
    ///
    /// An empty table is a `NotFound` failure, not an empty collection.
    pub async fn list_cats(&self) -> AppResult<Vec<(Cat, Owner)>> {
        let cats = self.repo.list_with_owner().await?;
        if cats.is_empty() {
            return Err(AppError::NotFound {
                entity: "cats".to_string(),
                field: "count".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(cats)
    }

    /// Gets one cat with its embedded owner, or `NotFound`.
    pub async fn get_cat(&self, id: i32) -> AppResult<(Cat, Owner)> {
        self.repo
            .find_with_owner(id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "cat".to_string(),
                field: "cat_id".to_string(),
                value: id.to_string(),
            })
    }

    /// Inserts a new cat. The owner in `new_cat` is the authenticated
    /// caller's id; handlers never take it from the request body.
    pub async fn add_cat(&self, new_cat: NewCat) -> AppResult<Cat> {
        self.repo
            .create(new_cat)
            .await?
            .ok_or(AppError::InsertFailed { entity: "cat" })
    }

    /// Applies a partial update on behalf of the caller.
    ///
    /// Admins match on id alone; users additionally match on ownership,
    /// so updating someone else's cat affects zero rows and fails with
    /// `UpdateFailed`. The match is exhaustive: there is no third role.
    pub async fn update_cat(
        &self,
        id: i32,
        changes: UpdateCat,
        caller_id: i32,
        caller_role: UserRole,
    ) -> AppResult<()> {
        if changes.is_noop() {
            return Err(AppError::BadRequest {
                message: "No fields to update".to_string(),
            });
        }

        let affected = match caller_role {
            UserRole::Admin => self.repo.update(id, changes).await?,
            UserRole::User => self.repo.update_owned(id, caller_id, changes).await?,
        };

        if affected == 0 {
            return Err(AppError::UpdateFailed { entity: "cat", id });
        }
        Ok(())
    }

    /// Deletes a cat; zero affected rows is a terminal failure.
    pub async fn delete_cat(&self, id: i32) -> AppResult<()> {
        let affected = self.repo.delete(id).await?;
        if affected == 0 {
            return Err(AppError::DeleteFailed { entity: "cat", id });
        }
        Ok(())
    }
}
