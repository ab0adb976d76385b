//! User service for business logic operations.
//!
//! Owns the rules the repository must not know about: password hashing,
//! the empty-list policy, and the affected-rows contract.

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, UpdateUser, User};
use crate::repositories::UserRepository;
use crate::utils::{jwt, password};

/// User service for handling user-related business logic. Cloning is
/// cheap since the repository holds the pool by `Arc`.
#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    /// Creates a new UserService with the given repository.
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// Lists all users.
    ///
    /// An empty table is a `NotFound` failure, not an empty collection.
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        let users = self.repo.list_all().await?;
        if users.is_empty() {
            return Err(AppError::NotFound {
                entity: "users".to_string(),
                field: "count".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(users)
    }

    /// Gets a user by id, or `NotFound`.
    pub async fn get_user(&self, id: i32) -> AppResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "user".to_string(),
                field: "user_id".to_string(),
                value: id.to_string(),
            })
    }

    /// Creates a new user, hashing the plaintext password before the
    /// repository sees it.
    pub async fn create_user(&self, mut new_user: NewUser) -> AppResult<User> {
        new_user.password = password::hash_password(&new_user.password)?;

        self.repo
            .create(new_user)
            .await?
            .ok_or(AppError::InsertFailed { entity: "user" })
    }

    /// Applies a partial update; a supplied password is re-hashed so only
    /// the hash is ever persisted.
    pub async fn update_user(&self, id: i32, mut update: UpdateUser) -> AppResult<()> {
        if update.is_noop() {
            return Err(AppError::BadRequest {
                message: "No fields to update".to_string(),
            });
        }

        if let Some(plaintext) = update.password.take() {
            update.password = Some(password::hash_password(&plaintext)?);
        }

        let affected = self.repo.update(id, update).await?;
        if affected == 0 {
            return Err(AppError::UpdateFailed { entity: "user", id });
        }
        Ok(())
    }

    /// Deletes a user; zero affected rows is a terminal failure.
    pub async fn delete_user(&self, id: i32) -> AppResult<()> {
        let affected = self.repo.delete(id).await?;
        if affected == 0 {
            return Err(AppError::DeleteFailed { entity: "user", id });
        }
        Ok(())
    }

    /// Verifies credentials and issues an access/refresh token pair.
    ///
    /// The same `Unauthorized` comes back for an unknown email and a
    /// wrong password.
    pub async fn authenticate(
        &self,
        email: &str,
        plaintext: &str,
        jwt_config: &JwtConfig,
    ) -> AppResult<(User, String, String)> {
        let invalid = || AppError::Unauthorized {
            message: "Invalid email or password".to_string(),
        };

        let user = self.repo.find_by_email(email).await?.ok_or_else(invalid)?;

        if !password::verify_password(plaintext, &user.password)? {
            return Err(invalid());
        }

        let (access_token, refresh_token) = jwt::generate_token_pair(
            user.user_id,
            user.user_name.clone(),
            user.role,
            &jwt_config.secret,
            jwt_config.access_token_expiration,
            jwt_config.refresh_token_expiration,
        )?;

        Ok((user, access_token, refresh_token))
    }
}
