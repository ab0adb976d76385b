//! User-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{NewUser, UpdateUser, User, UserRole};

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for registering a new user.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(length(
        min = 3,
        max = 20,
        message = "Username must be between 3 and 20 characters"
    ))]
    #[schema(example = "musti_owner", min_length = 3, max_length = 20)]
    pub user_name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "musti@example.com", format = "email")]
    pub email: String,
    #[validate(length(
        min = 6,
        max = 30,
        message = "Password must be between 6 and 30 characters"
    ))]
    #[schema(format = "password", min_length = 6, max_length = 30)]
    pub password: String,
}

impl CreateUserRequest {
    /// Converts the request DTO into a NewUser model for insertion. The
    /// password is still plaintext here; the service hashes it.
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            user_name: self.user_name,
            email: self.email,
            password: self.password,
        }
    }
}

/// Request body for the admin update of any user. Only admins reach the
/// handler that accepts this, so it may change the role.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(
        min = 3,
        max = 20,
        message = "Username must be between 3 and 20 characters"
    ))]
    pub user_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    #[schema(format = "email")]
    pub email: Option<String>,
    pub role: Option<UserRole>,
    #[validate(length(
        min = 6,
        max = 30,
        message = "Password must be between 6 and 30 characters"
    ))]
    pub password: Option<String>,
}

impl UpdateUserRequest {
    /// Converts the request DTO into an UpdateUser changeset.
    pub fn into_update_user(self) -> UpdateUser {
        UpdateUser {
            user_name: self.user_name,
            email: self.email,
            role: self.role,
            password: self.password,
        }
    }
}

/// Request body for self-update. Has no role field: a caller cannot
/// change their own role.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateMeRequest {
    #[validate(length(
        min = 3,
        max = 20,
        message = "Username must be between 3 and 20 characters"
    ))]
    pub user_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    #[schema(format = "email")]
    pub email: Option<String>,
    #[validate(length(
        min = 6,
        max = 30,
        message = "Password must be between 6 and 30 characters"
    ))]
    pub password: Option<String>,
}

impl UpdateMeRequest {
    /// Converts the request DTO into an UpdateUser changeset with the
    /// role untouched.
    pub fn into_update_user(self) -> UpdateUser {
        UpdateUser {
            user_name: self.user_name,
            email: self.email,
            role: None,
            password: self.password,
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response body for user data. The password hash never leaves the
/// model layer.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 3)]
    pub user_id: i32,
    #[schema(example = "musti_owner")]
    pub user_name: String,
    #[schema(example = "musti@example.com")]
    pub email: String,
    pub role: UserRole,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            user_name: user.user_name,
            email: user.email,
            role: user.role,
        }
    }
}
