//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `cat` - Cat-related request/response DTOs
//! - `user` - User-related request/response DTOs
//! - `auth` - Login/refresh/identity DTOs
//! - `error` - Common error response DTOs
//! - `message` - Mutation confirmation envelope

mod auth;
mod cat;
mod error;
mod message;
mod user;

pub use auth::{
    IdentityResponse, LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse,
};
pub use cat::{CatResponse, CreateCatRequest, OwnerResponse, UpdateCatRequest};
pub use error::ErrorResponse;
pub use message::MessageResponse;
pub use user::{
    CreateUserRequest, UpdateMeRequest, UpdateUserRequest, UserResponse,
};
