//! Domain service for the user directory.
//!
//! Handlers hand over already-validated input; this layer owns the
//! statement sequence of each operation and turns store outcomes into
//! [`UserError`].

use thiserror::Error;

use crate::api::types::{CreatedUserDto, DeletedUserDto, UpdatedUserDto};
use crate::db::StoreError;
use crate::models::{NewUser, User};

pub const LIST_FAILED: &str = "Failed to fetch users";
pub const GET_FAILED: &str = "Failed to fetch user";
pub const CREATE_FAILED: &str = "Failed to add user";
pub const CHECK_FAILED: &str = "Database error";
pub const UPDATE_FAILED: &str = "Failed to update user";
pub const DELETE_FAILED: &str = "Failed to delete user";
pub const PROVISION_FAILED: &str = "Failed to create users table";

/// Errors produced by user operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(i32),

    #[error("Email already exists: {0}")]
    Conflict(String),

    /// Any other database failure. `summary` names the step that failed.
    #[error("{summary}: {detail}")]
    Database {
        summary: &'static str,
        detail: String,
    },
}

impl UserError {
    /// Classifies a store failure, tagging unclassified ones with `summary`.
    #[must_use]
    pub fn from_store(err: StoreError, summary: &'static str) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            StoreError::Conflict(detail) => Self::Conflict(detail),
            StoreError::Database(err) => Self::Database {
                summary,
                detail: err.to_string(),
            },
        }
    }
}

/// Domain service trait for the user directory.
#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// All users, newest first.
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    async fn get_user(&self, id: i32) -> Result<User, UserError>;

    /// Inserts a user and echoes the submitted fields with the new id.
    async fn create_user(&self, user: NewUser) -> Result<CreatedUserDto, UserError>;

    /// Replaces every mutable field of an existing user.
    async fn update_user(&self, id: i32, user: NewUser) -> Result<UpdatedUserDto, UserError>;

    /// Removes a user, returning a snapshot taken before the delete.
    async fn delete_user(&self, id: i32) -> Result<DeletedUserDto, UserError>;

    /// Creates the `users` table if it does not exist yet.
    async fn provision_schema(&self) -> Result<(), UserError>;
}
