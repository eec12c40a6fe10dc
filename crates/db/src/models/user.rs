//! User entity model and DTOs.

use sqlx::FromRow;
use ya_core::identity::Identity;
use ya_core::types::{DbId, Timestamp};

/// Name of the unique constraint on `users.username`.
pub const USERNAME_CONSTRAINT: &str = "uq_users_username";

/// Full user row from the `users` table.
///
/// Contains the password hash and is never serialized; pages expose
/// [`Identity`] instead.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

impl User {
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
}
