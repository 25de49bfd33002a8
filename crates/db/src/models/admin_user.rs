//! Admin user model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `admin_users` table.
///
/// Contains the password hash -- never serialize this directly.
/// Use [`AdminUserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct AdminUser {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe admin representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct AdminUserResponse {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub last_login_at: Option<Timestamp>,
}

impl From<AdminUser> for AdminUserResponse {
    fn from(user: AdminUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            last_login_at: user.last_login_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateAdminUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}
