//! Repository for the `admin_users` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::admin_user::{AdminUser, CreateAdminUser};

const COLUMNS: &str = "id, email, name, password_hash, last_login_at, created_at, updated_at";

pub struct AdminUserRepo;

impl AdminUserRepo {
    /// Insert an admin user. Returns `None` if the email is taken.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAdminUser,
    ) -> Result<Option<AdminUser>, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_users (email, name, password_hash)
             VALUES ($1, $2, $3)
             ON CONFLICT (email) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminUser>(&query)
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.password_hash)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AdminUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_users WHERE id = $1");
        sqlx::query_as::<_, AdminUser>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Case-insensitive lookup by email.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<AdminUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_users WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, AdminUser>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE admin_users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admin_users")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
