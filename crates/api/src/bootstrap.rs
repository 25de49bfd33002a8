//! First-run admin account provisioning.

use atelier_db::models::admin_user::CreateAdminUser;
use atelier_db::repositories::AdminUserRepo;
use atelier_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};

/// Credentials for the initial admin, read from the environment.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl AdminSeed {
    /// `ADMIN_EMAIL` and `ADMIN_PASSWORD` (both required), plus optional
    /// `ADMIN_NAME` (default `Administrator`).
    pub fn from_env() -> Option<Self> {
        let email = std::env::var("ADMIN_EMAIL").ok()?.trim().to_lowercase();
        let password = std::env::var("ADMIN_PASSWORD").ok()?;
        if email.is_empty() || password.is_empty() {
            return None;
        }
        let name = std::env::var("ADMIN_NAME")
            .ok()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Administrator".to_string());
        Some(Self {
            email,
            name,
            password,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("ADMIN_PASSWORD rejected: {0}")]
    WeakPassword(String),

    #[error("Failed to hash admin password: {0}")]
    Hash(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Create the seed admin when no admin user exists yet.
///
/// Returns `true` when an account was created.
pub async fn ensure_admin(pool: &DbPool, seed: &AdminSeed) -> Result<bool, BootstrapError> {
    if AdminUserRepo::count(pool).await? > 0 {
        tracing::debug!("Admin user already present; skipping bootstrap");
        return Ok(false);
    }

    validate_password_strength(&seed.password, MIN_PASSWORD_LENGTH)
        .map_err(BootstrapError::WeakPassword)?;
    let password_hash =
        hash_password(&seed.password).map_err(|e| BootstrapError::Hash(e.to_string()))?;

    let created = AdminUserRepo::create(
        pool,
        &CreateAdminUser {
            email: seed.email.clone(),
            name: seed.name.clone(),
            password_hash,
        },
    )
    .await?;

    match created {
        Some(user) => {
            tracing::info!(admin_id = user.id, email = %user.email, "Bootstrapped admin user");
            Ok(true)
        }
        // Another instance won the race.
        None => Ok(false),
    }
}
