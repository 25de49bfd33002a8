//! Admin login.
//!
//! Logout has no server-side state to touch; the handler only clears the
//! session cookie.

use atelier_db::models::admin_user::AdminUserResponse;
use atelier_db::repositories::AdminUserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{validate_input, ActionError, ActionResult, StorageResultExt};
use crate::auth::jwt::generate_session_token;
use crate::auth::password::{verify_password, DUMMY_HASH};
use crate::state::AppState;

/// Message for any failed credential check.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Successful login: the session token and the admin it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    #[serde(skip)]
    pub token: String,
    /// Seconds until the session expires.
    pub expires_in: i64,
    pub user: AdminUserResponse,
}

/// Check credentials and issue a session token.
///
/// Unknown email and wrong password produce the same response.
pub async fn login(state: &AppState, input: LoginInput) -> ActionResult<LoginOutcome> {
    authenticate(state, input).await.into()
}

async fn authenticate(state: &AppState, input: LoginInput) -> Result<LoginOutcome, ActionError> {
    let input = LoginInput {
        email: input.email.trim().to_string(),
        password: input.password,
    };
    validate_input(&input)?;

    let user = AdminUserRepo::find_by_email(&state.pool, &input.email)
        .await
        .storage("login")?;
    let Some(user) = user else {
        tracing::info!("Login attempt for unknown admin email");
        let _ = verify_password(&input.password, DUMMY_HASH);
        return Err(ActionError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    let matches = verify_password(&input.password, &user.password_hash).map_err(|e| {
        tracing::error!(admin_id = user.id, error = %e, "Stored password hash is invalid");
        ActionError::internal()
    })?;
    if !matches {
        tracing::info!(admin_id = user.id, "Login attempt with wrong password");
        return Err(ActionError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let jwt = &state.config.jwt;
    let token = generate_session_token(user.id, &user.email, jwt).map_err(|e| {
        tracing::error!(admin_id = user.id, error = %e, "Failed to sign session token");
        ActionError::internal()
    })?;

    AdminUserRepo::record_login(&state.pool, user.id)
        .await
        .storage("login")?;

    tracing::info!(admin_id = user.id, "Admin logged in");
    Ok(LoginOutcome {
        token,
        expires_in: jwt.expiry_secs(),
        user: user.into(),
    })
}
