//! Session extractor for the admin JSON API.

use atelier_core::types::DbId;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::actions::ActionError;
use crate::auth::cookie::session_token;
use crate::auth::jwt::validate_token;
use crate::state::AppState;

/// Authenticated admin taken from the session cookie or a Bearer token.
///
/// Rejects with a 401 action envelope, so admin clients handle it the same
/// way as any other failed action.
///
/// ```ignore
/// async fn my_handler(admin: AdminSession) -> Response {
///     tracing::info!(admin_id = admin.admin_id, "handling request");
///     ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AdminSession {
    /// The admin's database id (from `claims.sub`).
    pub admin_id: DbId,
    pub email: String,
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ActionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers)
            .ok_or_else(|| ActionError::Unauthorized("Authentication required".into()))?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| ActionError::Unauthorized("Invalid or expired session".into()))?;

        Ok(AdminSession {
            admin_id: claims.sub,
            email: claims.email,
        })
    }
}
