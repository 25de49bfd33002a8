//! Admin login and logout.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use crate::actions::auth::{login as login_action, LoginInput};
use crate::actions::{parse_payload, ActionError, ActionResult};
use crate::auth::cookie::{clear_session_cookie, session_cookie};
use crate::state::AppState;

/// POST /api/auth/login
///
/// On success the session token is set as an HttpOnly cookie; the body
/// carries the admin profile and the session lifetime.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let result = match parse_payload::<LoginInput>(payload) {
        Ok(input) => login_action(&state, input).await,
        Err(e) => ActionResult::Failure(e),
    };

    let cookie = match &result {
        ActionResult::Success(outcome) => Some(session_cookie(
            &outcome.token,
            outcome.expires_in,
            state.config.site.secure_cookies(),
        )),
        ActionResult::Failure(_) => None,
    };

    let Some(cookie) = cookie else {
        return result.into_response_with(StatusCode::OK);
    };
    match HeaderValue::from_str(&cookie) {
        Ok(value) => {
            let mut response = result.into_response_with(StatusCode::OK);
            response.headers_mut().insert(SET_COOKIE, value);
            response
        }
        Err(e) => {
            tracing::error!(error = %e, "Session cookie is not a valid header value");
            ActionError::internal().into_response()
        }
    }
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>) -> Response {
    let cookie = clear_session_cookie(state.config.site.secure_cookies());
    let mut response = ActionResult::Success(()).into_response_with(StatusCode::OK);
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().insert(SET_COOKIE, value);
    }
    response
}
