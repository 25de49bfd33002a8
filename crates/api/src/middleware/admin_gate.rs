//! Route gate for the admin pages.
//!
//! Evaluated per request from the session token alone:
//!
//! - no valid session, any path but the login page: redirect to login;
//! - valid session on the login page: redirect to the dashboard;
//! - otherwise the request passes through.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::auth::cookie::session_claims;
use crate::state::AppState;

pub const LOGIN_PATH: &str = "/admin/login";
pub const DASHBOARD_PATH: &str = "/admin";

pub async fn admin_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path();
    let on_login = path == LOGIN_PATH;
    let authenticated = session_claims(request.headers(), &state.config.jwt).is_some();

    match (authenticated, on_login) {
        (false, false) => {
            tracing::debug!(path, "Unauthenticated admin request; redirecting to login");
            Redirect::to(LOGIN_PATH).into_response()
        }
        (true, true) => Redirect::to(DASHBOARD_PATH).into_response(),
        _ => next.run(request).await,
    }
}
