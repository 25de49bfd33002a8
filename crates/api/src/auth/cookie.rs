//! The admin session cookie.

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::HeaderMap;

use super::jwt::{validate_token, Claims, JwtConfig};

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE: &str = "atelier_session";

/// `Set-Cookie` value storing `token` for `max_age_secs`.
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

/// Find a cookie value by name across all `Cookie` headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// Extract the session token from the session cookie or, failing that, an
/// `Authorization: Bearer` header.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    read_cookie(headers, SESSION_COOKIE).or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
    })
}

/// Validated session claims for the request, if any.
pub fn session_claims(headers: &HeaderMap, config: &JwtConfig) -> Option<Claims> {
    let token = session_token(headers)?;
    validate_token(token, config).ok()
}
