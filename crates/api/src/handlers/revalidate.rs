//! Externally triggered cache revalidation.

use atelier_core::secret::secrets_match;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::state::AppState;

/// JSON body of `POST /api/revalidate`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RevalidateRequest {
    pub path: Option<String>,
    pub tag: Option<String>,
    pub secret: Option<String>,
}

/// `?secret=` may be given in the query string instead of the body.
#[derive(Debug, Default, Deserialize)]
pub struct SecretQuery {
    pub secret: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RevalidateResponse {
    pub revalidated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Unix time in milliseconds.
    pub now: i64,
}

enum Target {
    Path(String),
    Tag(String),
}

fn message(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// POST /api/revalidate
///
/// The secret is checked before anything else is looked at, so an
/// unauthenticated caller learns nothing about the body's validity.
pub async fn revalidate(
    State(state): State<AppState>,
    Query(query): Query<SecretQuery>,
    body: Bytes,
) -> Response {
    let request: RevalidateRequest = if body.is_empty() {
        RevalidateRequest::default()
    } else {
        serde_json::from_slice(&body).unwrap_or_default()
    };

    let supplied = request.secret.as_deref().or(query.secret.as_deref());
    if !secrets_match(supplied, state.config.site.revalidate_secret.as_deref()) {
        tracing::warn!("Revalidation rejected: invalid secret");
        return message(StatusCode::UNAUTHORIZED, "Invalid secret");
    }

    let target = match (non_blank(request.path), non_blank(request.tag)) {
        (Some(path), None) if path.starts_with('/') => Target::Path(path),
        (Some(_), None) => {
            return message(StatusCode::BAD_REQUEST, "Path must start with '/'");
        }
        (None, Some(tag)) => Target::Tag(tag),
        (Some(_), Some(_)) => {
            return message(StatusCode::BAD_REQUEST, "Provide either path or tag, not both");
        }
        (None, None) => return message(StatusCode::BAD_REQUEST, "Missing path or tag"),
    };

    let now = chrono::Utc::now().timestamp_millis();
    let response = match target {
        Target::Path(path) => {
            let removed = state.pages.revalidate_path(&path).await;
            tracing::info!(path = %path, removed, "Revalidated path on request");
            RevalidateResponse {
                revalidated: true,
                path: Some(path),
                tag: None,
                now,
            }
        }
        Target::Tag(tag) => {
            let removed = state.pages.revalidate_tag(&tag).await;
            tracing::info!(tag = %tag, removed, "Revalidated tag on request");
            RevalidateResponse {
                revalidated: true,
                path: None,
                tag: Some(tag),
                now,
            }
        }
    };
    Json(response).into_response()
}
