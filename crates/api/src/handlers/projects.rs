//! Public JSON listing of portfolio projects.

use atelier_core::pagination::{clamp_limit, DEFAULT_LIMIT, MAX_LIMIT};
use atelier_db::models::project::Project;
use atelier_db::repositories::ProjectRepo;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::state::AppState;

/// Query string of `GET /api/projects`.
///
/// Both values are taken as raw strings: an unparseable `featured` means
/// "no filter" and an unparseable `limit` means the default.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectsQuery {
    pub featured: Option<String>,
    pub limit: Option<String>,
}

impl ProjectsQuery {
    fn featured(&self) -> Option<bool> {
        match self.featured.as_deref().map(str::trim) {
            Some("true") | Some("1") => Some(true),
            Some("false") | Some("0") => Some(false),
            _ => None,
        }
    }

    fn limit(&self) -> i64 {
        let requested = self.limit.as_deref().and_then(|l| l.trim().parse().ok());
        clamp_limit(requested, DEFAULT_LIMIT, MAX_LIMIT)
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
    pub count: usize,
}

/// GET /api/projects?featured=<bool>&limit=<int>
pub async fn list(State(state): State<AppState>, Query(query): Query<ProjectsQuery>) -> Response {
    match ProjectRepo::list(&state.pool, query.featured(), query.limit()).await {
        Ok(projects) => Json(ProjectsResponse {
            count: projects.len(),
            projects,
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch projects");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch projects" })),
            )
                .into_response()
        }
    }
}
