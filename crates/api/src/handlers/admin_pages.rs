//! Page data for the admin area. Every route here sits behind the admin gate.

use atelier_core::content::SubmissionStatus;
use atelier_core::error::CoreError;
use atelier_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use atelier_core::types::DbId;
use atelier_db::models::blog_post::{BlogPost, BlogPostSummary};
use atelier_db::models::contact_submission::{ContactSubmission, StatusCount};
use atelier_db::models::newsletter::NewsletterSubscriber;
use atelier_db::models::project::Project;
use atelier_db::repositories::{
    BlogPostRepo, ContactSubmissionRepo, NewsletterRepo, ProjectRepo,
};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub posts_total: i64,
    pub posts_published: i64,
    pub projects_total: i64,
    pub subscribers_total: i64,
    pub submissions_by_status: Vec<StatusCount>,
}

#[derive(Debug, Serialize)]
pub struct LoginPage {
    /// Endpoint the login form posts to.
    pub action: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SubscriberList {
    pub subscribers: Vec<NewsletterSubscriber>,
    pub total: i64,
}

/// `?status=&limit=&offset=` on the contacts list.
#[derive(Debug, Default, Deserialize)]
pub struct ContactListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /admin
pub async fn dashboard(State(state): State<AppState>) -> AppResult<Json<DataResponse<Dashboard>>> {
    let pool = &state.pool;
    let data = Dashboard {
        posts_total: BlogPostRepo::count(pool, false).await?,
        posts_published: BlogPostRepo::count(pool, true).await?,
        projects_total: ProjectRepo::count(pool).await?,
        subscribers_total: NewsletterRepo::count(pool).await?,
        submissions_by_status: ContactSubmissionRepo::count_by_status(pool).await?,
    };
    Ok(Json(DataResponse { data }))
}

/// GET /admin/login -- only reached without a valid session.
pub async fn login_page() -> Json<DataResponse<LoginPage>> {
    Json(DataResponse {
        data: LoginPage {
            action: "/api/auth/login",
        },
    })
}

/// GET /admin/blog -- all posts including drafts.
pub async fn blog_list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<BlogPostSummary>>>> {
    let posts = BlogPostRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// GET /admin/blog/{id}
pub async fn blog_edit(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BlogPost>>> {
    let post = BlogPostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Blog post",
            id,
        }))?;
    Ok(Json(DataResponse { data: post }))
}

/// GET /admin/projects
pub async fn project_list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let limit = clamp_limit(params.limit, MAX_LIMIT, MAX_LIMIT);
    let projects = ProjectRepo::list(&state.pool, None, limit).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /admin/projects/{id}
pub async fn project_edit(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(DataResponse { data: project }))
}

/// GET /admin/contacts?status=&limit=&offset=
pub async fn contact_list(
    State(state): State<AppState>,
    Query(params): Query<ContactListParams>,
) -> AppResult<Json<DataResponse<Vec<ContactSubmission>>>> {
    let status = match params.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => Some(
            s.parse::<SubmissionStatus>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?,
        ),
        None => None,
    };
    let submissions = ContactSubmissionRepo::list(
        &state.pool,
        status.map(SubmissionStatus::as_str),
        clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(DataResponse { data: submissions }))
}

/// GET /admin/newsletter?limit=&offset=
pub async fn newsletter_list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<SubscriberList>>> {
    let subscribers = NewsletterRepo::list(
        &state.pool,
        clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT),
        clamp_offset(params.offset),
    )
    .await?;
    let total = NewsletterRepo::count(&state.pool).await?;
    Ok(Json(DataResponse {
        data: SubscriberList { subscribers, total },
    }))
}

/// Any other `/admin/...` path. Reached only with a valid session.
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Page not found", "code": "NOT_FOUND" })),
    )
        .into_response()
}
