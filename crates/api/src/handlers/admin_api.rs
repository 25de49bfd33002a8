//! Admin mutation endpoints. Each requires an [`AdminSession`] and answers
//! with the action envelope.

use atelier_core::types::DbId;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use serde_json::Value;

use crate::actions::blog::{create_blog_post, delete_blog_post, update_blog_post};
use crate::actions::contact::update_contact_status;
use crate::actions::project::{create_project, delete_project, update_project};
use crate::actions::{parse_payload, ActionResult};
use crate::middleware::session::AdminSession;
use crate::state::AppState;

/// POST /api/admin/blog
pub async fn create_post(
    admin: AdminSession,
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    tracing::debug!(admin_id = admin.admin_id, "Creating blog post");
    let result = match parse_payload(payload) {
        Ok(input) => create_blog_post(&state, input).await,
        Err(e) => ActionResult::Failure(e),
    };
    result.into_response_with(StatusCode::CREATED)
}

/// PUT /api/admin/blog/{id}
pub async fn update_post(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    tracing::debug!(admin_id = admin.admin_id, post_id = id, "Updating blog post");
    let result = match parse_payload(payload) {
        Ok(patch) => update_blog_post(&state, id, patch).await,
        Err(e) => ActionResult::Failure(e),
    };
    result.into_response_with(StatusCode::OK)
}

/// DELETE /api/admin/blog/{id}
pub async fn delete_post(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> Response {
    tracing::debug!(admin_id = admin.admin_id, post_id = id, "Deleting blog post");
    delete_blog_post(&state, id)
        .await
        .into_response_with(StatusCode::OK)
}

/// POST /api/admin/projects
pub async fn create_portfolio_project(
    admin: AdminSession,
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    tracing::debug!(admin_id = admin.admin_id, "Creating project");
    let result = match parse_payload(payload) {
        Ok(input) => create_project(&state, input).await,
        Err(e) => ActionResult::Failure(e),
    };
    result.into_response_with(StatusCode::CREATED)
}

/// PUT /api/admin/projects/{id}
pub async fn update_portfolio_project(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    tracing::debug!(admin_id = admin.admin_id, project_id = id, "Updating project");
    let result = match parse_payload(payload) {
        Ok(patch) => update_project(&state, id, patch).await,
        Err(e) => ActionResult::Failure(e),
    };
    result.into_response_with(StatusCode::OK)
}

/// DELETE /api/admin/projects/{id}
pub async fn delete_portfolio_project(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> Response {
    tracing::debug!(admin_id = admin.admin_id, project_id = id, "Deleting project");
    delete_project(&state, id)
        .await
        .into_response_with(StatusCode::OK)
}

/// PUT /api/admin/contacts/{id}/status
pub async fn set_contact_status(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    tracing::debug!(admin_id = admin.admin_id, submission_id = id, "Updating contact status");
    let result = match parse_payload(payload) {
        Ok(input) => update_contact_status(&state, id, input).await,
        Err(e) => ActionResult::Failure(e),
    };
    result.into_response_with(StatusCode::OK)
}
