//! Public page data, served through the render cache.
//!
//! Each handler builds its cache key from the path plus the query values it
//! understands, so unrecognised parameters do not create new entries.
//! Search results (`/blog?q=`) are rendered on every request. Pages that
//! list published posts expire at the next scheduled publish time, so a
//! scheduled post appears without any write or revalidation.

use std::future::Future;

use atelier_core::content::{BlogCategory, ProjectCategory};
use atelier_core::error::CoreError;
use atelier_core::pagination::MAX_LIMIT;
use atelier_db::models::blog_post::{BlogPost, BlogPostSummary};
use atelier_db::models::project::Project;
use atelier_db::repositories::{BlogPostRepo, ProjectRepo};
use axum::extract::{Path, Query, State};
use axum::http::HeaderName;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::{
    blog_post_tag, project_tag, CacheStatus, RenderCache, Rendered, TAG_BLOG_POSTS, TAG_PROJECTS,
};
use crate::error::{AppError, AppResult};
use crate::query::CategoryParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Featured projects shown on the home page.
const HOME_FEATURED_PROJECTS: i64 = 6;
/// Latest posts shown on the home page.
const HOME_LATEST_POSTS: i64 = 3;
/// Related posts shown under a post.
const RELATED_POSTS: i64 = 3;

const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub featured_projects: Vec<Project>,
    pub latest_posts: Vec<BlogPostSummary>,
}

#[derive(Debug, Serialize)]
pub struct BlogIndexPage {
    pub posts: Vec<BlogPostSummary>,
    pub category: Option<BlogCategory>,
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BlogPostPage {
    pub post: BlogPost,
    pub related: Vec<BlogPostSummary>,
}

#[derive(Debug, Serialize)]
pub struct PortfolioPage {
    pub projects: Vec<Project>,
    pub category: Option<ProjectCategory>,
}

#[derive(Debug, Serialize)]
pub struct ProjectPage {
    pub project: Project,
}

/// `?category=&q=` on the blog index.
#[derive(Debug, Default, Deserialize)]
pub struct BlogIndexParams {
    pub category: Option<String>,
    pub q: Option<String>,
}

fn to_json<T: Serialize>(page: &T) -> AppResult<Rendered> {
    serde_json::to_value(page)
        .map(Rendered::new)
        .map_err(|e| AppError::InternalError(e.to_string()))
}

fn page_response(body: Value, status: CacheStatus) -> Response {
    (
        [(X_CACHE, status.as_str())],
        Json(DataResponse { data: body }),
    )
        .into_response()
}

async fn serve_cached<F, Fut>(
    pages: &RenderCache,
    key: &str,
    tags: Vec<String>,
    render: F,
) -> AppResult<Response>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = AppResult<Rendered>>,
{
    let (body, status) = pages.get_or_render(key, tags, render).await?;
    Ok(page_response(body, status))
}

/// Parse an optional, non-blank category filter.
fn parse_category<T>(raw: Option<&str>) -> AppResult<Option<T>>
where
    T: std::str::FromStr<Err = atelier_core::content::UnknownVariant>,
{
    match raw.map(str::trim).filter(|c| !c.is_empty()) {
        Some(c) => c.parse().map(Some).map_err(|e: atelier_core::content::UnknownVariant| {
            AppError::BadRequest(e.to_string())
        }),
        None => Ok(None),
    }
}

/// GET /
pub async fn home(State(state): State<AppState>) -> AppResult<Response> {
    let pool = state.pool.clone();
    serve_cached(
        &state.pages,
        "/",
        vec![TAG_PROJECTS.to_string(), TAG_BLOG_POSTS.to_string()],
        || async move {
            let featured_projects =
                ProjectRepo::list(&pool, Some(true), HOME_FEATURED_PROJECTS).await?;
            let latest_posts = BlogPostRepo::list_published(&pool, HOME_LATEST_POSTS).await?;
            let next_publish = BlogPostRepo::next_scheduled_at(&pool).await?;
            Ok(to_json(&HomePage {
                featured_projects,
                latest_posts,
            })?
            .stale_at(next_publish))
        },
    )
    .await
}

/// GET /blog?category=&q=
pub async fn blog_index(
    State(state): State<AppState>,
    Query(params): Query<BlogIndexParams>,
) -> AppResult<Response> {
    let category: Option<BlogCategory> = parse_category(params.category.as_deref())?;
    let pool = state.pool.clone();

    let term = params.q.map(|q| q.trim().to_string()).filter(|q| !q.is_empty());
    if let Some(term) = term {
        let posts = BlogPostRepo::search_published(&pool, &term, MAX_LIMIT).await?;
        let page = to_json(&BlogIndexPage {
            posts,
            category: None,
            query: Some(term),
        })?;
        return Ok(page_response(page.body, CacheStatus::Miss));
    }

    let key = match category {
        Some(c) => format!("/blog?category={c}"),
        None => "/blog".to_string(),
    };
    serve_cached(&state.pages, &key, vec![TAG_BLOG_POSTS.to_string()], || async move {
        let posts = match category {
            Some(c) => {
                BlogPostRepo::list_published_by_category(&pool, c.as_str(), MAX_LIMIT).await?
            }
            None => BlogPostRepo::list_published(&pool, MAX_LIMIT).await?,
        };
        let next_publish = BlogPostRepo::next_scheduled_at(&pool).await?;
        Ok(to_json(&BlogIndexPage {
            posts,
            category,
            query: None,
        })?
        .stale_at(next_publish))
    })
    .await
}

/// GET /blog/{slug} -- 404 when missing, draft, or scheduled.
pub async fn blog_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    let pool = state.pool.clone();
    let key = format!("/blog/{slug}");
    let tags = vec![TAG_BLOG_POSTS.to_string(), blog_post_tag(&slug)];
    serve_cached(&state.pages, &key, tags, || async move {
        let post = BlogPostRepo::find_published_by_slug(&pool, &slug)
            .await?
            .ok_or_else(|| CoreError::SlugNotFound {
                entity: "Blog post",
                slug: slug.clone(),
            })?;
        let related =
            BlogPostRepo::list_related(&pool, &post.slug, &post.categories, RELATED_POSTS).await?;
        let next_publish = BlogPostRepo::next_scheduled_at(&pool).await?;
        Ok(to_json(&BlogPostPage { post, related })?.stale_at(next_publish))
    })
    .await
}

/// GET /portfolio?category=
pub async fn portfolio(
    State(state): State<AppState>,
    Query(params): Query<CategoryParams>,
) -> AppResult<Response> {
    let category: Option<ProjectCategory> = parse_category(params.category.as_deref())?;
    let pool = state.pool.clone();
    let key = match category {
        Some(c) => format!("/portfolio?category={c}"),
        None => "/portfolio".to_string(),
    };
    serve_cached(&state.pages, &key, vec![TAG_PROJECTS.to_string()], || async move {
        let projects = match category {
            Some(c) => ProjectRepo::list_by_category(&pool, c.as_str(), MAX_LIMIT).await?,
            None => ProjectRepo::list(&pool, None, MAX_LIMIT).await?,
        };
        to_json(&PortfolioPage { projects, category })
    })
    .await
}

/// GET /portfolio/{slug}
pub async fn project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    let pool = state.pool.clone();
    let key = format!("/portfolio/{slug}");
    let tags = vec![TAG_PROJECTS.to_string(), project_tag(&slug)];
    serve_cached(&state.pages, &key, tags, || async move {
        let project = ProjectRepo::find_by_slug(&pool, &slug)
            .await?
            .ok_or_else(|| CoreError::SlugNotFound {
                entity: "Project",
                slug: slug.clone(),
            })?;
        to_json(&ProjectPage { project })
    })
    .await
}
