//! Repository for the `projects` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::repositories::nullable_patch;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, slug, title, description, category, technologies, images, \
    client, results, featured, created_at, updated_at";

/// Provides CRUD and listing operations for portfolio projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// Returns `None` when a project with the same slug already exists.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (slug, title, description, category, technologies, images, client, results,
                 featured)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             ON CONFLICT (slug) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.technologies)
            .bind(&input.images)
            .bind(set_client)
            .bind(client)
            .bind(set_results)
            .bind(results)
            .bind(input.featured)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE slug = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List projects, featured first then newest, with an optional featured filter.
    pub async fn list(
        pool: &PgPool,
        featured: Option<bool>,
        limit: i64,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE ($1::BOOL IS NULL OR featured = $1)
             ORDER BY featured DESC, created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(featured)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// List projects in one category, featured first then newest.
    pub async fn list_by_category(
        pool: &PgPool,
        category: &str,
        limit: i64,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE category = $1
             ORDER BY featured DESC, created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(category)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only present fields in `input` are applied;
    /// `client` and `results` are cleared by an explicit `Some(None)`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                slug = COALESCE($2, slug),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                category = COALESCE($5, category),
                technologies = COALESCE($6, technologies),
                images = COALESCE($7, images),
                client = CASE WHEN $8 THEN $9 ELSE client END,
                results = CASE WHEN $10 THEN $11 ELSE results END,
                featured = COALESCE($12, featured)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let (set_client, client) = nullable_patch(&input.client);
        let (set_results, results) = nullable_patch(&input.results);
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.technologies)
            .bind(&input.images)
            .bind(&input.client)
            .bind(&input.results)
            .bind(input.featured)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project, returning the removed row so callers can revalidate
    /// its page.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("DELETE FROM projects WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
