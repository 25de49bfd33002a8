//! Admin mutations of portfolio projects.

use atelier_core::types::DbId;
use atelier_core::validation::project_category;
use atelier_db::models::deserialize_some;
use atelier_db::models::project::{CreateProject, Project, UpdateProject};
use atelier_db::repositories::ProjectRepo;
use serde::Deserialize;
use validator::Validate;

use super::{
    checked_slug, trim, trim_list, trim_optional, validate_input, ActionError, ActionResult,
    StorageResultExt,
};
use crate::cache::{project_tag, RenderCache, TAG_PROJECTS};
use crate::state::AppState;

/// Body of `POST /api/admin/projects`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ProjectInput {
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 5000))]
    pub description: String,
    #[validate(custom(function = "project_category"))]
    pub category: String,
    pub technologies: Vec<String>,
    /// Image URLs, first one is the cover.
    pub images: Vec<String>,
    #[validate(length(max = 100))]
    pub client: Option<String>,
    #[validate(length(max = 2000))]
    pub results: Option<String>,
    pub featured: bool,
}

/// Body of `PUT /api/admin/projects/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ProjectPatch {
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub description: Option<String>,
    #[validate(custom(function = "project_category"))]
    pub category: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    /// Absent leaves the value, `null` or blank clears it.
    #[serde(deserialize_with = "deserialize_some")]
    #[validate(length(max = 100))]
    pub client: Option<Option<String>>,
    #[serde(deserialize_with = "deserialize_some")]
    #[validate(length(max = 2000))]
    pub results: Option<Option<String>>,
    pub featured: Option<bool>,
}

pub async fn create_project(state: &AppState, input: ProjectInput) -> ActionResult<Project> {
    create(state, input).await.into()
}

async fn create(state: &AppState, mut input: ProjectInput) -> Result<Project, ActionError> {
    trim(&mut input.title);
    trim(&mut input.description);
    trim(&mut input.category);
    input.technologies = trim_list(input.technologies);
    input.images = trim_list(input.images);
    input.client = trim_optional(input.client);
    input.results = trim_optional(input.results);
    validate_input(&input)?;

    let slug = checked_slug(atelier_core::slug::resolve_slug(
        input.slug.as_deref(),
        &input.title,
    ))?;

    let project = ProjectRepo::create(
        &state.pool,
        &CreateProject {
            slug,
            title: input.title,
            description: input.description,
            category: input.category,
            technologies: input.technologies,
            images: input.images,
            client: input.client,
            results: input.results,
            featured: input.featured,
        },
    )
    .await
    .storage("create_project")?
    .ok_or_else(|| {
        ActionError::Conflict("A project with this slug already exists".to_string())
    })?;

    tracing::info!(
        project_id = project.id,
        slug = %project.slug,
        featured = project.featured,
        "Project created",
    );
    revalidate_portfolio(&state.pages, &[project.slug.as_str()]).await;
    Ok(project)
}

pub async fn update_project(
    state: &AppState,
    id: DbId,
    patch: ProjectPatch,
) -> ActionResult<Project> {
    update(state, id, patch).await.into()
}

async fn update(state: &AppState, id: DbId, patch: ProjectPatch) -> Result<Project, ActionError> {
    let patch = ProjectPatch {
        slug: patch.slug.map(|s| s.trim().to_string()),
        title: patch.title.map(|s| s.trim().to_string()),
        description: patch.description.map(|s| s.trim().to_string()),
        category: patch.category.map(|s| s.trim().to_string()),
        technologies: patch.technologies.map(trim_list),
        images: patch.images.map(trim_list),
        client: patch.client.map(trim_optional),
        results: patch.results.map(trim_optional),
        ..patch
    };
    validate_input(&patch)?;
    let slug = patch.slug.map(checked_slug).transpose()?;

    let existing = ProjectRepo::find_by_id(&state.pool, id)
        .await
        .storage("update_project")?
        .ok_or_else(|| not_found(id))?;

    let project = ProjectRepo::update(
        &state.pool,
        id,
        &UpdateProject {
            slug,
            title: patch.title,
            description: patch.description,
            category: patch.category,
            technologies: patch.technologies,
            images: patch.images,
            client: patch.client,
            results: patch.results,
            featured: patch.featured,
        },
    )
    .await
    .storage("update_project")?
    .ok_or_else(|| not_found(id))?;

    tracing::info!(project_id = id, slug = %project.slug, "Project updated");
    revalidate_portfolio(&state.pages, &[existing.slug.as_str(), project.slug.as_str()]).await;
    Ok(project)
}

pub async fn delete_project(state: &AppState, id: DbId) -> ActionResult<Project> {
    delete(state, id).await.into()
}

async fn delete(state: &AppState, id: DbId) -> Result<Project, ActionError> {
    let project = ProjectRepo::delete(&state.pool, id)
        .await
        .storage("delete_project")?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(project_id = id, slug = %project.slug, "Project deleted");
    revalidate_portfolio(&state.pages, &[project.slug.as_str()]).await;
    Ok(project)
}

fn not_found(id: DbId) -> ActionError {
    ActionError::NotFound(format!("Project with id {id} not found"))
}

async fn revalidate_portfolio(pages: &RenderCache, slugs: &[&str]) {
    pages.revalidate_tag(TAG_PROJECTS).await;
    pages.revalidate_path("/").await;
    pages.revalidate_path("/portfolio").await;
    for slug in slugs {
        pages.revalidate_tag(&project_tag(slug)).await;
        pages.revalidate_path(&format!("/portfolio/{slug}")).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::validation::field_errors;

    #[test]
    fn unknown_category_is_a_field_error() {
        let input = ProjectInput {
            title: "Storefront".into(),
            description: "Headless shop".into(),
            category: "retail".into(),
            ..Default::default()
        };
        let fields = field_errors(&input.validate().unwrap_err());
        assert!(fields["category"][0].contains("Invalid project category 'retail'"));
    }

    #[test]
    fn patch_with_only_featured_is_valid() {
        let patch: ProjectPatch =
            serde_json::from_value(serde_json::json!({"featured": true})).unwrap();
        assert!(patch.validate().is_ok());
        assert_eq!(patch.featured, Some(true));
        assert!(patch.title.is_none());
        assert!(patch.client.is_none());
    }

    #[test]
    fn patch_client_null_means_clear() {
        let patch: ProjectPatch =
            serde_json::from_value(serde_json::json!({"client": null, "results": "Up 40%"}))
                .unwrap();
        assert_eq!(patch.client, Some(None));
        assert_eq!(patch.results, Some(Some("Up 40%".to_string())));
    }
}
