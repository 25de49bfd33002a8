//! Admin mutations of blog posts.
//!
//! Each successful write revalidates the blog listing, the home page, and
//! the post's own page (both slugs when the slug changed). A failed write
//! leaves the render cache untouched.

use atelier_core::types::{DbId, Timestamp};
use atelier_core::validation::{blog_categories, json_object};
use atelier_db::models::blog_post::{BlogPost, CreateBlogPost, UpdateBlogPost};
use atelier_db::models::deserialize_some;
use atelier_db::repositories::BlogPostRepo;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use super::{
    checked_slug, trim, trim_list, trim_optional, validate_input, ActionError, ActionResult,
    StorageResultExt,
};
use crate::cache::{blog_post_tag, RenderCache, TAG_BLOG_POSTS};
use crate::state::AppState;

/// Body of `POST /api/admin/blog`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct BlogPostInput {
    /// Derived from the title when absent.
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 500))]
    pub excerpt: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(length(min = 1, max = 100))]
    pub author: String,
    #[validate(custom(function = "blog_categories"))]
    pub categories: Vec<String>,
    /// `None` keeps the post as a draft; a future time schedules it.
    #[serde(alias = "publishedAt")]
    pub published_at: Option<Timestamp>,
    #[serde(alias = "featuredImage")]
    #[validate(length(max = 500))]
    pub featured_image: Option<String>,
    #[serde(alias = "seoMeta")]
    #[validate(custom(function = "json_object"))]
    pub seo_meta: Option<Value>,
}

/// Body of `PUT /api/admin/blog/{id}`. Absent fields are left as they are.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct BlogPostPatch {
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 500))]
    pub excerpt: Option<String>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub author: Option<String>,
    #[validate(custom(function = "blog_categories"))]
    pub categories: Option<Vec<String>>,
    /// Absent leaves the schedule, `null` unpublishes.
    #[serde(alias = "publishedAt", deserialize_with = "deserialize_some")]
    pub published_at: Option<Option<Timestamp>>,
    /// Absent leaves the image, `null` or blank removes it.
    #[serde(alias = "featuredImage", deserialize_with = "deserialize_some")]
    #[validate(length(max = 500))]
    pub featured_image: Option<Option<String>>,
    #[serde(alias = "seoMeta")]
    #[validate(custom(function = "json_object"))]
    pub seo_meta: Option<Value>,
}

pub async fn create_blog_post(state: &AppState, input: BlogPostInput) -> ActionResult<BlogPost> {
    create(state, input).await.into()
}

async fn create(state: &AppState, mut input: BlogPostInput) -> Result<BlogPost, ActionError> {
    trim(&mut input.title);
    trim(&mut input.excerpt);
    trim(&mut input.author);
    input.categories = trim_list(input.categories);
    input.featured_image = trim_optional(input.featured_image);
    validate_input(&input)?;

    let slug = checked_slug(atelier_core::slug::resolve_slug(
        input.slug.as_deref(),
        &input.title,
    ))?;

    let post = BlogPostRepo::create(
        &state.pool,
        &CreateBlogPost {
            slug,
            title: input.title,
            excerpt: input.excerpt,
            content: input.content,
            author: input.author,
            categories: input.categories,
            published_at: input.published_at,
            featured_image: input.featured_image,
            seo_meta: input.seo_meta.unwrap_or_else(|| Value::Object(Default::default())),
        },
    )
    .await
    .storage("create_blog_post")?
    .ok_or_else(|| {
        ActionError::Conflict("A blog post with this slug already exists".to_string())
    })?;

    tracing::info!(post_id = post.id, slug = %post.slug, "Blog post created");
    revalidate_blog(&state.pages, &[post.slug.as_str()]).await;
    Ok(post)
}

pub async fn update_blog_post(
    state: &AppState,
    id: DbId,
    patch: BlogPostPatch,
) -> ActionResult<BlogPost> {
    update(state, id, patch).await.into()
}

async fn update(state: &AppState, id: DbId, patch: BlogPostPatch) -> Result<BlogPost, ActionError> {
    let patch = BlogPostPatch {
        slug: patch.slug.map(|s| s.trim().to_string()),
        title: patch.title.map(|s| s.trim().to_string()),
        excerpt: patch.excerpt.map(|s| s.trim().to_string()),
        author: patch.author.map(|s| s.trim().to_string()),
        categories: patch.categories.map(trim_list),
        featured_image: patch.featured_image.map(trim_optional),
        ..patch
    };
    validate_input(&patch)?;
    let slug = patch.slug.map(checked_slug).transpose()?;

    let existing = BlogPostRepo::find_by_id(&state.pool, id)
        .await
        .storage("update_blog_post")?
        .ok_or_else(|| not_found(id))?;

    let post = BlogPostRepo::update(
        &state.pool,
        id,
        &UpdateBlogPost {
            slug,
            title: patch.title,
            excerpt: patch.excerpt,
            content: patch.content,
            author: patch.author,
            categories: patch.categories,
            published_at: patch.published_at,
            featured_image: patch.featured_image,
            seo_meta: patch.seo_meta,
        },
    )
    .await
    .storage("update_blog_post")?
    .ok_or_else(|| not_found(id))?;

    tracing::info!(post_id = id, slug = %post.slug, "Blog post updated");
    revalidate_blog(&state.pages, &[existing.slug.as_str(), post.slug.as_str()]).await;
    Ok(post)
}

pub async fn delete_blog_post(state: &AppState, id: DbId) -> ActionResult<BlogPost> {
    delete(state, id).await.into()
}

async fn delete(state: &AppState, id: DbId) -> Result<BlogPost, ActionError> {
    let post = BlogPostRepo::delete(&state.pool, id)
        .await
        .storage("delete_blog_post")?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(post_id = id, slug = %post.slug, "Blog post deleted");
    revalidate_blog(&state.pages, &[post.slug.as_str()]).await;
    Ok(post)
}

fn not_found(id: DbId) -> ActionError {
    ActionError::NotFound(format!("Blog post with id {id} not found"))
}

/// Drop every cached page that can show the given posts.
async fn revalidate_blog(pages: &RenderCache, slugs: &[&str]) {
    pages.revalidate_tag(TAG_BLOG_POSTS).await;
    pages.revalidate_path("/").await;
    pages.revalidate_path("/blog").await;
    for slug in slugs {
        pages.revalidate_tag(&blog_post_tag(slug)).await;
        pages.revalidate_path(&format!("/blog/{slug}")).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::validation::field_errors;
    use serde_json::json;

    #[test]
    fn create_requires_known_categories() {
        let input: BlogPostInput = serde_json::from_value(json!({
            "title": "Hello",
            "excerpt": "Short",
            "content": "Body",
            "author": "Ada",
            "categories": ["design", "gossip"],
        }))
        .unwrap();
        let fields = field_errors(&input.validate().unwrap_err());
        assert!(fields["categories"][0].contains("gossip"));
    }

    #[test]
    fn seo_meta_must_be_an_object() {
        let input = BlogPostInput {
            title: "Hello".into(),
            excerpt: "Short".into(),
            content: "Body".into(),
            author: "Ada".into(),
            categories: vec!["seo".into()],
            seo_meta: Some(json!(["not", "an", "object"])),
            ..Default::default()
        };
        let fields = field_errors(&input.validate().unwrap_err());
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["seo_meta"]);
    }

    #[test]
    fn patch_distinguishes_absent_and_null_publish_date() {
        let absent: BlogPostPatch = serde_json::from_value(json!({"title": "New"})).unwrap();
        assert_eq!(absent.published_at, None);

        let cleared: BlogPostPatch =
            serde_json::from_value(json!({"published_at": null})).unwrap();
        assert_eq!(cleared.published_at, Some(None));

        let scheduled: BlogPostPatch =
            serde_json::from_value(json!({"publishedAt": "2030-01-01T00:00:00Z"})).unwrap();
        assert!(matches!(scheduled.published_at, Some(Some(_))));
    }

    #[test]
    fn patch_featured_image_is_tri_state() {
        let absent: BlogPostPatch = serde_json::from_value(json!({"title": "New"})).unwrap();
        assert_eq!(absent.featured_image, None);

        let cleared: BlogPostPatch =
            serde_json::from_value(json!({"featuredImage": null})).unwrap();
        assert_eq!(cleared.featured_image, Some(None));
    }

    #[test]
    fn patch_rejects_empty_title() {
        let patch = BlogPostPatch {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }
}
