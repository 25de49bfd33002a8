//! Blog post model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::deserialize_some;

/// A row from the `blog_posts` table.
///
/// A post is published when `published_at` is set and not in the future.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlogPost {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    /// Members of [`atelier_core::content::BlogCategory`].
    pub categories: Vec<String>,
    pub published_at: Option<Timestamp>,
    pub featured_image: Option<String>,
    pub seo_meta: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Lightweight listing shape for index pages (no body).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlogPostSummary {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub categories: Vec<String>,
    pub published_at: Option<Timestamp>,
    pub featured_image: Option<String>,
}

/// DTO for inserting a blog post. Fields are already validated.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBlogPost {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub categories: Vec<String>,
    pub published_at: Option<Timestamp>,
    pub featured_image: Option<String>,
    pub seo_meta: serde_json::Value,
}

/// DTO for updating a blog post. Only present fields are applied.
///
/// `published_at` is tri-state: absent leaves it, `null` unpublishes, a
/// timestamp (re)schedules. `featured_image` is cleared by `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBlogPost {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub categories: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub published_at: Option<Option<Timestamp>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub featured_image: Option<Option<String>>,
    pub seo_meta: Option<serde_json::Value>,
}
