//! Repository for the `blog_posts` table.
//!
//! "Published" is evaluated at query time (`published_at <= NOW()`), so a
//! scheduled post becomes visible as soon as its publish time passes.

use atelier_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use super::{escape_like, nullable_patch};
use crate::models::blog_post::{BlogPost, BlogPostSummary, CreateBlogPost, UpdateBlogPost};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, slug, title, excerpt, content, author, categories, \
    published_at, featured_image, seo_meta, created_at, updated_at";

/// Columns for [`BlogPostSummary`] listings.
const SUMMARY_COLUMNS: &str =
    "id, slug, title, excerpt, author, categories, published_at, featured_image";

/// Predicate selecting posts visible to the public right now.
const PUBLISHED: &str = "published_at IS NOT NULL AND published_at <= NOW()";

/// Provides CRUD, listing and search operations for blog posts.
pub struct BlogPostRepo;

impl BlogPostRepo {
    /// Insert a new post, returning the created row.
    ///
    /// Returns `None` when a post with the same slug already exists.
    pub async fn create(
        pool: &PgPool,
        input: &CreateBlogPost,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!(
            "INSERT INTO blog_posts
                (slug, title, excerpt, content, author, categories, published_at,
                 featured_image, seo_meta)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             ON CONFLICT (slug) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(&input.excerpt)
            .bind(&input.content)
            .bind(&input.author)
            .bind(&input.categories)
            .bind(input.published_at)
            .bind(set_image)
            .bind(featured_image)
            .bind(&input.seo_meta)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE id = $1");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a post by slug regardless of publish state (admin preview).
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE slug = $1");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Find a published post by slug. Drafts and scheduled posts are `None`.
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE slug = $1 AND {PUBLISHED}");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Published posts, newest first.
    pub async fn list_published(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<BlogPostSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM blog_posts
             WHERE {PUBLISHED}
             ORDER BY published_at DESC, id DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, BlogPostSummary>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Published posts carrying `category`, newest first.
    pub async fn list_published_by_category(
        pool: &PgPool,
        category: &str,
        limit: i64,
    ) -> Result<Vec<BlogPostSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM blog_posts
             WHERE {PUBLISHED} AND $1 = ANY(categories)
             ORDER BY published_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, BlogPostSummary>(&query)
            .bind(category)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search over title, excerpt and content of
    /// published posts, newest first.
    pub async fn search_published(
        pool: &PgPool,
        term: &str,
        limit: i64,
    ) -> Result<Vec<BlogPostSummary>, sqlx::Error> {
        let pattern = format!("%{}%", escape_like(term));
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM blog_posts
             WHERE {PUBLISHED}
               AND (title ILIKE $1 ESCAPE '\\'
                    OR excerpt ILIKE $1 ESCAPE '\\'
                    OR content ILIKE $1 ESCAPE '\\')
             ORDER BY published_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, BlogPostSummary>(&query)
            .bind(pattern)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Other published posts sharing at least one category with the given post.
    pub async fn list_related(
        pool: &PgPool,
        slug: &str,
        categories: &[String],
        limit: i64,
    ) -> Result<Vec<BlogPostSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM blog_posts
             WHERE {PUBLISHED} AND slug <> $1 AND categories && $2::TEXT[]
             ORDER BY published_at DESC, id DESC
             LIMIT $3"
        );
        sqlx::query_as::<_, BlogPostSummary>(&query)
            .bind(slug)
            .bind(categories)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Every post including drafts and scheduled ones, most recently edited first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<BlogPostSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM blog_posts ORDER BY updated_at DESC, id DESC"
        );
        sqlx::query_as::<_, BlogPostSummary>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a post. Only present fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBlogPost,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!(
            "UPDATE blog_posts SET
                slug = COALESCE($2, slug),
                title = COALESCE($3, title),
                excerpt = COALESCE($4, excerpt),
                content = COALESCE($5, content),
                author = COALESCE($6, author),
                categories = COALESCE($7, categories),
                published_at = CASE WHEN $8 THEN $9 ELSE published_at END,
                featured_image = CASE WHEN $10 THEN $11 ELSE featured_image END,
                seo_meta = COALESCE($12, seo_meta)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let (set_published, published_at) = nullable_patch(&input.published_at);
        let (set_image, featured_image) = nullable_patch(&input.featured_image);
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(&input.excerpt)
            .bind(&input.content)
            .bind(&input.author)
            .bind(&input.categories)
            .bind(set_published)
            .bind(published_at)
            .bind(&input.featured_image)
            .bind(&input.seo_meta)
            .fetch_optional(pool)
            .await
    }

    /// Delete a post, returning the removed row so callers can revalidate
    /// its page.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("DELETE FROM blog_posts WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Earliest publish time still in the future, if any post is scheduled.
    pub async fn next_scheduled_at(pool: &PgPool) -> Result<Option<Timestamp>, sqlx::Error> {
        sqlx::query_scalar("SELECT MIN(published_at) FROM blog_posts WHERE published_at > NOW()")
            .fetch_one(pool)
            .await
    }

    /// Count posts; with `published_only` only those visible right now.
    pub async fn count(pool: &PgPool, published_only: bool) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM blog_posts WHERE NOT $1 OR ({PUBLISHED})");
        let row: (i64,) = sqlx::query_as(&query)
            .bind(published_only)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
