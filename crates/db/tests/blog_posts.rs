//! Integration tests for blog post publishing, search, and slug uniqueness.

use atelier_db::models::blog_post::{CreateBlogPost, UpdateBlogPost};
use atelier_db::repositories::BlogPostRepo;
use chrono::{Duration, Utc};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_post(slug: &str, published_at: Option<chrono::DateTime<Utc>>) -> CreateBlogPost {
    CreateBlogPost {
        slug: slug.to_string(),
        title: format!("Title {slug}"),
        excerpt: format!("Excerpt for {slug}"),
        content: "Body text".to_string(),
        author: "Staff".to_string(),
        categories: vec!["design".to_string()],
        published_at,
        featured_image: None,
        seo_meta: serde_json::json!({}),
    }
}

async fn insert(pool: &PgPool, input: CreateBlogPost) {
    BlogPostRepo::create(pool, &input)
        .await
        .unwrap()
        .expect("slug should be unique");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn published_list_excludes_drafts_and_scheduled(pool: PgPool) {
    let now = Utc::now();
    insert(&pool, new_post("old", Some(now - Duration::days(10)))).await;
    insert(&pool, new_post("recent", Some(now - Duration::hours(1)))).await;
    insert(&pool, new_post("draft", None)).await;
    insert(&pool, new_post("scheduled", Some(now + Duration::days(3)))).await;

    let posts = BlogPostRepo::list_published(&pool, 50).await.unwrap();
    let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();

    assert_eq!(slugs, vec!["recent", "old"]);
    for post in &posts {
        let at = post.published_at.expect("published posts have a date");
        assert!(at <= Utc::now());
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn scheduled_post_becomes_visible_without_rewrite(pool: PgPool) {
    // Already-past timestamp written as if it had been scheduled earlier.
    insert(&pool, new_post("went-live", Some(Utc::now() - Duration::seconds(1)))).await;

    let found = BlogPostRepo::find_published_by_slug(&pool, "went-live")
        .await
        .unwrap();
    assert!(found.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_published_by_slug_hides_drafts(pool: PgPool) {
    insert(&pool, new_post("hidden", None)).await;

    assert!(BlogPostRepo::find_published_by_slug(&pool, "hidden")
        .await
        .unwrap()
        .is_none());
    assert!(BlogPostRepo::find_by_slug(&pool, "hidden")
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_slug_returns_none(pool: PgPool) {
    insert(&pool, new_post("same", None)).await;
    let second = BlogPostRepo::create(&pool, &new_post("same", None))
        .await
        .unwrap();
    assert!(second.is_none());
    assert_eq!(BlogPostRepo::count(&pool, false).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_is_case_insensitive_across_fields(pool: PgPool) {
    let now = Utc::now();
    let mut by_title = new_post("by-title", Some(now - Duration::days(3)));
    by_title.title = "Scaling RUST services".into();
    let mut by_excerpt = new_post("by-excerpt", Some(now - Duration::days(2)));
    by_excerpt.excerpt = "Why we chose Rust".into();
    let mut by_content = new_post("by-content", Some(now - Duration::days(1)));
    by_content.content = "... and then rust happened".into();
    let mut draft = new_post("draft-rust", None);
    draft.title = "Rust draft".into();
    let unrelated = new_post("unrelated", Some(now));

    for post in [by_title, by_excerpt, by_content, draft, unrelated] {
        insert(&pool, post).await;
    }

    let results = BlogPostRepo::search_published(&pool, "rUsT", 20).await.unwrap();
    let slugs: Vec<_> = results.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["by-content", "by-excerpt", "by-title"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_treats_wildcards_literally(pool: PgPool) {
    let mut post = new_post("percent", Some(Utc::now() - Duration::hours(1)));
    post.title = "Grow 100% faster".into();
    insert(&pool, post).await;
    insert(&pool, new_post("plain", Some(Utc::now() - Duration::hours(2)))).await;

    let results = BlogPostRepo::search_published(&pool, "%", 20).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].slug, "percent");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn category_filter_and_related(pool: PgPool) {
    let now = Utc::now();
    let mut seo = new_post("seo-basics", Some(now - Duration::days(2)));
    seo.categories = vec!["seo".into(), "marketing".into()];
    let mut seo_two = new_post("seo-advanced", Some(now - Duration::days(1)));
    seo_two.categories = vec!["seo".into()];
    insert(&pool, seo).await;
    insert(&pool, seo_two).await;
    insert(&pool, new_post("design-only", Some(now))).await;

    let seo_posts = BlogPostRepo::list_published_by_category(&pool, "seo", 10)
        .await
        .unwrap();
    assert_eq!(seo_posts.len(), 2);
    assert_eq!(seo_posts[0].slug, "seo-advanced");

    let related = BlogPostRepo::list_related(&pool, "seo-basics", &["seo".into()], 5)
        .await
        .unwrap();
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].slug, "seo-advanced");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_can_unpublish_and_keeps_absent_fields(pool: PgPool) {
    let post = BlogPostRepo::create(&pool, &new_post("toggle", Some(Utc::now())))
        .await
        .unwrap()
        .unwrap();

    let retitle = UpdateBlogPost {
        title: Some("New title".into()),
        ..Default::default()
    };
    let updated = BlogPostRepo::update(&pool, post.id, &retitle)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "New title");
    assert!(updated.published_at.is_some(), "absent published_at is untouched");

    let unpublish = UpdateBlogPost {
        published_at: Some(None),
        ..Default::default()
    };
    let updated = BlogPostRepo::update(&pool, post.id, &unpublish)
        .await
        .unwrap()
        .unwrap();
    assert!(updated.published_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_clears_featured_image_with_null(pool: PgPool) {
    let mut input = new_post("with-image", None);
    input.featured_image = Some("https://cdn.example.com/cover.png".into());
    let post = BlogPostRepo::create(&pool, &input).await.unwrap().unwrap();

    let clear = UpdateBlogPost {
        featured_image: Some(None),
        ..Default::default()
    };
    let updated = BlogPostRepo::update(&pool, post.id, &clear)
        .await
        .unwrap()
        .unwrap();
    assert!(updated.featured_image.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn next_scheduled_at_returns_earliest_future_publish(pool: PgPool) {
    assert!(BlogPostRepo::next_scheduled_at(&pool).await.unwrap().is_none());

    let soon = Utc::now() + Duration::hours(1);
    insert(&pool, new_post("live", Some(Utc::now() - Duration::days(1)))).await;
    insert(&pool, new_post("draft", None)).await;
    insert(&pool, new_post("later", Some(Utc::now() + Duration::days(2)))).await;
    insert(&pool, new_post("soon", Some(soon))).await;

    let next = BlogPostRepo::next_scheduled_at(&pool).await.unwrap().unwrap();
    assert!((next - soon).num_milliseconds().abs() < 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_returns_removed_row(pool: PgPool) {
    let post = BlogPostRepo::create(&pool, &new_post("gone", None))
        .await
        .unwrap()
        .unwrap();

    let removed = BlogPostRepo::delete(&pool, post.id).await.unwrap();
    assert_eq!(removed.map(|p| p.slug), Some("gone".to_string()));
    assert!(BlogPostRepo::delete(&pool, post.id).await.unwrap().is_none());
}
