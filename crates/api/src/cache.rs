//! In-process cache of rendered public page data.
//!
//! Entries are keyed by request path (including the query string) and carry
//! a set of tags. Content mutations drop entries by path or by tag once their
//! storage write has succeeded; the next request re-renders from the
//! database. Entries older than the configured TTL are treated as misses,
//! as are entries whose render declared a wall-clock expiry that has passed
//! (a listing rendered before a scheduled post goes live).

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use atelier_core::types::Timestamp;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;

/// Tag carried by every blog listing page.
pub const TAG_BLOG_POSTS: &str = "blog-posts";
/// Tag carried by every portfolio listing page.
pub const TAG_PROJECTS: &str = "projects";

/// Tag for a single blog post page.
pub fn blog_post_tag(slug: &str) -> String {
    format!("blog-post:{slug}")
}

/// Tag for a single project page.
pub fn project_tag(slug: &str) -> String {
    format!("project:{slug}")
}

/// Whether a response was served from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    /// Value of the `x-cache` response header.
    pub fn as_str(self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

/// Output of a page render.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub body: Value,
    /// Wall-clock time after which the payload no longer reflects the
    /// database, independent of the TTL.
    pub stale_at: Option<Timestamp>,
}

impl Rendered {
    pub fn new(body: Value) -> Self {
        Self {
            body,
            stale_at: None,
        }
    }

    pub fn stale_at(mut self, at: Option<Timestamp>) -> Self {
        self.stale_at = at;
        self
    }
}

#[derive(Debug, Clone)]
struct CachedPage {
    body: Value,
    tags: Vec<String>,
    rendered_at: Instant,
    stale_at: Option<Timestamp>,
}

impl CachedPage {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.rendered_at.elapsed() < ttl && self.stale_at.is_none_or(|at| Utc::now() < at)
    }
}

/// Path- and tag-addressable cache of page payloads.
#[derive(Debug)]
pub struct RenderCache {
    entries: RwLock<HashMap<String, CachedPage>>,
    ttl: Duration,
    /// Bumped on every invalidation. A render that started before an
    /// invalidation is not stored.
    generation: AtomicU64,
}

impl RenderCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            generation: AtomicU64::new(0),
        }
    }

    /// Fresh cached payload for `key`, if any.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|page| page.is_fresh(self.ttl))
            .map(|page| page.body.clone())
    }

    /// Return the cached payload for `key`, or run `render` and store its
    /// output under `tags`.
    ///
    /// Render errors are returned as-is and nothing is cached, so a missing
    /// page is looked up again on the next request.
    pub async fn get_or_render<F, Fut, E>(
        &self,
        key: &str,
        tags: Vec<String>,
        render: F,
    ) -> Result<(Value, CacheStatus), E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Rendered, E>>,
    {
        if let Some(body) = self.get(key).await {
            return Ok((body, CacheStatus::Hit));
        }

        let started = self.generation.load(Ordering::Acquire);
        let Rendered { body, stale_at } = render().await?;

        let mut entries = self.entries.write().await;
        if self.generation.load(Ordering::Acquire) == started {
            entries.insert(
                key.to_string(),
                CachedPage {
                    body: body.clone(),
                    tags,
                    rendered_at: Instant::now(),
                    stale_at,
                },
            );
        } else {
            tracing::debug!(key, "Skipping cache store; invalidated during render");
        }
        Ok((body, CacheStatus::Miss))
    }

    /// Drop the entry for `path` and all of its query-string variants.
    ///
    /// Returns the number of entries removed.
    pub async fn revalidate_path(&self, path: &str) -> usize {
        let path = normalize_path(path);
        let with_query = format!("{path}?");

        let mut entries = self.entries.write().await;
        self.generation.fetch_add(1, Ordering::AcqRel);
        let before = entries.len();
        entries.retain(|key, _| key != path && !key.starts_with(&with_query));
        let removed = before - entries.len();
        tracing::debug!(path, removed, "Revalidated path");
        removed
    }

    /// Drop every entry carrying `tag`. Returns the number removed.
    pub async fn revalidate_tag(&self, tag: &str) -> usize {
        let mut entries = self.entries.write().await;
        self.generation.fetch_add(1, Ordering::AcqRel);
        let before = entries.len();
        entries.retain(|_, page| !page.tags.iter().any(|t| t == tag));
        let removed = before - entries.len();
        tracing::debug!(tag, removed, "Revalidated tag");
        removed
    }

    /// Number of stored entries, fresh or stale.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Strip a trailing slash from every path except the root.
fn normalize_path(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => path,
    }
}
