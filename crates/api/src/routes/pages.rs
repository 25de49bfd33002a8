//! Public page data routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// ```text
/// GET /                    -> home
/// GET /blog                -> blog_index     (?category=, ?q=)
/// GET /blog/{slug}         -> blog_post
/// GET /portfolio           -> portfolio      (?category=)
/// GET /portfolio/{slug}    -> project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/blog", get(pages::blog_index))
        .route("/blog/{slug}", get(pages::blog_post))
        .route("/portfolio", get(pages::portfolio))
        .route("/portfolio/{slug}", get(pages::project))
}
