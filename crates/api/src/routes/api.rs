//! Route definitions for `/api`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{admin_api, auth, funnel, health, projects, revalidate, site_config};
use crate::state::AppState;

/// Routes mounted at `/api`.
///
/// ```text
/// GET    /health                          -> health_check
/// GET    /projects                        -> list
/// POST   /revalidate                      -> revalidate
/// GET    /site-config                     -> site_config
/// POST   /contact                         -> contact
/// POST   /newsletter                      -> newsletter
/// POST   /auth/login                      -> login
/// POST   /auth/logout                     -> logout
///
/// POST   /admin/blog                      -> create_post          (session)
/// PUT    /admin/blog/{id}                 -> update_post          (session)
/// DELETE /admin/blog/{id}                 -> delete_post          (session)
/// POST   /admin/projects                  -> create_portfolio_project (session)
/// PUT    /admin/projects/{id}             -> update_portfolio_project (session)
/// DELETE /admin/projects/{id}             -> delete_portfolio_project (session)
/// PUT    /admin/contacts/{id}/status      -> set_contact_status   (session)
/// ```
pub fn router() -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/blog", post(admin_api::create_post))
        .route(
            "/blog/{id}",
            put(admin_api::update_post).delete(admin_api::delete_post),
        )
        .route("/projects", post(admin_api::create_portfolio_project))
        .route(
            "/projects/{id}",
            put(admin_api::update_portfolio_project).delete(admin_api::delete_portfolio_project),
        )
        .route("/contacts/{id}/status", put(admin_api::set_contact_status));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/projects", get(projects::list))
        .route("/revalidate", post(revalidate::revalidate))
        .route("/site-config", get(site_config::site_config))
        .route("/contact", post(funnel::contact))
        .route("/newsletter", post(funnel::newsletter))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .nest("/admin", admin_routes)
}
