//! Gated admin page routes.

use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;

use crate::handlers::admin_pages;
use crate::middleware::admin_gate::admin_gate;
use crate::state::AppState;

/// Admin page routes, all wrapped by [`admin_gate`].
///
/// ```text
/// GET /admin                   -> dashboard
/// GET /admin/login             -> login_page
/// GET /admin/blog              -> blog_list
/// GET /admin/blog/{id}         -> blog_edit
/// GET /admin/projects          -> project_list
/// GET /admin/projects/{id}     -> project_edit
/// GET /admin/contacts          -> contact_list
/// GET /admin/newsletter        -> newsletter_list
/// ANY /admin/{*rest}           -> not_found
/// ```
///
/// The catch-all keeps unknown admin paths behind the gate as well, since
/// route layers only run for matched routes.
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin_pages::dashboard))
        .route("/admin/login", get(admin_pages::login_page))
        .route("/admin/blog", get(admin_pages::blog_list))
        .route("/admin/blog/{id}", get(admin_pages::blog_edit))
        .route("/admin/projects", get(admin_pages::project_list))
        .route("/admin/projects/{id}", get(admin_pages::project_edit))
        .route("/admin/contacts", get(admin_pages::contact_list))
        .route("/admin/newsletter", get(admin_pages::newsletter_list))
        .route("/admin/{*rest}", axum::routing::any(admin_pages::not_found))
        .route_layer(from_fn_with_state(state, admin_gate))
}
