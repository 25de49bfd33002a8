use std::sync::Arc;

use atelier_mail::Mailer;

use crate::cache::RenderCache;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: atelier_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Cached public page renders, invalidated by revalidation.
    pub pages: Arc<RenderCache>,
    /// Outbound email. Best-effort only; never awaited on a request path.
    pub mailer: Arc<dyn Mailer>,
}
