#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use atelier_api::auth::cookie::SESSION_COOKIE;
use atelier_api::auth::jwt::{generate_session_token, JwtConfig};
use atelier_api::auth::password::hash_password;
use atelier_api::cache::RenderCache;
use atelier_api::config::{ServerConfig, SiteConfig};
use atelier_api::router::build_app_router;
use atelier_api::state::AppState;
use atelier_db::models::admin_user::{AdminUser, CreateAdminUser};
use atelier_db::repositories::AdminUserRepo;
use atelier_mail::{DisabledMailer, EmailError, Mailer, OutgoingEmail};

pub const REVALIDATE_SECRET: &str = "test-revalidate-secret";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_hours: 1,
        },
        site: SiteConfig {
            site_url: "http://localhost:3000".to_string(),
            revalidate_secret: Some(REVALIDATE_SECRET.to_string()),
            analytics_measurement_id: Some("G-TEST123".to_string()),
            admin_notify_email: Some("studio@example.com".to_string()),
            page_cache_ttl_secs: 3600,
        },
    }
}

/// Application state plus the router built from it, so tests can inspect
/// the render cache after requests.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub fn build_test_app_with_mailer(pool: PgPool, mailer: Arc<dyn Mailer>) -> TestApp {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        pages: Arc::new(RenderCache::new(Duration::from_secs(
            config.site.page_cache_ttl_secs,
        ))),
        mailer,
    };
    TestApp {
        router: build_app_router(state.clone(), &config),
        state,
    }
}

/// Build the full application router with email disabled.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_mailer(pool, Arc::new(DisabledMailer)).router
}

/// Mailer that always fails.
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _email: OutgoingEmail) -> Result<(), EmailError> {
        Err(EmailError::Build("relay unavailable".to_string()))
    }
}

/// Mailer that keeps every message it is given.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingEmail>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), EmailError> {
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

/// Insert an admin user with [`ADMIN_PASSWORD`].
pub async fn create_admin(pool: &PgPool, email: &str) -> AdminUser {
    AdminUserRepo::create(
        pool,
        &CreateAdminUser {
            email: email.to_string(),
            name: "Test Admin".to_string(),
            password_hash: hash_password(ADMIN_PASSWORD).expect("hashing should succeed"),
        },
    )
    .await
    .expect("admin insert should succeed")
    .expect("admin email should be free")
}

/// `Cookie` header value carrying a valid session for a fresh admin.
pub async fn admin_cookie(pool: &PgPool) -> String {
    let admin = create_admin(pool, "admin@example.com").await;
    let token = generate_session_token(admin.id, &admin.email, &test_config().jwt)
        .expect("token generation should succeed");
    format!("{SESSION_COOKIE}={token}")
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::POST, uri, body, None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
