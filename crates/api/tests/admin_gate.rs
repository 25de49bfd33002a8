//! Integration tests for session gating of admin pages and admin API routes.

mod common;

use axum::http::header::LOCATION;
use axum::http::{Method, StatusCode};
use common::{admin_cookie, body_json, get, get_with_cookie, json_request};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_pages_redirect_to_login_without_session(pool: PgPool) {
    let app = common::build_test_app(pool);

    for uri in ["/admin", "/admin/blog", "/admin/contacts", "/admin/anything/else"] {
        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(response.headers()[LOCATION], "/admin/login", "{uri}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_path_with_trailing_slash_redirects_to_login(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/admin/login/").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/admin/login");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_token_counts_as_no_session(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_with_cookie(app, "/admin/blog", "atelier_session=garbage").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/admin/login");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_page_is_public(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/admin/login").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["action"], "/api/auth/login");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_page_redirects_signed_in_admin_to_dashboard(pool: PgPool) {
    let cookie = admin_cookie(&pool).await;
    let app = common::build_test_app(pool);

    let response = get_with_cookie(app, "/admin/login", &cookie).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/admin");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_renders_with_session(pool: PgPool) {
    let cookie = admin_cookie(&pool).await;
    let app = common::build_test_app(pool);

    let response = get_with_cookie(app.clone(), "/admin", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["posts_total"], 0);
    assert_eq!(json["data"]["subscribers_total"], 0);

    let response = get_with_cookie(app, "/admin/not-a-page", &cookie).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_api_requires_session(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = json_request(
        app,
        Method::POST,
        "/api/admin/blog",
        json!({"title": "Sneaky"}),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "UNAUTHORIZED");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blog_posts")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}
