//! Integration tests for the public contact and newsletter endpoints.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use common::{body_json, post_json, FailingMailer, RecordingMailer};
use serde_json::{json, Value};
use sqlx::PgPool;

fn contact_body() -> Value {
    json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "company": "Analytical Engines",
        "projectType": "website",
        "budgetRange": "5k-10k",
        "message": "We need a new marketing site before launch."
    })
}

async fn submission_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM contact_submissions")
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn subscriber_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM newsletter_subscribers")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_contact_reports_field_errors_and_stores_nothing(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let mut body = contact_body();
    body["email"] = json!("not-an-email");
    body["message"] = json!("short");

    let response = post_json(app, "/api/contact", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["details"]["email"].is_array());
    assert!(json["details"]["message"].is_array());
    assert_eq!(submission_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_budget_range_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let mut body = contact_body();
    body["budgetRange"] = json!("a-lot");

    let json = body_json(post_json(app, "/api/contact", body).await).await;
    assert_eq!(json["success"], false);
    assert!(json["details"]["budget_range"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_body_is_a_validation_failure(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/contact", json!(["not", "an", "object"])).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["details"]["body"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn contact_succeeds_when_mail_delivery_fails(pool: PgPool) {
    let app = common::build_test_app_with_mailer(pool.clone(), Arc::new(FailingMailer));

    let response = post_json(app.router, "/api/contact", contact_body()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["project_type"], "website");
    assert_eq!(submission_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn contact_sends_confirmation_and_notification(pool: PgPool) {
    let mailer = Arc::new(RecordingMailer::default());
    let app = common::build_test_app_with_mailer(pool, mailer.clone());

    let response = post_json(app.router, "/api/contact", contact_body()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Mail goes out on a spawned task.
    for _ in 0..50 {
        if mailer.sent.lock().unwrap().len() >= 2 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    let sent = mailer.sent.lock().unwrap();
    let mut recipients: Vec<&str> = sent.iter().map(|m| m.to.as_str()).collect();
    recipients.sort_unstable();
    assert_eq!(recipients, vec!["ada@example.com", "studio@example.com"]);

    let notification = sent.iter().find(|m| m.to == "studio@example.com").unwrap();
    assert_eq!(notification.reply_to.as_deref(), Some("ada@example.com"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn subscribing_twice_is_a_conflict(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let first = post_json(
        app.clone(),
        "/api/newsletter",
        json!({"email": "reader@example.com", "source": "footer"}),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let json = body_json(first).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["email"], "reader@example.com");

    let second = post_json(
        app,
        "/api/newsletter",
        json!({"email": "  Reader@Example.COM "}),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "This email is already subscribed");

    assert_eq!(subscriber_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_newsletter_email_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_json(app, "/api/newsletter", json!({"email": "nope"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["details"]["email"].is_array());
    assert_eq!(subscriber_count(&pool).await, 0);
}
