//! Repository for the `newsletter_subscribers` table.

use sqlx::PgPool;

use crate::models::newsletter::{CreateSubscriber, NewsletterSubscriber};

const COLUMNS: &str = "id, email, source, created_at";

pub struct NewsletterRepo;

impl NewsletterRepo {
    /// Insert a subscriber.
    ///
    /// Returns `None` when the email is already subscribed; the existing row
    /// is left untouched.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSubscriber,
    ) -> Result<Option<NewsletterSubscriber>, sqlx::Error> {
        let query = format!(
            "INSERT INTO newsletter_subscribers (email, source)
             VALUES ($1, $2)
             ON CONFLICT (email) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NewsletterSubscriber>(&query)
            .bind(&input.email)
            .bind(&input.source)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<NewsletterSubscriber>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM newsletter_subscribers WHERE email = $1");
        sqlx::query_as::<_, NewsletterSubscriber>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List subscribers, newest first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<NewsletterSubscriber>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM newsletter_subscribers
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, NewsletterSubscriber>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM newsletter_subscribers")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
