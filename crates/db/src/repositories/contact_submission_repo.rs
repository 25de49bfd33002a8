//! Repository for the `contact_submissions` table.
//!
//! Submissions are never deleted; review only moves their status.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::contact_submission::{
    ContactSubmission, CreateContactSubmission, StatusCount,
};

const COLUMNS: &str = "id, name, email, phone, company, project_type, budget_range, \
    message, status, created_at, updated_at";

pub struct ContactSubmissionRepo;

impl ContactSubmissionRepo {
    /// Insert a new submission with status `pending`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContactSubmission,
    ) -> Result<ContactSubmission, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_submissions
                (name, email, phone, company, project_type, budget_range, message)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactSubmission>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.company)
            .bind(&input.project_type)
            .bind(&input.budget_range)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ContactSubmission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contact_submissions WHERE id = $1");
        sqlx::query_as::<_, ContactSubmission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List submissions newest first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ContactSubmission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contact_submissions
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ContactSubmission>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Move a submission to `status` only if it is still in `expected`.
    ///
    /// Returns `None` when the row does not exist or its status changed
    /// concurrently.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        expected: &str,
        status: &str,
    ) -> Result<Option<ContactSubmission>, sqlx::Error> {
        let query = format!(
            "UPDATE contact_submissions SET status = $3
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactSubmission>(&query)
            .bind(id)
            .bind(expected)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM contact_submissions
             GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }
}
