//! Newsletter subscriber model and DTO.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `newsletter_subscribers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NewsletterSubscriber {
    pub id: DbId,
    pub email: String,
    pub source: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubscriber {
    /// Already normalised (trimmed, lower-cased).
    pub email: String,
    pub source: Option<String>,
}
