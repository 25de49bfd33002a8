//! Portfolio project model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::deserialize_some;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub description: String,
    /// One of [`atelier_core::content::ProjectCategory`].
    pub category: String,
    pub technologies: Vec<String>,
    pub images: Vec<String>,
    pub client: Option<String>,
    pub results: Option<String>,
    pub featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a project. Fields are already validated.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub technologies: Vec<String>,
    pub images: Vec<String>,
    pub client: Option<String>,
    pub results: Option<String>,
    pub featured: bool,
}

/// DTO for updating a project. Only `Some` fields are applied.
///
/// `client` and `results` are tri-state: absent leaves them, `null` clears.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub client: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub results: Option<Option<String>>,
    pub featured: Option<bool>,
}
