//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches

pub mod admin_user;
pub mod blog_post;
pub mod contact_submission;
pub mod newsletter;
pub mod project;

use serde::{Deserialize, Deserializer};

/// Deserialize a present field (including an explicit `null`) as `Some`.
///
/// Paired with `#[serde(default)]` on an `Option<Option<T>>` field this
/// distinguishes "absent" (`None`) from "set to null" (`Some(None)`).
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
