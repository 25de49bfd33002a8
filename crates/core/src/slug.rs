//! URL slug generation and validation for posts and projects.

use crate::error::CoreError;

/// Maximum slug length accepted by the site.
pub const MAX_SLUG_LEN: usize = 120;

/// Generate a URL-safe slug from a title.
///
/// Lowercases, replaces anything that is not ASCII alphanumeric with a
/// hyphen, collapses runs of hyphens, and trims them from both ends.
pub fn generate_slug(title: &str) -> String {
    let mut result = String::with_capacity(title.len());
    let mut prev_hyphen = false;
    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            result.push('-');
            prev_hyphen = true;
        }
    }

    let trimmed = result.trim_matches('-');
    let mut slug: String = trimmed.chars().take(MAX_SLUG_LEN).collect();
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Whether `slug` contains only lowercase alphanumerics and inner hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= MAX_SLUG_LEN
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Validate a caller-supplied slug.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if is_valid_slug(slug) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Slug must contain only lowercase letters, digits, and inner hyphens".into(),
        ))
    }
}

/// Use the supplied slug when present and non-blank, otherwise derive one
/// from the title.
pub fn resolve_slug(supplied: Option<&str>, title: &str) -> String {
    match supplied.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => generate_slug(title),
    }
}
