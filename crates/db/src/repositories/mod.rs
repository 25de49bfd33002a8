//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod admin_user_repo;
pub mod blog_post_repo;
pub mod contact_submission_repo;
pub mod newsletter_repo;
pub mod project_repo;

pub use admin_user_repo::AdminUserRepo;
pub use blog_post_repo::BlogPostRepo;
pub use contact_submission_repo::ContactSubmissionRepo;
pub use newsletter_repo::NewsletterRepo;
pub use project_repo::ProjectRepo;

/// Split a tri-state patch field into "apply it" and the value to write.
///
/// Pairs with `CASE WHEN $n THEN $m ELSE col END` so that an explicit
/// `null` clears the column and an absent field leaves it alone.
pub(crate) fn nullable_patch<T>(field: &Option<Option<T>>) -> (bool, Option<&T>) {
    match field {
        Some(value) => (true, value.as_ref()),
        None => (false, None),
    }
}

/// Escape `%`, `_` and `\` so user input matches literally inside `ILIKE`.
pub(crate) fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{escape_like, nullable_patch};

    #[test]
    fn escapes_like_metacharacters() {
        assert_eq!(escape_like("rust"), "rust");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }

    #[test]
    fn nullable_patch_distinguishes_absent_from_null() {
        assert_eq!(nullable_patch::<i32>(&None), (false, None));
        assert_eq!(nullable_patch::<i32>(&Some(None)), (true, None));
        assert_eq!(nullable_patch(&Some(Some(3))), (true, Some(&3)));
    }
}
