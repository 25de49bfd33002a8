//! Limit/offset defaults and clamping for list endpoints.

/// Default page size for list queries.
pub const DEFAULT_LIMIT: i64 = 20;

/// Upper bound for any caller-supplied limit.
pub const MAX_LIMIT: i64 = 100;

/// Clamp an optional limit into `1..=max`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, max)
}

/// Clamp an optional offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_bounds() {
        assert_eq!(clamp_limit(None, DEFAULT_LIMIT, MAX_LIMIT), 20);
        assert_eq!(clamp_limit(Some(0), DEFAULT_LIMIT, MAX_LIMIT), 1);
        assert_eq!(clamp_limit(Some(-3), DEFAULT_LIMIT, MAX_LIMIT), 1);
        assert_eq!(clamp_limit(Some(5), DEFAULT_LIMIT, MAX_LIMIT), 5);
        assert_eq!(clamp_limit(Some(10_000), DEFAULT_LIMIT, MAX_LIMIT), 100);
    }

    #[test]
    fn offset_is_never_negative() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-1)), 0);
        assert_eq!(clamp_offset(Some(40)), 40);
    }
}
