//! Common type definitions.
//!
//! # ID Types
//!
//! - [`UserId`]: User identifier. Assigned by the store as a 64-bit integer and handed to callers in
//!   its decimal string form, so the public surface never depends on the column type.

/// User identifier as seen by callers ("1", "2", ...)
pub type UserId = String;

/// Parse a caller-supplied identifier into the store's key type.
///
/// Follows `i64`'s `FromStr`: an optional leading `+` and leading zeros are accepted, so `"+1"`
/// and `"01"` both address row 1. Returns `None` for anything else (empty, whitespace, fractions,
/// out of range); such an identifier can never match a store-assigned row.
pub fn parse_row_id(id: &str) -> Option<i64> {
    id.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::parse_row_id;

    #[test]
    fn test_parse_row_id() {
        assert_eq!(parse_row_id("1"), Some(1));
        assert_eq!(parse_row_id("999"), Some(999));
        assert_eq!(parse_row_id("+1"), Some(1));
        assert_eq!(parse_row_id("01"), Some(1));
        assert_eq!(parse_row_id(" 1"), None);
        assert_eq!(parse_row_id(""), None);
        assert_eq!(parse_row_id("abc"), None);
        assert_eq!(parse_row_id("1.5"), None);
        assert_eq!(parse_row_id("99999999999999999999"), None);
    }
}
