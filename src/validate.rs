//! Field-level checks applied while collecting records.
//!
//! Every check here is pure: it either accepts the input and returns the
//! typed value, or returns `None` and leaves re-prompting to the caller.

use crate::model::AppointmentStatus;

/// Input that ends an open-ended entry loop.
pub const SENTINEL: &str = "q";

/// True when the input is the stop sentinel (`q`, any case, surrounding space ignored).
pub fn is_sentinel(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(SENTINEL)
}

/// Trimmed input, or `None` when nothing but whitespace was entered.
pub fn non_empty(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a record identifier. Only plain digits are accepted; signs,
/// spaces inside the number and values past `i64::MAX` are rejected.
pub fn parse_id(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    if !all_digits(trimmed) {
        return None;
    }
    trimmed.parse().ok()
}

/// Parse the optional years-of-experience field. Anything that is not a
/// plain non-negative number is treated as absent.
pub fn parse_experience(input: &str) -> Option<u32> {
    let trimmed = input.trim();
    if !all_digits(trimmed) {
        return None;
    }
    trimmed.parse().ok()
}

/// Parse the status field. Empty input means `Pending`; unknown words are rejected.
pub fn parse_status(input: &str) -> Option<AppointmentStatus> {
    if input.trim().is_empty() {
        return Some(AppointmentStatus::Pending);
    }
    input.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel() {
        assert!(is_sentinel("q"));
        assert!(is_sentinel(" Q "));
        assert!(!is_sentinel("quit"));
        assert!(!is_sentinel(""));
    }

    #[test]
    fn test_non_empty_rejects_whitespace() {
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty("   \t"), None);
        assert_eq!(non_empty("  Ada Lovelace "), Some("Ada Lovelace"));
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id(" 7 "), Some(7));
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("-1"), None);
        assert_eq!(parse_id("+1"), None);
        assert_eq!(parse_id("1 2"), None);
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("99999999999999999999"), None);
    }

    #[test]
    fn test_parse_experience() {
        assert_eq!(parse_experience("12"), Some(12));
        assert_eq!(parse_experience(""), None);
        assert_eq!(parse_experience("ten"), None);
        assert_eq!(parse_experience("3.5"), None);
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status(""), Some(AppointmentStatus::Pending));
        assert_eq!(parse_status("done"), Some(AppointmentStatus::Done));
        assert_eq!(parse_status("Pending"), Some(AppointmentStatus::Pending));
        assert_eq!(parse_status("maybe"), None);
    }
}
