//! Email validation functions

use once_cell::sync::Lazy;
use regex::Regex;

// local@label(.label)+ with RFC 1035 style labels
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("Failed to compile email regex")
});

/// Validates basic email shape
///
/// Checks for:
/// - Exactly one '@' symbol
/// - A non-empty local part
/// - A domain with at least one '.' whose labels don't start or end with '-'
///
/// An empty value passes; pair with `is_present` to make the field mandatory.
pub fn is_valid_email(email: &str) -> bool {
    email.is_empty() || EMAIL_REGEX.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("test.user@example.co.uk"));
        assert!(is_valid_email("user+tag@example.com"));
        assert!(is_valid_email("user_name@example-domain.com"));
        assert!(is_valid_email("o'brien@example.ie"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("@"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user@example..com"));
        assert!(!is_valid_email("user@-example.com"));
        assert!(!is_valid_email("user name@example.com"));
    }

    #[test]
    fn test_empty_is_exempt() {
        assert!(is_valid_email(""));
    }
}
