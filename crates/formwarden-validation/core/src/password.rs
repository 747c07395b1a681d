//! Password validation functions

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum password length, counted in UTF-16 code units like a browser does
pub const PASSWORD_MIN_LEN: usize = 8;

/// Maximum password length, counted in UTF-16 code units
pub const PASSWORD_MAX_LEN: usize = 16;

// A non-dotall `.` never matches a line terminator
static LINE_TERMINATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\n\r\x{2028}\x{2029}]").expect("Failed to compile line terminator regex")
});

static ASCII_DIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]").expect("Failed to compile digit regex"));

// Both letter checks run case-insensitively, so each accepts a letter of either case.
static LOWERCASE_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i-u)[a-z]").expect("Failed to compile lowercase regex"));

static UPPERCASE_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i-u)[A-Z]").expect("Failed to compile uppercase regex"));

/// Validates password strength
///
/// Returns `true` when the value is empty (the field is optional until a
/// `required` rule says otherwise) or when it:
/// - is 8 to 16 characters long with no line breaks
/// - contains at least one ASCII digit
/// - contains at least one ASCII letter
///
/// The "uppercase" and "lowercase" requirements are both matched
/// case-insensitively, so mixed case is not enforced.
///
/// # Examples
/// ```
/// use formwarden_validation_core::is_valid_password;
/// assert!(is_valid_password(""));
/// assert!(is_valid_password("abc12345"));
/// assert!(!is_valid_password("abcdefgh"));
/// ```
pub fn is_valid_password(password: &str) -> bool {
    if password.is_empty() {
        return true;
    }

    if LINE_TERMINATOR.is_match(password) {
        return false;
    }

    let len = password.encode_utf16().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        return false;
    }

    ASCII_DIGIT.is_match(password)
        && LOWERCASE_LETTER.is_match(password)
        && UPPERCASE_LETTER.is_match(password)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_accepts_any_length_with_digit_and_letter(
            filler in "[a-zA-Z0-9 !#$%&*?@_-]{6,14}",
            digit in "[0-9]",
            letter in "[a-zA-Z]",
            digit_at in 0usize..16,
            letter_at in 0usize..16,
        ) {
            let mut password = filler;
            password.insert_str(digit_at % (password.len() + 1), &digit);
            password.insert_str(letter_at % (password.len() + 1), &letter);
            prop_assert!(is_valid_password(&password), "{:?} should pass", password);
        }

        #[test]
        fn prop_rejects_without_digit(password in "[a-zA-Z !#$%&*?@_-]{8,16}") {
            prop_assert!(!is_valid_password(&password));
        }

        #[test]
        fn prop_rejects_without_letter(password in "[0-9 !#$%&*?@_-]{8,16}") {
            prop_assert!(!is_valid_password(&password));
        }

        #[test]
        fn prop_rejects_over_sixteen(password in "[a-zA-Z0-9]{17,40}") {
            prop_assert!(!is_valid_password(&password));
        }
    }
}
