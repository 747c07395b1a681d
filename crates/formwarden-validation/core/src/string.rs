//! String presence and equality checks

/// A value is present when something other than whitespace was entered.
/// A byte order mark counts as whitespace, as it does for a browser's `trim`.
pub fn is_present(value: &str) -> bool {
    !value
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
        .is_empty()
}

/// Strict equality with the value of another field
///
/// A missing target never matches, not even an empty value.
pub fn equals_target(value: &str, target: Option<&str>) -> bool {
    target == Some(value)
}
