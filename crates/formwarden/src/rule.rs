// File: src/rule.rs
// Purpose: Per-field validator lists, their messages, and the result of checking them

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::SpecError;
use crate::host::FieldLookup;
use crate::validator::{Validator, ValidatorKind};

/// Ordered validators for one field plus the message shown for each kind
///
/// # Example
///
/// ```
/// use formwarden::FieldRule;
///
/// let rule = FieldRule::new("email")
///     .required("Email is a mandatory field.")
///     .email("Invalid email address.");
/// assert_eq!(rule.validators().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    name: String,
    validators: Vec<Validator>,
    messages: BTreeMap<ValidatorKind, String>,
}

impl FieldRule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            validators: Vec::new(),
            messages: BTreeMap::new(),
        }
    }

    /// Assembles a rule from separately declared validators and messages.
    /// `FormSpecBuilder::build` rejects it if a validator has no message
    /// or an `equalTo` has no target.
    pub fn with_parts(
        name: impl Into<String>,
        validators: Vec<Validator>,
        messages: BTreeMap<ValidatorKind, String>,
    ) -> Self {
        Self {
            name: name.into(),
            validators,
            messages,
        }
    }

    /// Appends a validator together with its message
    pub fn validator(mut self, validator: Validator, message: impl Into<String>) -> Self {
        self.messages.insert(validator.kind(), message.into());
        self.validators.push(validator);
        self
    }

    pub fn required(self, message: impl Into<String>) -> Self {
        self.validator(Validator::Required, message)
    }

    pub fn email(self, message: impl Into<String>) -> Self {
        self.validator(Validator::Email, message)
    }

    pub fn password(self, message: impl Into<String>) -> Self {
        self.validator(Validator::Password, message)
    }

    pub fn equal_to(self, target: impl Into<String>, message: impl Into<String>) -> Self {
        self.validator(Validator::equal_to(target), message)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    pub fn message(&self, kind: ValidatorKind) -> Option<&str> {
        self.messages.get(&kind).map(String::as_str)
    }

    /// True when an `equalTo` validator on this field reads the element `id`
    pub fn depends_on(&self, id: &str) -> bool {
        self.validators.iter().any(|v| v.target() == Some(id))
    }

    /// First validator kind that has no message, if any
    pub fn missing_message(&self) -> Option<ValidatorKind> {
        self.validators
            .iter()
            .map(Validator::kind)
            .find(|kind| !self.messages.contains_key(kind))
    }

    /// True when an `equalTo` validator has no element id to compare with
    pub fn missing_target(&self) -> bool {
        self.validators
            .iter()
            .any(|v| matches!(v, Validator::EqualTo(id) if id.is_empty()))
    }

    /// Rejects rules that could not render or evaluate properly on `form_id`
    pub fn ensure_complete(&self, form_id: &str) -> Result<(), SpecError> {
        if let Some(kind) = self.missing_message() {
            return Err(SpecError::MissingMessage {
                form: form_id.to_string(),
                field: self.name.clone(),
                kind,
            });
        }
        if self.missing_target() {
            return Err(SpecError::MissingTarget {
                form: form_id.to_string(),
                field: self.name.clone(),
            });
        }
        Ok(())
    }

    /// First validator, in declaration order, that rejects `value`
    pub fn first_failure<L: FieldLookup + ?Sized>(&self, value: &str, lookup: &L) -> Option<&Validator> {
        self.validators.iter().find(|v| !v.check(value, lookup))
    }

    pub fn evaluate<L: FieldLookup + ?Sized>(&self, value: &str, lookup: &L) -> ValidationResult {
        match self.first_failure(value, lookup) {
            // A missing message renders as empty text
            Some(failed) => ValidationResult::invalid(
                &self.name,
                self.message(failed.kind()).unwrap_or_default(),
            ),
            None => ValidationResult::valid(&self.name),
        }
    }
}

/// Outcome of checking one field during a validation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub field: String,
    pub failed: bool,
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn valid(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            failed: false,
            message: None,
        }
    }

    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            failed: true,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn password_rule() -> FieldRule {
        FieldRule::new("password")
            .required("Password is a mandatory field.")
            .password("Passwords are 8-16 characters.")
    }

    #[test]
    fn test_first_failing_validator_wins() {
        let page: HashMap<String, String> = HashMap::new();
        let rule = password_rule();

        assert_eq!(
            rule.evaluate("", &page),
            ValidationResult::invalid("password", "Password is a mandatory field.")
        );
        assert_eq!(
            rule.evaluate("short1", &page),
            ValidationResult::invalid("password", "Passwords are 8-16 characters.")
        );
        assert_eq!(rule.evaluate("longer123", &page), ValidationResult::valid("password"));
    }

    #[test]
    fn test_retype_mismatch_message() {
        let page: HashMap<String, String> =
            HashMap::from([("password_input".to_string(), "Abc12345".to_string())]);
        let rule = FieldRule::new("retype_password")
            .equal_to("#password_input", "Retype password does not match password.");

        assert!(!rule.evaluate("Abc12345", &page).failed);
        assert_eq!(
            rule.evaluate("Abc12346", &page).message.as_deref(),
            Some("Retype password does not match password.")
        );
        assert!(rule.depends_on("password_input"));
        assert!(!rule.depends_on("password"));
    }

    #[test]
    fn test_missing_message_renders_empty() {
        let rule = FieldRule::with_parts("name", vec![Validator::Required], BTreeMap::new());
        let page: HashMap<String, String> = HashMap::new();

        assert_eq!(rule.missing_message(), Some(ValidatorKind::Required));
        assert_eq!(rule.evaluate("", &page), ValidationResult::invalid("name", ""));
    }

    #[test]
    fn test_bare_hash_target_is_incomplete() {
        let rule = FieldRule::new("retype_password").equal_to("#", "No match.");

        assert_eq!(rule.validators(), &[Validator::EqualTo(String::new())]);
        assert!(rule.missing_target());
        assert_eq!(
            rule.ensure_complete("edit-password-form"),
            Err(SpecError::MissingTarget {
                form: "edit-password-form".to_string(),
                field: "retype_password".to_string(),
            })
        );
    }

    #[test]
    fn test_builder_keeps_messages_in_step() {
        let rule = password_rule();
        assert_eq!(rule.missing_message(), None);
        assert_eq!(
            rule.validators(),
            &[Validator::Required, Validator::Password]
        );
        assert_eq!(
            rule.message(ValidatorKind::Required),
            Some("Password is a mandatory field.")
        );
    }
}
