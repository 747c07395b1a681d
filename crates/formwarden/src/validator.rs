// File: src/validator.rs
// Purpose: Tagged field validators and the keys their messages are stored under

use std::fmt;

use formwarden_validation_core as checks;
use serde::{Deserialize, Serialize};

use crate::host::FieldLookup;

/// Message key of a validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ValidatorKind {
    #[serde(rename = "required")]
    Required,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "password")]
    Password,
    #[serde(rename = "equalTo")]
    EqualTo,
}

impl ValidatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidatorKind::Required => "required",
            ValidatorKind::Email => "email",
            ValidatorKind::Password => "password",
            ValidatorKind::EqualTo => "equalTo",
        }
    }
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pure predicate over a field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validator {
    /// Trimmed value must be non-empty
    Required,
    /// Email shape; empty passes
    Email,
    /// 8-16 characters with a digit and a letter; empty passes
    Password,
    /// Must equal the current value of the element with this id
    EqualTo(String),
}

impl Validator {
    /// Builds an `EqualTo` validator; accepts `"password_input"` or `"#password_input"`
    pub fn equal_to(target: impl Into<String>) -> Self {
        let target = target.into();
        match target.strip_prefix('#') {
            Some(id) => Validator::EqualTo(id.to_string()),
            None => Validator::EqualTo(target),
        }
    }

    pub fn kind(&self) -> ValidatorKind {
        match self {
            Validator::Required => ValidatorKind::Required,
            Validator::Email => ValidatorKind::Email,
            Validator::Password => ValidatorKind::Password,
            Validator::EqualTo(_) => ValidatorKind::EqualTo,
        }
    }

    /// Id of the element an `EqualTo` validator compares against
    pub fn target(&self) -> Option<&str> {
        match self {
            Validator::EqualTo(target) => Some(target),
            _ => None,
        }
    }

    /// Checks `value`; the `EqualTo` target is re-read from `lookup` on every call
    pub fn check<L: FieldLookup + ?Sized>(&self, value: &str, lookup: &L) -> bool {
        match self {
            Validator::Required => checks::is_present(value),
            Validator::Email => checks::is_valid_email(value),
            Validator::Password => checks::is_valid_password(value),
            Validator::EqualTo(target) => {
                checks::equals_target(value, lookup.value_by_id(target).as_deref())
            }
        }
    }
}
