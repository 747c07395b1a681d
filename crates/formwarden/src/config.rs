// File: src/config.rs
// Purpose: Configuration parsing from formwarden.toml

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::binder::ValidationTriggers;
use crate::catalog;
use crate::error::SpecError;
use crate::rule::FieldRule;
use crate::spec::{FormSpec, FormSpecBuilder};
use crate::validator::{Validator, ValidatorKind};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub page: PageConfig,

    #[serde(default)]
    pub validation: ValidationTriggers,

    /// Forms to bind; the built-in catalog is used when empty
    #[serde(default, rename = "form")]
    pub forms: Vec<FormConfig>,
}

/// Selectors and class names of the page collaborators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default = "default_overlay_selector")]
    pub overlay_selector: String,

    #[serde(default = "default_flash_selector")]
    pub flash_selector: String,

    /// Class that hides the overlay
    #[serde(default = "default_hidden_class")]
    pub hidden_class: String,

    /// Class set on invalid controls and their message labels
    #[serde(default = "default_error_class")]
    pub error_class: String,
}

/// One `[[form]]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    pub id: String,

    #[serde(default, rename = "field")]
    pub fields: Vec<FieldConfig>,
}

/// One `[[form.field]]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,

    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// `{ kind = "equalTo", target = "#password_input", message = "..." }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    pub kind: ValidatorKind,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub target: Option<String>,
}

// Default values
fn default_overlay_selector() -> String {
    ".loading".to_string()
}

fn default_flash_selector() -> String {
    ".flash-message".to_string()
}

fn default_hidden_class() -> String {
    crate::overlay::HIDDEN_CLASS.to_string()
}

fn default_error_class() -> String {
    "error".to_string()
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            overlay_selector: default_overlay_selector(),
            flash_selector: default_flash_selector(),
            hidden_class: default_hidden_class(),
            error_class: default_error_class(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./formwarden.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("formwarden.toml")
    }

    /// Parse configuration from TOML text; blank text yields the defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = toml::from_str(content).context("Invalid formwarden TOML")?;
        Ok(config)
    }

    /// Builders for the configured forms, or the catalog when none are configured
    pub fn form_builders(&self) -> Result<Vec<FormSpecBuilder>, SpecError> {
        if self.forms.is_empty() {
            return Ok(catalog::builders());
        }
        self.forms.iter().map(FormConfig::to_builder).collect()
    }

    pub fn form_specs(&self) -> Result<Vec<FormSpec>, SpecError> {
        self.form_builders()?
            .into_iter()
            .map(FormSpecBuilder::build)
            .collect()
    }
}

impl FormConfig {
    pub fn to_builder(&self) -> Result<FormSpecBuilder, SpecError> {
        let rules = self
            .fields
            .iter()
            .map(|field| field.to_rule(&self.id))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FormSpec::builder(self.id.clone()).fields(rules))
    }
}

impl FieldConfig {
    /// Converts one `[[form.field]]` table, rejecting it the same way
    /// `FormSpecBuilder::build` would
    pub fn to_rule(&self, form_id: &str) -> Result<FieldRule, SpecError> {
        let mut validators = Vec::with_capacity(self.rules.len());
        let mut messages = BTreeMap::new();

        for rule in &self.rules {
            let validator = match rule.kind {
                ValidatorKind::Required => Validator::Required,
                ValidatorKind::Email => Validator::Email,
                ValidatorKind::Password => Validator::Password,
                ValidatorKind::EqualTo => {
                    Validator::equal_to(rule.target.clone().unwrap_or_default())
                }
            };
            if let Some(message) = &rule.message {
                messages.insert(rule.kind, message.clone());
            }
            validators.push(validator);
        }

        let field = FieldRule::with_parts(self.name.clone(), validators, messages);
        field.ensure_complete(form_id)?;
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const LOGIN_TOML: &str = r##"
        [page]
        overlay_selector = "#spinner"

        [validation]
        on_keyup = false

        [[form]]
        id = "login-form"

        [[form.field]]
        name = "email"
        rules = [
            { kind = "required", message = "Email is a mandatory field." },
            { kind = "email", message = "Invalid email address." },
        ]

        [[form.field]]
        name = "retype"
        rules = [{ kind = "equalTo", target = "#password_input", message = "No match." }]
    "##;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.page.overlay_selector, ".loading");
        assert_eq!(config.page.flash_selector, ".flash-message");
        assert_eq!(config.page.hidden_class, "hidden");
        assert_eq!(config.page.error_class, "error");
        assert_eq!(config.validation, ValidationTriggers::default());
        assert!(config.forms.is_empty());
    }

    #[test]
    fn test_empty_config_uses_catalog() {
        let config = Config::from_toml_str("  \n").unwrap();
        let specs = config.form_specs().unwrap();
        assert_eq!(specs.len(), 6);
        assert_eq!(specs[1].form_id(), "login-form");
    }

    #[test]
    fn test_custom_forms() {
        let config = Config::from_toml_str(LOGIN_TOML).unwrap();
        assert_eq!(config.page.overlay_selector, "#spinner");
        assert_eq!(config.page.flash_selector, ".flash-message");
        assert!(config.validation.on_blur);
        assert!(!config.validation.on_keyup);

        let specs = config.form_specs().unwrap();
        assert_eq!(specs.len(), 1);

        let email = specs[0].field("email").unwrap();
        assert_eq!(email.validators(), &[Validator::Required, Validator::Email]);
        assert_eq!(email.message(ValidatorKind::Email), Some("Invalid email address."));

        let retype = specs[0].field("retype").unwrap();
        assert_eq!(retype.validators(), &[Validator::EqualTo("password_input".to_string())]);
    }

    #[test]
    fn test_rule_without_message_is_rejected() {
        let toml = r#"
            [[form]]
            id = "edit-profile-form"

            [[form.field]]
            name = "name"
            rules = [{ kind = "required" }]
        "#;
        let config = Config::from_toml_str(toml).unwrap();
        let err = config.form_specs().unwrap_err();
        assert_eq!(
            err,
            SpecError::MissingMessage {
                form: "edit-profile-form".to_string(),
                field: "name".to_string(),
                kind: ValidatorKind::Required,
            }
        );
    }

    #[test]
    fn test_equal_to_without_target_is_rejected() {
        let toml = r##"
            [[form]]
            id = "edit-password-form"

            [[form.field]]
            name = "retype_password"
            rules = [{ kind = "equalTo", target = "#", message = "No match." }]
        "##;
        let config = Config::from_toml_str(toml).unwrap();
        assert!(matches!(
            config.form_specs(),
            Err(SpecError::MissingTarget { .. })
        ));
    }

    #[test]
    fn test_equal_to_with_omitted_target_is_rejected() {
        let field = FieldConfig {
            name: "retype_password".to_string(),
            rules: vec![RuleConfig {
                kind: ValidatorKind::EqualTo,
                message: Some("No match.".to_string()),
                target: None,
            }],
        };
        assert_eq!(
            field.to_rule("signup-form"),
            Err(SpecError::MissingTarget {
                form: "signup-form".to_string(),
                field: "retype_password".to_string(),
            })
        );
    }

    #[test]
    fn test_unknown_rule_kind_fails_to_parse() {
        let toml = r#"
            [[form]]
            id = "login-form"

            [[form.field]]
            name = "email"
            rules = [{ kind = "phone", message = "?" }]
        "#;
        assert!(Config::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LOGIN_TOML.as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.forms.len(), 1);
        assert_eq!(config.forms[0].id, "login-form");
    }

    #[test]
    fn test_bundled_file_matches_catalog() {
        let config = Config::from_toml_str(include_str!("../formwarden.toml")).unwrap();
        let from_file = config.form_specs().unwrap();
        let built_in = catalog::specs().unwrap();

        assert_eq!(from_file.len(), built_in.len());
        for (file_spec, catalog_spec) in from_file.iter().zip(&built_in) {
            assert_eq!(file_spec.form_id(), catalog_spec.form_id());
            assert_eq!(file_spec.fields(), catalog_spec.fields());
        }
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = Config::load("/nonexistent/formwarden.toml").unwrap();
        assert!(config.forms.is_empty());
    }
}
