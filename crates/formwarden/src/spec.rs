// File: src/spec.rs
// Purpose: Declarative description of one form: its fields and what happens when it is valid

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::error::SpecError;
use crate::host::FormHost;
use crate::rule::FieldRule;

/// Callback run with the live form once every field is valid
pub type OnValid = Rc<dyn Fn(&mut dyn FormHost)>;

/// Immutable rule set for one form, built once when the page initialises
///
/// # Example
///
/// ```
/// use formwarden::{FieldRule, FormSpec};
///
/// let spec = FormSpec::builder("resend-activation-form")
///     .field(
///         FieldRule::new("email")
///             .required("Email is a mandatory field.")
///             .email("Invalid email address."),
///     )
///     .build()
///     .unwrap();
/// assert_eq!(spec.fields().len(), 1);
/// ```
#[derive(Clone)]
pub struct FormSpec {
    form_id: String,
    fields: Vec<FieldRule>,
    on_valid: OnValid,
}

impl FormSpec {
    pub fn builder(form_id: impl Into<String>) -> FormSpecBuilder {
        FormSpecBuilder {
            form_id: form_id.into(),
            fields: Vec::new(),
            on_valid: None,
        }
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    pub fn fields(&self) -> &[FieldRule] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.name() == name)
    }

    pub(crate) fn run_on_valid(&self, form: &mut dyn FormHost) {
        (self.on_valid)(form)
    }
}

impl fmt::Debug for FormSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormSpec")
            .field("form_id", &self.form_id)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// Builder for [`FormSpec`]
pub struct FormSpecBuilder {
    form_id: String,
    fields: Vec<FieldRule>,
    on_valid: Option<OnValid>,
}

impl FormSpecBuilder {
    pub fn field(mut self, rule: FieldRule) -> Self {
        self.fields.push(rule);
        self
    }

    pub fn fields(mut self, rules: impl IntoIterator<Item = FieldRule>) -> Self {
        self.fields.extend(rules);
        self
    }

    /// Replaces the default action, which submits the form natively
    pub fn on_valid<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut dyn FormHost) + 'static,
    {
        self.on_valid = Some(Rc::new(callback));
        self
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    pub fn build(self) -> Result<FormSpec, SpecError> {
        if self.form_id.trim().is_empty() {
            return Err(SpecError::EmptyFormId);
        }

        let mut seen = HashSet::new();
        for rule in &self.fields {
            if !seen.insert(rule.name()) {
                return Err(SpecError::DuplicateField {
                    form: self.form_id.clone(),
                    field: rule.name().to_string(),
                });
            }
            rule.ensure_complete(&self.form_id)?;
        }

        Ok(FormSpec {
            form_id: self.form_id,
            fields: self.fields,
            on_valid: self.on_valid.unwrap_or_else(native_submit),
        })
    }
}

fn native_submit() -> OnValid {
    Rc::new(|form: &mut dyn FormHost| form.submit())
}
