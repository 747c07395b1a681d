// File: src/binder.rs
// Purpose: Wires a FormSpec to a live form: validation passes, error rendering, submission

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::host::{FormDocument, FormHost};
use crate::overlay::LoadingOverlay;
use crate::rule::ValidationResult;
use crate::spec::FormSpec;

/// Per-field display state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldState {
    /// Never validated; renders nothing
    #[default]
    Untouched,
    Valid,
    /// Renders the first failing validator's message
    Invalid,
}

/// Interaction that may re-validate a single field between submits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    Blur,
    KeyUp,
}

/// Which field events re-validate, configured under `[validation]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationTriggers {
    #[serde(default = "default_true")]
    pub on_blur: bool,

    #[serde(default = "default_true")]
    pub on_keyup: bool,
}

fn default_true() -> bool {
    true
}

impl ValidationTriggers {
    /// Validate on submit only
    pub fn submit_only() -> Self {
        Self {
            on_blur: false,
            on_keyup: false,
        }
    }

    fn enabled(&self, event: FieldEvent) -> bool {
        match event {
            FieldEvent::Blur => self.on_blur,
            FieldEvent::KeyUp => self.on_keyup,
        }
    }
}

impl Default for ValidationTriggers {
    fn default() -> Self {
        Self {
            on_blur: true,
            on_keyup: true,
        }
    }
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Every field passed; the form's action ran and the overlay was toggled
    Submitted,
    /// Submission was stopped; holds the failing fields
    Blocked(Vec<ValidationResult>),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted)
    }
}

/// Attaches `spec` to the form it names.
/// Returns `None` when the page has no such form, which is the normal case for
/// every form except the current page's.
pub fn bind<D: FormDocument>(
    document: &D,
    spec: FormSpec,
    overlay: Rc<LoadingOverlay>,
    triggers: ValidationTriggers,
) -> Option<FormBinder<D::Form>> {
    let Some(host) = document.form_by_id(spec.form_id()) else {
        debug!(form_id = spec.form_id(), "form not on this page, nothing to bind");
        return None;
    };
    debug!(form_id = spec.form_id(), fields = spec.fields().len(), "form bound");
    Some(FormBinder::new(spec, host, overlay, triggers))
}

/// A [`FormSpec`] attached to a live form
pub struct FormBinder<H> {
    spec: FormSpec,
    host: H,
    overlay: Rc<LoadingOverlay>,
    triggers: ValidationTriggers,
    states: Vec<FieldState>,
    results: Vec<ValidationResult>,
}

impl<H: FormHost> FormBinder<H> {
    pub fn new(
        spec: FormSpec,
        host: H,
        overlay: Rc<LoadingOverlay>,
        triggers: ValidationTriggers,
    ) -> Self {
        let states = vec![FieldState::Untouched; spec.fields().len()];
        Self {
            spec,
            host,
            overlay,
            triggers,
            states,
            results: Vec::new(),
        }
    }

    pub fn spec(&self) -> &FormSpec {
        &self.spec
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn triggers(&self) -> ValidationTriggers {
        self.triggers
    }

    pub fn state(&self, field: &str) -> Option<FieldState> {
        self.spec
            .fields()
            .iter()
            .position(|rule| rule.name() == field)
            .map(|index| self.states[index])
    }

    /// Results of the last full validation pass
    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }

    /// Validates every field in declaration order and renders each outcome.
    /// Fields with no control in the form are skipped.
    pub fn validate(&mut self) -> Vec<ValidationResult> {
        let results: Vec<_> = (0..self.spec.fields().len())
            .filter_map(|index| self.validate_field(index))
            .collect();
        trace!(
            form_id = self.spec.form_id(),
            failed = results.iter().filter(|r| r.failed).count(),
            "validation pass"
        );
        self.results = results.clone();
        results
    }

    /// Handles a submit event.
    /// When every field is valid the form's `on_valid` action runs first, then the overlay is toggled.
    pub fn submit(&mut self) -> SubmitOutcome {
        let failures: Vec<_> = self.validate().into_iter().filter(|r| r.failed).collect();
        if !failures.is_empty() {
            debug!(
                form_id = self.spec.form_id(),
                failed = failures.len(),
                "submission blocked"
            );
            return SubmitOutcome::Blocked(failures);
        }

        info!(form_id = self.spec.form_id(), "form valid, submitting");
        self.spec.run_on_valid(&mut self.host);
        self.overlay.toggle();
        SubmitOutcome::Submitted
    }

    /// Re-validates after a blur or keyup on the control `name` (element id `element_id`).
    ///
    /// A field is only re-checked once it has left `Untouched`, except that a blur
    /// on a non-empty untouched field validates it. Fields whose `equalTo` target is
    /// the event's element are re-checked too.
    pub fn handle_event(
        &mut self,
        event: FieldEvent,
        name: &str,
        element_id: Option<&str>,
    ) -> Vec<ValidationResult> {
        if !self.triggers.enabled(event) {
            return Vec::new();
        }

        let mut results = Vec::new();
        for index in 0..self.spec.fields().len() {
            let rule = &self.spec.fields()[index];
            let touched = self.states[index] != FieldState::Untouched;
            let is_source = rule.name() == name;
            let is_dependent = element_id.is_some_and(|id| rule.depends_on(id));

            let revalidate = if is_source {
                touched
                    || (event == FieldEvent::Blur
                        && self.host.field_value(name).is_some_and(|v| !v.is_empty()))
            } else {
                is_dependent && touched
            };

            if revalidate {
                results.extend(self.validate_field(index));
            }
        }
        results
    }

    fn validate_field(&mut self, index: usize) -> Option<ValidationResult> {
        let rule = &self.spec.fields()[index];
        let Some(value) = self.host.field_value(rule.name()) else {
            trace!(field = rule.name(), "no control for field, skipping");
            return None;
        };

        let result = rule.evaluate(&value, &self.host);
        if result.failed {
            let message = result.message.as_deref().unwrap_or_default();
            self.host.show_error(rule.name(), message);
            self.states[index] = FieldState::Invalid;
        } else {
            self.host.clear_error(rule.name());
            self.states[index] = FieldState::Valid;
        }
        Some(result)
    }
}
