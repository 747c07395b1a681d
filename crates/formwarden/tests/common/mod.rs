// In-memory stand-ins for the page collaborators

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use formwarden::{FieldLookup, FlashNotifier, FormDocument, FormHost, OverlayElement};

#[derive(Debug, Clone, Default)]
pub struct FakeForm {
    values: BTreeMap<String, String>,
    ids: BTreeMap<String, String>,
    pub errors: BTreeMap<String, String>,
    pub submissions: usize,
}

impl FakeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_field_id(mut self, name: &str, id: &str, value: &str) -> Self {
        self.ids.insert(id.to_string(), name.to_string());
        self.with_field(name, value)
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_string(), value.to_string());
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }
}

impl FieldLookup for FakeForm {
    fn value_by_id(&self, id: &str) -> Option<String> {
        self.ids.get(id).and_then(|name| self.values.get(name)).cloned()
    }
}

impl FormHost for FakeForm {
    fn field_value(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    fn show_error(&mut self, name: &str, message: &str) {
        self.errors.insert(name.to_string(), message.to_string());
    }

    fn clear_error(&mut self, name: &str) {
        self.errors.remove(name);
    }

    fn submit(&mut self) {
        self.submissions += 1;
    }
}

#[derive(Default)]
pub struct FakeDocument {
    forms: HashMap<String, FakeForm>,
}

impl FakeDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(mut self, id: &str, form: FakeForm) -> Self {
        self.forms.insert(id.to_string(), form);
        self
    }
}

impl FormDocument for FakeDocument {
    type Form = FakeForm;

    fn form_by_id(&self, id: &str) -> Option<FakeForm> {
        self.forms.get(id).cloned()
    }
}

#[derive(Default)]
pub struct OverlayState {
    pub hidden: Cell<bool>,
    pub flips: Cell<usize>,
    pub blurs: Cell<usize>,
}

/// Overlay element that starts hidden, as on page load
#[derive(Clone)]
pub struct FakeOverlay(pub Rc<OverlayState>);

impl FakeOverlay {
    pub fn hidden() -> Self {
        let state = OverlayState::default();
        state.hidden.set(true);
        Self(Rc::new(state))
    }
}

impl OverlayElement for FakeOverlay {
    fn blur_active_element(&self) {
        self.0.blurs.set(self.0.blurs.get() + 1);
    }

    fn has_class(&self, class: &str) -> bool {
        class == "hidden" && self.0.hidden.get()
    }

    fn add_class(&self, class: &str) {
        if class == "hidden" {
            self.0.hidden.set(true);
            self.0.flips.set(self.0.flips.get() + 1);
        }
    }

    fn remove_class(&self, class: &str) {
        if class == "hidden" {
            self.0.hidden.set(false);
            self.0.flips.set(self.0.flips.get() + 1);
        }
    }
}

#[derive(Default)]
pub struct FakeFlash {
    pub created: RefCell<Vec<String>>,
}

impl FlashNotifier for FakeFlash {
    fn create(&self, selector: &str) {
        self.created.borrow_mut().push(selector.to_string());
    }
}
