// File: src/host.rs
// Purpose: Seams to the page the binder runs in (document, form, flash notifier)

use std::collections::HashMap;

/// Reads the live value of any element on the page by its id
pub trait FieldLookup {
    fn value_by_id(&self, id: &str) -> Option<String>;
}

impl FieldLookup for HashMap<String, String> {
    fn value_by_id(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

/// A live form element
///
/// Implemented over `web-sys` in the WASM crate and over plain maps in tests.
pub trait FormHost: FieldLookup {
    /// Current value of the named control, `None` when the form has no such control
    fn field_value(&self, name: &str) -> Option<String>;

    /// Renders `message` in the container next to the named control
    fn show_error(&mut self, name: &str, message: &str);

    /// Removes any rendered message for the named control
    fn clear_error(&mut self, name: &str);

    /// Performs the native form submission
    fn submit(&mut self);
}

/// Resolves forms by id
pub trait FormDocument {
    type Form: FormHost;

    fn form_by_id(&self, id: &str) -> Option<Self::Form>;
}

/// Page-wide notifier that renders server-provided status messages
pub trait FlashNotifier {
    fn create(&self, selector: &str);
}
