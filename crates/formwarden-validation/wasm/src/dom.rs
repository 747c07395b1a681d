//! `web-sys` implementations of the formwarden host traits

use formwarden::{FieldLookup, FlashNotifier, FormDocument, FormHost, OverlayElement};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement,
};

/// Attribute linking a rendered message label to its control's name
const ERROR_FOR_ATTR: &str = "data-error-for";

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("No document available"))
}

/// Value of an input, textarea or select; `None` for anything else
fn control_value(element: &Element) -> Option<String> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        return Some(area.value());
    }
    element.dyn_ref::<HtmlSelectElement>().map(HtmlSelectElement::value)
}

/// Reads element values straight from the document
pub struct DomLookup {
    document: Document,
}

impl DomLookup {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl FieldLookup for DomLookup {
    fn value_by_id(&self, id: &str) -> Option<String> {
        self.document
            .get_element_by_id(id)
            .as_ref()
            .and_then(control_value)
    }
}

pub struct DomDocument {
    document: Document,
    error_class: String,
}

impl DomDocument {
    pub fn new(document: Document, error_class: impl Into<String>) -> Self {
        Self {
            document,
            error_class: error_class.into(),
        }
    }
}

impl FormDocument for DomDocument {
    type Form = DomForm;

    fn form_by_id(&self, id: &str) -> Option<DomForm> {
        let form = self
            .document
            .get_element_by_id(id)?
            .dyn_into::<HtmlFormElement>()
            .ok()?;
        Some(DomForm {
            lookup: DomLookup::new(self.document.clone()),
            form,
            error_class: self.error_class.clone(),
        })
    }
}

/// A `<form>` element. Messages go in a `<label>` inserted right after the control.
pub struct DomForm {
    lookup: DomLookup,
    form: HtmlFormElement,
    error_class: String,
}

impl DomForm {
    pub fn element(&self) -> &HtmlFormElement {
        &self.form
    }

    fn control(&self, name: &str) -> Option<Element> {
        self.form
            .query_selector(&format!("[name=\"{}\"]", name))
            .ok()
            .flatten()
    }

    fn error_label(&self, name: &str) -> Option<Element> {
        self.form
            .query_selector(&format!("label[{}=\"{}\"]", ERROR_FOR_ATTR, name))
            .ok()
            .flatten()
    }

    fn create_error_label(&self, name: &str, control: &Element) -> Result<Element, JsValue> {
        let label = self.lookup.document.create_element("label")?;
        label.set_attribute(ERROR_FOR_ATTR, name)?;
        label.set_attribute("class", &self.error_class)?;
        let id = control.id();
        if !id.is_empty() {
            label.set_attribute("for", &id)?;
            label.set_id(&format!("{}-error", id));
        }
        control.after_with_node_1(&label)?;
        Ok(label)
    }

    fn render_error(&self, name: &str, message: &str) -> Result<(), JsValue> {
        let Some(control) = self.control(name) else {
            return Ok(());
        };
        control.class_list().add_1(&self.error_class)?;

        let label = match self.error_label(name) {
            Some(label) => label,
            None => self.create_error_label(name, &control)?,
        };
        label.set_text_content(Some(message));
        label.remove_attribute("hidden")?;
        Ok(())
    }

    fn remove_error(&self, name: &str) -> Result<(), JsValue> {
        if let Some(control) = self.control(name) {
            control.class_list().remove_1(&self.error_class)?;
        }
        if let Some(label) = self.error_label(name) {
            label.set_text_content(None);
            label.set_attribute("hidden", "")?;
        }
        Ok(())
    }
}

impl FieldLookup for DomForm {
    fn value_by_id(&self, id: &str) -> Option<String> {
        self.lookup.value_by_id(id)
    }
}

impl FormHost for DomForm {
    fn field_value(&self, name: &str) -> Option<String> {
        self.control(name).as_ref().and_then(control_value)
    }

    fn show_error(&mut self, name: &str, message: &str) {
        if let Err(err) = self.render_error(name, message) {
            tracing::warn!(field = name, "could not render message: {:?}", err);
        }
    }

    fn clear_error(&mut self, name: &str) {
        if let Err(err) = self.remove_error(name) {
            tracing::warn!(field = name, "could not clear message: {:?}", err);
        }
    }

    fn submit(&mut self) {
        if let Err(err) = self.form.submit() {
            tracing::error!(form_id = %self.form.id(), "native submit failed: {:?}", err);
        }
    }
}

/// The page's loading overlay element
pub struct DomOverlay {
    document: Document,
    element: Element,
}

impl DomOverlay {
    /// Finds the overlay with a CSS selector such as `.loading`
    pub fn find(document: &Document, selector: &str) -> Result<Self, JsValue> {
        let element = document
            .query_selector(selector)?
            .ok_or_else(|| JsValue::from_str(&format!("No overlay element matches '{}'", selector)))?;
        Ok(Self {
            document: document.clone(),
            element,
        })
    }
}

impl OverlayElement for DomOverlay {
    fn blur_active_element(&self) {
        if let Some(active) = self.document.active_element() {
            if let Some(html) = active.dyn_ref::<HtmlElement>() {
                let _ = html.blur();
            }
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.element.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        let _ = self.element.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.element.class_list().remove_1(class);
    }
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = Flash, js_name = create)]
    fn flash_create(selector: &str) -> Result<(), JsValue>;
}

/// The page script's global `Flash.create`
pub struct WindowFlash;

impl FlashNotifier for WindowFlash {
    fn create(&self, selector: &str) {
        if let Err(err) = flash_create(selector) {
            tracing::warn!(selector, "Flash.create failed: {:?}", err);
        }
    }
}
