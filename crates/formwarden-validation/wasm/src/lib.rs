//! Formwarden Validation WASM
//!
//! WebAssembly bindings that bind the account-page forms in the browser,
//! using the same rule engine the native tests exercise.

use std::cell::RefCell;
use std::rc::Rc;

use formwarden::config::FieldConfig;
use formwarden::{
    catalog, Config, FieldEvent, FormBinder, LoadingOverlay, Page, ValidationTriggers,
};
use formwarden_validation_core as checks;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent};

pub mod dom;
pub mod logging;

use dom::{DomDocument, DomForm, DomLookup, DomOverlay, WindowFlash};

/// Keys that never trigger a keyup re-validation
const IGNORED_KEYS: &[&str] = &[
    "Tab", "Shift", "Control", "Alt", "AltGraph", "CapsLock", "NumLock", "End", "Home",
    "ArrowLeft", "ArrowUp", "ArrowRight", "ArrowDown", "Insert",
];

/// What `bootPage` set up, reused by the later exports
struct BootedPage {
    overlay: Rc<LoadingOverlay>,
    error_class: String,
    triggers: ValidationTriggers,
}

thread_local! {
    static BOOTED_PAGE: RefCell<Option<BootedPage>> = const { RefCell::new(None) };
}

fn booted_page<T>(f: impl FnOnce(&BootedPage) -> T) -> Result<T, JsValue> {
    BOOTED_PAGE.with(|page| {
        page.borrow()
            .as_ref()
            .map(f)
            .ok_or_else(|| JsValue::from_str("bootPage has not run on this page"))
    })
}

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    logging::init();
}

fn load_config(config_toml: Option<String>) -> Result<Config, JsValue> {
    match config_toml {
        Some(toml) => Config::from_toml_str(&toml)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {:#}", e))),
        None => Ok(Config::default()),
    }
}

/// Document-ready entry point for every page
///
/// Renders the flash message, finds the loading overlay, and binds each
/// configured form present on the page. Returns how many forms were bound.
///
/// # Example (JavaScript)
/// ```javascript
/// import init, { bootPage } from './formwarden_validation_wasm.js';
/// await init();
/// bootPage();
/// ```
#[wasm_bindgen(js_name = bootPage)]
pub fn boot_page(config_toml: Option<String>) -> Result<usize, JsValue> {
    let config = load_config(config_toml)?;
    let document = dom::document()?;

    let overlay = DomOverlay::find(&document, &config.page.overlay_selector)?;
    let overlay =
        Rc::new(LoadingOverlay::new(overlay).with_hidden_class(config.page.hidden_class.clone()));

    let page = Page::boot(
        &DomDocument::new(document, config.page.error_class.clone()),
        &WindowFlash,
        overlay.clone(),
        &config,
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    BOOTED_PAGE.with(|booted| {
        *booted.borrow_mut() = Some(BootedPage {
            overlay,
            error_class: config.page.error_class.clone(),
            triggers: config.validation,
        });
    });

    let binders = page.into_binders();
    let bound = binders.len();
    for binder in binders {
        attach(binder)?;
    }
    Ok(bound)
}

/// Binds one more built-in form after `bootPage`, sharing its overlay and settings.
/// Returns `false` when the page has no such form.
#[wasm_bindgen(js_name = bindForm)]
pub fn bind_form(form_id: &str) -> Result<bool, JsValue> {
    let (overlay, error_class, triggers) = booted_page(|page| {
        (page.overlay.clone(), page.error_class.clone(), page.triggers)
    })?;
    let builder = catalog::builder(form_id)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown form '{}'", form_id)))?;
    let spec = builder
        .build()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let forms = DomDocument::new(dom::document()?, error_class);
    match formwarden::bind(&forms, spec, overlay, triggers) {
        Some(binder) => {
            attach(binder)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Wires submit, focusout and keyup listeners. Listeners live as long as the page.
fn attach(binder: FormBinder<DomForm>) -> Result<(), JsValue> {
    let form = binder.host().element().clone();
    let triggers: ValidationTriggers = binder.triggers();
    let binder = Rc::new(RefCell::new(binder));

    let on_submit = {
        let binder = binder.clone();
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            // The binder submits natively itself once the form is valid
            event.prevent_default();
            match binder.try_borrow_mut() {
                Ok(mut binder) => {
                    binder.submit();
                }
                Err(_) => tracing::debug!("submit ignored while a validation pass is running"),
            }
        })
    };
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    if triggers.on_blur {
        let binder = binder.clone();
        // focusout bubbles up to the form, blur doesn't
        let on_focusout = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            dispatch(&binder, &event, FieldEvent::Blur);
        });
        form.add_event_listener_with_callback("focusout", on_focusout.as_ref().unchecked_ref())?;
        on_focusout.forget();
    }

    if triggers.on_keyup {
        let binder = binder.clone();
        let on_keyup = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let ignored = event
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|key| IGNORED_KEYS.contains(&key.key().as_str()));
            if !ignored {
                dispatch(&binder, &event, FieldEvent::KeyUp);
            }
        });
        form.add_event_listener_with_callback("keyup", on_keyup.as_ref().unchecked_ref())?;
        on_keyup.forget();
    }

    Ok(())
}

fn dispatch(binder: &RefCell<FormBinder<DomForm>>, event: &Event, kind: FieldEvent) {
    let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return;
    };
    let Some(name) = target.get_attribute("name") else {
        return;
    };
    let id = target.id();
    let element_id = (!id.is_empty()).then_some(id.as_str());

    // Toggling the overlay blurs the focused control while a submit holds the binder
    let Ok(mut binder) = binder.try_borrow_mut() else {
        return;
    };
    binder.handle_event(kind, &name, element_id);
}

/// Validate one value against a list of rules
///
/// # Arguments
/// * `field_name` - Name of the field being validated
/// * `value` - The value to validate
/// * `rules` - Array of `{ kind, message, target? }` objects, checked in order
///
/// # Returns
/// `{ field, failed, message }` for the first failing rule
///
/// # Example (JavaScript)
/// ```javascript
/// const result = validateField('email', 'user@example.com', [
///     { kind: 'required', message: 'Email is a mandatory field.' },
///     { kind: 'email', message: 'Invalid email address.' },
/// ]);
/// ```
#[wasm_bindgen(js_name = validateField)]
pub fn validate_field(field_name: &str, value: &str, rules: JsValue) -> Result<JsValue, JsValue> {
    let field = FieldConfig {
        name: field_name.to_string(),
        rules: serde_wasm_bindgen::from_value(rules)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse rules: {}", e)))?,
    };
    let rule = field
        .to_rule("validateField")
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let lookup = DomLookup::new(dom::document()?);
    let result = rule.evaluate(value, &lookup);
    Ok(serde_wasm_bindgen::to_value(&result)?)
}

/// Quick email validation
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email_js(email: &str) -> bool {
    checks::is_valid_email(email)
}

/// Quick password validation
#[wasm_bindgen(js_name = isValidPassword)]
pub fn is_valid_password_js(password: &str) -> bool {
    checks::is_valid_password(password)
}

/// Show/hide the overlay `bootPage` found, from page scripts
#[wasm_bindgen(js_name = toggleLoading)]
pub fn toggle_loading() -> Result<(), JsValue> {
    let overlay = booted_page(|page| page.overlay.clone())?;
    overlay.toggle();
    Ok(())
}
