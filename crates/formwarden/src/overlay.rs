// File: src/overlay.rs
// Purpose: Full-page loading overlay shown while a submission is in flight

/// Class whose presence keeps the overlay hidden
pub const HIDDEN_CLASS: &str = "hidden";

/// The overlay element as seen by [`LoadingOverlay`]
pub trait OverlayElement {
    /// Drops focus from whichever element currently has it
    fn blur_active_element(&self);
    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
}

/// Handle to the page's single loading overlay
///
/// Constructed once at page init and shared (`Rc`) by every binder on the page.
pub struct LoadingOverlay {
    element: Box<dyn OverlayElement>,
    hidden_class: String,
}

impl LoadingOverlay {
    pub fn new(element: impl OverlayElement + 'static) -> Self {
        Self {
            element: Box::new(element),
            hidden_class: HIDDEN_CLASS.to_string(),
        }
    }

    pub fn with_hidden_class(mut self, class: impl Into<String>) -> Self {
        self.hidden_class = class.into();
        self
    }

    pub fn is_visible(&self) -> bool {
        !self.element.has_class(&self.hidden_class)
    }

    /// Flips the overlay between shown and hidden.
    /// Focus is dropped first so the focused control doesn't stay highlighted under it.
    pub fn toggle(&self) {
        self.element.blur_active_element();
        if self.element.has_class(&self.hidden_class) {
            self.element.remove_class(&self.hidden_class);
        } else {
            self.element.add_class(&self.hidden_class);
        }
        tracing::debug!(visible = self.is_visible(), "loading overlay toggled");
    }
}
