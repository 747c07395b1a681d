// File: src/page.rs
// Purpose: Page start-up: flash message, overlay, and binding whichever forms the page has

use std::rc::Rc;

use tracing::info;

use crate::binder::{bind, FormBinder, ValidationTriggers};
use crate::config::Config;
use crate::error::SpecError;
use crate::host::{FlashNotifier, FormDocument, FormHost};
use crate::overlay::LoadingOverlay;
use crate::spec::FormSpec;

/// Everything bound on the current page
pub struct Page<H> {
    overlay: Rc<LoadingOverlay>,
    binders: Vec<FormBinder<H>>,
}

impl<H: FormHost> Page<H> {
    /// Runs once the document is ready, using the forms from `config`
    /// (the built-in catalog when it declares none).
    pub fn boot<D>(
        document: &D,
        flash: &dyn FlashNotifier,
        overlay: Rc<LoadingOverlay>,
        config: &Config,
    ) -> Result<Self, SpecError>
    where
        D: FormDocument<Form = H>,
    {
        let specs = config.form_specs()?;
        Ok(Self::with_specs(
            document,
            flash,
            overlay,
            specs,
            &config.page.flash_selector,
            config.validation,
        ))
    }

    /// Like [`Page::boot`] with explicit specs, e.g. ones carrying custom `on_valid` actions
    pub fn with_specs<D>(
        document: &D,
        flash: &dyn FlashNotifier,
        overlay: Rc<LoadingOverlay>,
        specs: Vec<FormSpec>,
        flash_selector: &str,
        triggers: ValidationTriggers,
    ) -> Self
    where
        D: FormDocument<Form = H>,
    {
        flash.create(flash_selector);

        let binders: Vec<_> = specs
            .into_iter()
            .filter_map(|spec| bind(document, spec, overlay.clone(), triggers))
            .collect();
        info!(forms = binders.len(), "page forms bound");

        Self { overlay, binders }
    }

    pub fn overlay(&self) -> &Rc<LoadingOverlay> {
        &self.overlay
    }

    pub fn binders(&self) -> &[FormBinder<H>] {
        &self.binders
    }

    pub fn binder_mut(&mut self, form_id: &str) -> Option<&mut FormBinder<H>> {
        self.binders
            .iter_mut()
            .find(|binder| binder.spec().form_id() == form_id)
    }

    pub fn into_binders(self) -> Vec<FormBinder<H>> {
        self.binders
    }
}
