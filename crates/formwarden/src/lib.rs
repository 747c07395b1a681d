//! Formwarden
//!
//! Declarative validation for the account pages' forms. A [`FormSpec`] lists
//! each field's validators in order with the message shown when one fails;
//! [`bind`] attaches it to a live form, and the resulting [`FormBinder`]
//! blocks invalid submissions, renders messages, and on success runs the
//! form's action and toggles the shared [`LoadingOverlay`].
//!
//! The page is reached only through the traits in [`host`] and
//! [`overlay::OverlayElement`], so the engine runs the same under WASM and in
//! native tests.

pub mod binder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod host;
pub mod overlay;
pub mod page;
pub mod rule;
pub mod spec;
pub mod validator;

pub use binder::{bind, FieldEvent, FieldState, FormBinder, SubmitOutcome, ValidationTriggers};
pub use config::Config;
pub use error::SpecError;
pub use host::{FieldLookup, FlashNotifier, FormDocument, FormHost};
pub use overlay::{LoadingOverlay, OverlayElement};
pub use page::Page;
pub use rule::{FieldRule, ValidationResult};
pub use spec::{FormSpec, FormSpecBuilder, OnValid};
pub use validator::{Validator, ValidatorKind};
