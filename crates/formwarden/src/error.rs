// File: src/error.rs
// Purpose: Errors raised while assembling form specs

use thiserror::Error;

use crate::validator::ValidatorKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("form id must not be empty")]
    EmptyFormId,

    #[error("form '{form}': field '{field}' uses {kind} but has no message for it")]
    MissingMessage {
        form: String,
        field: String,
        kind: ValidatorKind,
    },

    #[error("form '{form}': field '{field}' is declared more than once")]
    DuplicateField { form: String, field: String },

    #[error("form '{form}': field '{field}' has an equalTo rule without a target")]
    MissingTarget { form: String, field: String },
}
