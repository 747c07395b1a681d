//! Formwarden Validation Core
//!
//! Pure field predicates shared by the rule engine and the WASM bindings.
//! Every function here is a plain `&str -> bool` check with no DOM access.

pub mod email;
pub mod password;
pub mod string;

// Re-export all validators
pub use email::*;
pub use password::*;
pub use string::*;
