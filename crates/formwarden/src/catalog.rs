// File: src/catalog.rs
// Purpose: Rule sets of the account pages (signup, login, password reset, activation, profile)

use crate::error::SpecError;
use crate::rule::FieldRule;
use crate::spec::{FormSpec, FormSpecBuilder};

pub const NAME_REQUIRED: &str = "Name is a mandatory field.";
pub const EMAIL_REQUIRED: &str = "Email is a mandatory field.";
pub const EMAIL_INVALID: &str = "Invalid email address.";
pub const PASSWORD_REQUIRED: &str = "Password is a mandatory field.";
pub const PASSWORD_WEAK: &str =
    "Passwords are 8-16 characters with uppercase letters, lowercase letters and at least one number.";
pub const RETYPE_MISMATCH: &str = "Retype password does not match password.";

/// Id of the password input that the retype field is compared against
pub const PASSWORD_INPUT_ID: &str = "password_input";

fn name_field() -> FieldRule {
    FieldRule::new("name").required(NAME_REQUIRED)
}

fn email_field() -> FieldRule {
    FieldRule::new("email")
        .required(EMAIL_REQUIRED)
        .email(EMAIL_INVALID)
}

fn password_field() -> FieldRule {
    FieldRule::new("password")
        .required(PASSWORD_REQUIRED)
        .password(PASSWORD_WEAK)
}

fn retype_password_field() -> FieldRule {
    FieldRule::new("retype_password").equal_to(PASSWORD_INPUT_ID, RETYPE_MISMATCH)
}

pub fn signup() -> FormSpecBuilder {
    FormSpec::builder("signup-form").fields([
        name_field(),
        email_field(),
        password_field(),
        retype_password_field(),
    ])
}

pub fn login() -> FormSpecBuilder {
    FormSpec::builder("login-form").fields([email_field(), password_field()])
}

pub fn forget_password() -> FormSpecBuilder {
    FormSpec::builder("forget-password-form").field(email_field())
}

pub fn resend_activation() -> FormSpecBuilder {
    FormSpec::builder("resend-activation-form").field(email_field())
}

pub fn edit_profile() -> FormSpecBuilder {
    FormSpec::builder("edit-profile-form").field(name_field())
}

pub fn edit_password() -> FormSpecBuilder {
    FormSpec::builder("edit-password-form").fields([password_field(), retype_password_field()])
}

/// Builders for every known form
pub fn builders() -> Vec<FormSpecBuilder> {
    vec![
        signup(),
        login(),
        forget_password(),
        resend_activation(),
        edit_profile(),
        edit_password(),
    ]
}

/// Every known form with the default native-submit action
pub fn specs() -> Result<Vec<FormSpec>, SpecError> {
    builders().into_iter().map(FormSpecBuilder::build).collect()
}

/// Builder for one known form
pub fn builder(form_id: &str) -> Option<FormSpecBuilder> {
    builders().into_iter().find(|b| b.form_id() == form_id)
}
