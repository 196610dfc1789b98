//! Field-scoped validation results shared by every form. Schemas are plain
//! structs deriving `Validate`; this module turns their errors into one message
//! per field and adds the password confirmation check, which always reports on
//! `confirm_password`.

use std::{borrow::Cow, collections::BTreeMap};
use validator::{Validate, ValidationError, ValidationErrors};

pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";

/// First validation message per form field, keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut fields = BTreeMap::new();
        for (field, list) in errors.field_errors() {
            if let Some(first) = list.first() {
                let message = first
                    .message
                    .as_ref()
                    .map_or_else(|| first.code.to_string(), ToString::to_string);
                fields.insert(field.to_string(), message);
            }
        }
        Self(fields)
    }
}

/// Runs the schema and the optional confirmation check.
///
/// # Errors
/// Returns the per-field messages when any constraint fails.
pub fn validate_form<T: Validate>(
    form: &T,
    confirmation: Option<(&str, &str)>,
) -> Result<(), FieldErrors> {
    let mut errors = match form.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };

    if let Some((password, confirm_password)) = confirmation {
        if password != confirm_password {
            errors.add("confirm_password", message_error("mismatch", PASSWORDS_DO_NOT_MATCH));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(FieldErrors::from(&errors))
    }
}

pub(crate) fn message_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}
