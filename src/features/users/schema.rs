//! Admin-side user forms.

use crate::features::{
    forms::{message_error, validate_form, FieldErrors},
    users::types::Role,
};
use serde::Deserialize;
use validator::{Validate, ValidationError};

pub const SELECT_VALID_ROLE: &str = "Select a valid role";

/// Never logged: carries the initial password.
#[derive(Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateUserData {
    #[validate(length(min = 2, message = "Enter user name"))]
    pub name: String,
    #[validate(email(message = "Enter a valid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Minimum 6 characters"))]
    pub password: String,
    #[validate(length(min = 6, message = "Minimum 6 characters"))]
    pub confirm_password: String,
    #[validate(custom(function = "validate_role"))]
    pub role: String,
}

impl CreateUserData {
    /// # Errors
    /// Returns the per-field messages when any constraint fails.
    pub fn check(&self) -> Result<(), FieldErrors> {
        validate_form(self, Some((&self.password, &self.confirm_password)))
    }
}

#[derive(Clone, Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct EditUserData {
    #[validate(length(min = 2, message = "Enter user name"))]
    pub name: String,
    #[validate(email(message = "Enter a valid email"))]
    pub email: String,
    #[validate(custom(function = "validate_role"))]
    pub role: String,
}

impl EditUserData {
    /// # Errors
    /// Returns the per-field messages when any constraint fails.
    pub fn check(&self) -> Result<(), FieldErrors> {
        validate_form(self, None)
    }
}

#[allow(clippy::ptr_arg)]
fn validate_role(role: &String) -> Result<(), ValidationError> {
    if Role::assignable(role).is_some() {
        Ok(())
    } else {
        Err(message_error("role", SELECT_VALID_ROLE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreateUserData {
        CreateUserData {
            name: "Grace Hopper".to_string(),
            email: "grace@example.com".to_string(),
            password: "cobol1959".to_string(),
            confirm_password: "cobol1959".to_string(),
            role: "admin".to_string(),
        }
    }

    #[test]
    fn create_accepts_valid_input() {
        assert!(valid_create().check().is_ok());
    }

    #[test]
    fn create_rejects_unknown_role() {
        let data = CreateUserData {
            role: "superuser".to_string(),
            ..valid_create()
        };
        let errors = data.check().expect_err("role");
        assert_eq!(errors.get("role"), Some(SELECT_VALID_ROLE));
    }

    #[test]
    fn create_reports_each_field() {
        let data = CreateUserData {
            name: "G".to_string(),
            email: "grace".to_string(),
            password: "123".to_string(),
            confirm_password: "12345678".to_string(),
            role: String::new(),
        };
        let errors = data.check().expect_err("invalid");
        assert_eq!(errors.get("name"), Some("Enter user name"));
        assert_eq!(errors.get("email"), Some("Enter a valid email"));
        assert_eq!(errors.get("password"), Some("Minimum 6 characters"));
        assert_eq!(errors.get("confirm_password"), Some("Passwords do not match"));
        assert_eq!(errors.get("role"), Some(SELECT_VALID_ROLE));
    }

    #[test]
    fn edit_requires_name_email_and_role() {
        let data = EditUserData {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            role: "user".to_string(),
        };
        assert!(data.check().is_ok());

        let data = EditUserData {
            role: "owner".to_string(),
            ..data
        };
        assert_eq!(data.check().expect_err("role").get("role"), Some(SELECT_VALID_ROLE));
    }
}
