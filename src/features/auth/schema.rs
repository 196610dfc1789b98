//! Forms of the sign-in, sign-up, profile and password-reset pages. Structs
//! carrying passwords do not implement `Debug` so they cannot end up in logs.

use crate::features::forms::{validate_form, FieldErrors};
use serde::Deserialize;
use validator::Validate;

#[derive(Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginData {
    #[validate(email(message = "Enter a valid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Minimum 6 characters"))]
    pub password: String,
}

impl LoginData {
    /// # Errors
    /// Returns the per-field messages when any constraint fails.
    pub fn check(&self) -> Result<(), FieldErrors> {
        validate_form(self, None)
    }
}

#[derive(Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterData {
    #[validate(length(min = 2, message = "Enter your name"))]
    pub name: String,
    #[validate(email(message = "Enter a valid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Minimum 6 characters"))]
    pub password: String,
    #[validate(length(min = 6, message = "Minimum 6 characters"))]
    pub confirm_password: String,
}

impl RegisterData {
    /// # Errors
    /// Returns the per-field messages when any constraint fails.
    pub fn check(&self) -> Result<(), FieldErrors> {
        validate_form(self, Some((&self.password, &self.confirm_password)))
    }
}

#[derive(Clone, Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ProfileData {
    #[validate(length(min = 2, message = "Enter your name"))]
    pub name: String,
    #[validate(email(message = "Enter a valid email"))]
    pub email: String,
    #[validate(length(max = 32, message = "Username is too long"))]
    pub username: String,
}

impl ProfileData {
    /// # Errors
    /// Returns the per-field messages when any constraint fails.
    pub fn check(&self) -> Result<(), FieldErrors> {
        validate_form(self, None)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RequestResetData {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
}

impl RequestResetData {
    /// # Errors
    /// Returns the per-field messages when any constraint fails.
    pub fn check(&self) -> Result<(), FieldErrors> {
        validate_form(self, None)
    }
}

#[derive(Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ResetPasswordData {
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    #[validate(length(
        min = 6,
        message = "Confirm Password must be at least 6 characters long"
    ))]
    pub confirm_password: String,
}

impl ResetPasswordData {
    /// # Errors
    /// Returns the per-field messages when any constraint fails.
    pub fn check(&self) -> Result<(), FieldErrors> {
        validate_form(self, Some((&self.password, &self.confirm_password)))
    }
}
