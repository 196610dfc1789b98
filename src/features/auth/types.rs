//! Request bodies of the auth endpoints. Those carrying passwords have no
//! `Debug` impl and must never be logged.

use crate::features::auth::schema::{LoginData, ProfileData, RegisterData};
use serde::Serialize;

#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl From<&LoginData> for LoginRequest {
    fn from(data: &LoginData) -> Self {
        Self {
            email: data.email.trim().to_string(),
            password: data.password.clone(),
        }
    }
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl From<&RegisterData> for RegisterRequest {
    fn from(data: &RegisterData) -> Self {
        Self {
            name: data.name.trim().to_string(),
            email: data.email.trim().to_string(),
            password: data.password.clone(),
            confirm_password: data.confirm_password.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ProfileRequest {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl From<&ProfileData> for ProfileRequest {
    fn from(data: &ProfileData) -> Self {
        let username = data.username.trim();
        Self {
            name: data.name.trim().to_string(),
            email: data.email.trim().to_string(),
            username: (!username.is_empty()).then(|| username.to_string()),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_uses_backend_field_names() {
        let data = RegisterData {
            name: " Ada ".to_string(),
            email: "ada@example.com ".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        };
        let json = serde_json::to_value(RegisterRequest::from(&data)).expect("json");
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "secret1",
                "confirmPassword": "secret1",
            })
        );
    }

    #[test]
    fn blank_username_is_omitted() {
        let data = ProfileData {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            username: "   ".to_string(),
        };
        let json = serde_json::to_value(ProfileRequest::from(&data)).expect("json");
        assert!(json.get("username").is_none());
    }
}
