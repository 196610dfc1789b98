//! Client helpers for the admin user endpoints. These functions keep endpoint
//! paths centralized and assume the backend enforces authorization.

use crate::{
    api::{endpoints, ApiClient, AppError, Envelope},
    features::users::{
        schema::CreateUserData,
        types::{ImageUpload, ListQuery, UpdateUserRequest, UserRecord},
    },
};
use reqwest::multipart::{Form, Part};
use secrecy::SecretString;
use serde::de::IgnoredAny;
use serde_json::Value;

/// Creates a user through the multipart endpoint, attaching the image when
/// one was uploaded.
///
/// # Errors
/// Returns an `AppError` if the form cannot be built or the call fails.
pub async fn create_user(
    api: &ApiClient,
    data: &CreateUserData,
    image: Option<ImageUpload>,
    bearer: Option<&SecretString>,
) -> Result<Envelope<Value>, AppError> {
    let mut form = Form::new()
        .text("name", data.name.trim().to_string())
        .text("email", data.email.trim().to_string())
        .text("password", data.password.clone())
        .text("role", data.role.trim().to_string());

    if let Some(image) = image {
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)
            .map_err(|err| AppError::Serialization(format!("Invalid image type: {err}")))?;
        form = form.part("image", part);
    }

    api.post_multipart(api.url(endpoints::AUTH_CREATE_USER, None)?, form, bearer)
        .await
}

/// Fetches one page of users.
///
/// # Errors
/// Returns an `AppError` if the call fails; see `ApiClient`.
pub async fn list_users(
    api: &ApiClient,
    query: &ListQuery,
    bearer: Option<&SecretString>,
) -> Result<Envelope<Vec<UserRecord>>, AppError> {
    let mut url = api.url(endpoints::ADMIN_USERS, None)?;
    url.query_pairs_mut()
        .append_pair("page", &query.page.to_string())
        .append_pair("size", &query.size.to_string())
        .append_pair("search", &query.search);

    api.get_json(url, bearer).await
}

/// Fetches user details after basic input validation.
///
/// # Errors
/// Returns `AppError::Config` for a blank id, otherwise see `ApiClient`.
pub async fn get_user(
    api: &ApiClient,
    id: &str,
    bearer: Option<&SecretString>,
) -> Result<Envelope<UserRecord>, AppError> {
    let id = required_id(id)?;
    api.get_json(api.url(endpoints::ADMIN_USERS, Some(id))?, bearer)
        .await
}

/// # Errors
/// Returns `AppError::Config` for a blank id, otherwise see `ApiClient`.
pub async fn update_user(
    api: &ApiClient,
    id: &str,
    request: &UpdateUserRequest,
    bearer: Option<&SecretString>,
) -> Result<Envelope<Value>, AppError> {
    let id = required_id(id)?;
    api.put_json(api.url(endpoints::ADMIN_USERS, Some(id))?, request, bearer)
        .await
}

/// # Errors
/// Returns `AppError::Config` for a blank id, otherwise see `ApiClient`.
pub async fn delete_user(
    api: &ApiClient,
    id: &str,
    bearer: Option<&SecretString>,
) -> Result<Envelope<IgnoredAny>, AppError> {
    let id = required_id(id)?;
    api.delete_json(api.url(endpoints::ADMIN_USERS, Some(id))?, bearer)
        .await
}

fn required_id(id: &str) -> Result<&str, AppError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(AppError::Config("User id is required.".to_string()))
    } else {
        Ok(trimmed)
    }
}
