//! Client helpers for the auth endpoints. Endpoint paths stay centralized and
//! the backend is assumed to enforce everything it is asked to do.

use crate::{
    api::{endpoints, ApiClient, AppError, Envelope},
    features::{
        auth::types::{
            LoginRequest, PasswordResetRequest, ProfileRequest, RegisterRequest,
            ResetPasswordRequest,
        },
        users::types::UserRecord,
    },
};
use secrecy::SecretString;
use serde::de::IgnoredAny;
use serde_json::Value;

/// Exchanges credentials for a token and the user record.
///
/// # Errors
/// Returns an `AppError` if the call fails; see `ApiClient`.
pub async fn login(api: &ApiClient, request: &LoginRequest) -> Result<Envelope<UserRecord>, AppError> {
    api.post_json(api.url(endpoints::AUTH_LOGIN, None)?, request, None)
        .await
}

/// The payload is left opaque; callers decide what, if anything, to read.
///
/// # Errors
/// Returns an `AppError` if the call fails; see `ApiClient`.
pub async fn register(
    api: &ApiClient,
    request: &RegisterRequest,
) -> Result<Envelope<Value>, AppError> {
    api.post_json(api.url(endpoints::AUTH_REGISTER, None)?, request, None)
        .await
}

/// # Errors
/// Returns an `AppError` if the call fails; see `ApiClient`.
pub async fn update_profile(
    api: &ApiClient,
    request: &ProfileRequest,
    bearer: Option<&SecretString>,
) -> Result<Envelope<Value>, AppError> {
    api.put_json(api.url(endpoints::AUTH_PROFILE, None)?, request, bearer)
        .await
}

/// # Errors
/// Returns an `AppError` if the call fails; see `ApiClient`.
pub async fn request_password_reset(
    api: &ApiClient,
    email: &str,
) -> Result<Envelope<IgnoredAny>, AppError> {
    let request = PasswordResetRequest {
        email: email.trim().to_string(),
    };
    api.post_json(
        api.url(endpoints::AUTH_REQUEST_PASSWORD_RESET, None)?,
        &request,
        None,
    )
    .await
}

/// Redeems a reset token after basic input validation.
///
/// # Errors
/// Returns `AppError::Config` for a blank token, otherwise see `ApiClient`.
pub async fn reset_password(
    api: &ApiClient,
    token: &str,
    new_password: &str,
) -> Result<Envelope<IgnoredAny>, AppError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(AppError::Config("Reset token is required.".to_string()));
    }

    let request = ResetPasswordRequest {
        new_password: new_password.to_string(),
    };
    api.post_json(
        api.url(endpoints::AUTH_RESET_PASSWORD, Some(token))?,
        &request,
        None,
    )
    .await
}
