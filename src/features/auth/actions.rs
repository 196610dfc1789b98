//! Auth actions: call the backend, interpret the envelope, write the session
//! where needed and hand back an `ActionResult`. Inputs are expected to have
//! passed their schema already.

use crate::{
    api::ApiClient,
    features::{
        action::{ActionMessages, ActionResult},
        auth::{
            client,
            schema::{LoginData, ProfileData, RegisterData, RequestResetData, ResetPasswordData},
            session::SessionStore,
            types::{LoginRequest, ProfileRequest, RegisterRequest},
        },
        users::types::UserRecord,
    },
};
use secrecy::SecretString;
use tracing::{error, info, instrument};

pub const LOGIN: ActionMessages = ActionMessages {
    success: "Login successful",
    failure: "Login failed",
    error: "Login action failed",
};

pub const REGISTER: ActionMessages = ActionMessages {
    success: "Registration successful",
    failure: "Registration failed",
    error: "Registration action failed",
};

pub const UPDATE_PROFILE: ActionMessages = ActionMessages {
    success: "Profile updated successfully",
    failure: "Profile update failed",
    error: "Profile update action failed",
};

pub const REQUEST_PASSWORD_RESET: ActionMessages = ActionMessages {
    success: "Reset link sent",
    failure: "Failed to send reset link",
    error: "Reset request action failed",
};

pub const RESET_PASSWORD: ActionMessages = ActionMessages {
    success: "Password reset successfully",
    failure: "Failed to reset password",
    error: "Password reset action failed",
};

pub const MISSING_SESSION_DATA: &str = "Login response is missing session data";

/// Signs in and, on success, stores token and user in the session. Nothing is
/// written unless the backend returned both.
#[instrument(skip_all)]
pub async fn handle_login<S: SessionStore>(
    api: &ApiClient,
    session: &mut S,
    data: &LoginData,
) -> ActionResult<UserRecord> {
    let envelope = match client::login(api, &LoginRequest::from(data)).await {
        Ok(envelope) => envelope,
        Err(err) => return ActionResult::from_error(&err, LOGIN),
    };

    if !envelope.success {
        return ActionResult::from_envelope(envelope, LOGIN);
    }

    let token = envelope.token.filter(|token| !token.trim().is_empty());
    let (Some(token), Some(user)) = (token, envelope.data) else {
        error!("{MISSING_SESSION_DATA}");
        return ActionResult::failure(MISSING_SESSION_DATA);
    };

    if let Err(err) = session.establish(SecretString::from(token), user.clone()) {
        error!("Failed to store session: {err}");
        return ActionResult::failure(LOGIN.error);
    }

    info!(user_id = %user.id, role = %user.role, "signed in");
    ActionResult::ok(LOGIN.success, Some(user))
}

#[instrument(skip_all)]
pub async fn handle_register(api: &ApiClient, data: &RegisterData) -> ActionResult<UserRecord> {
    ActionResult::settle(
        client::register(api, &RegisterRequest::from(data)).await,
        REGISTER,
    )
    .decode_data()
}

/// Drops both session cookies.
pub fn handle_logout<S: SessionStore>(session: &mut S) {
    session.clear();
}

/// Updates the signed-in user's profile and refreshes the `user_data`
/// cookie. When the backend echoes no usable record, the submitted values are
/// merged into the current one.
#[instrument(skip_all)]
pub async fn handle_update_profile<S: SessionStore>(
    api: &ApiClient,
    session: &mut S,
    data: &ProfileData,
) -> ActionResult<UserRecord> {
    let Some(current) = session.user().user().cloned() else {
        return ActionResult::failure(UPDATE_PROFILE.failure);
    };

    let request = ProfileRequest::from(data);
    let result: ActionResult<UserRecord> = ActionResult::settle(
        client::update_profile(api, &request, session.token()).await,
        UPDATE_PROFILE,
    )
    .decode_data();
    if !result.success {
        return result;
    }

    let updated = result.data.unwrap_or_else(|| UserRecord {
        name: request.name,
        email: request.email,
        username: request.username,
        ..current
    });

    if let Err(err) = session.refresh_user(updated.clone()) {
        error!("Failed to refresh session user: {err}");
        return ActionResult::failure(UPDATE_PROFILE.error);
    }

    ActionResult::ok(UPDATE_PROFILE.success, Some(updated))
}

#[instrument(skip_all)]
pub async fn handle_request_password_reset(
    api: &ApiClient,
    data: &RequestResetData,
) -> ActionResult<()> {
    ActionResult::settle(
        client::request_password_reset(api, &data.email).await,
        REQUEST_PASSWORD_RESET,
    )
    .map(|_| ())
}

#[instrument(skip_all)]
pub async fn handle_reset_password(
    api: &ApiClient,
    token: &str,
    data: &ResetPasswordData,
) -> ActionResult<()> {
    ActionResult::settle(
        client::reset_password(api, token, &data.password).await,
        RESET_PASSWORD,
    )
    .map(|_| ())
}
