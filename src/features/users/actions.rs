//! Admin user actions. The caller passes the session token, which is forwarded
//! to the backend as a bearer credential.

use crate::{
    api::{ApiClient, Pagination},
    features::{
        action::{ActionMessages, ActionResult},
        users::{
            client,
            schema::{CreateUserData, EditUserData},
            types::{ImageUpload, ListQuery, Role, UpdateUserRequest, UserPage, UserRecord},
        },
    },
};
use secrecy::SecretString;
use tracing::instrument;

pub const CREATE_USER: ActionMessages = ActionMessages {
    success: "User created successfully",
    failure: "User creation failed",
    error: "User creation action failed",
};

pub const LIST_USERS: ActionMessages = ActionMessages {
    success: "Users loaded",
    failure: "Failed to load users",
    error: "Load users action failed",
};

pub const GET_USER: ActionMessages = ActionMessages {
    success: "User loaded",
    failure: "Failed to load user",
    error: "Load user action failed",
};

pub const UPDATE_USER: ActionMessages = ActionMessages {
    success: "User updated successfully",
    failure: "Failed to update user",
    error: "Update user action failed",
};

pub const DELETE_USER: ActionMessages = ActionMessages {
    success: "User deleted successfully",
    failure: "Failed to delete user",
    error: "Delete user action failed",
};

#[instrument(skip_all)]
pub async fn handle_create_user(
    api: &ApiClient,
    bearer: Option<&SecretString>,
    data: &CreateUserData,
    image: Option<ImageUpload>,
) -> ActionResult<UserRecord> {
    ActionResult::settle(
        client::create_user(api, data, image, bearer).await,
        CREATE_USER,
    )
    .decode_data()
}

/// Loads one page of users. A response without pagination is treated as a
/// single page holding everything returned.
#[instrument(skip(api, bearer))]
pub async fn handle_get_all_users(
    api: &ApiClient,
    bearer: Option<&SecretString>,
    query: &ListQuery,
) -> ActionResult<UserPage> {
    let envelope = match client::list_users(api, query, bearer).await {
        Ok(envelope) => envelope,
        Err(err) => return ActionResult::from_error(&err, LIST_USERS),
    };

    let pagination = envelope.pagination.clone();
    let mut result = ActionResult::from_envelope(envelope, LIST_USERS).map(|users| {
        let pagination = pagination.unwrap_or_else(|| single_page(query, users.len()));
        UserPage { users, pagination }
    });
    // A successful response without a `data` array is an empty page.
    if result.success && result.data.is_none() {
        result.data = Some(UserPage {
            users: Vec::new(),
            pagination: single_page(query, 0),
        });
    }
    result
}

#[instrument(skip(api, bearer))]
pub async fn handle_get_one_user(
    api: &ApiClient,
    bearer: Option<&SecretString>,
    id: &str,
) -> ActionResult<UserRecord> {
    let result = ActionResult::settle(client::get_user(api, id, bearer).await, GET_USER);
    if result.success && result.data.is_none() {
        return ActionResult::failure(GET_USER.failure);
    }
    result
}

#[instrument(skip(api, bearer, data))]
pub async fn handle_update_user(
    api: &ApiClient,
    bearer: Option<&SecretString>,
    id: &str,
    data: &EditUserData,
) -> ActionResult<UserRecord> {
    let request = UpdateUserRequest {
        name: data.name.trim().to_string(),
        email: data.email.trim().to_string(),
        role: Role::assignable(&data.role).unwrap_or_default(),
    };
    ActionResult::settle(
        client::update_user(api, id, &request, bearer).await,
        UPDATE_USER,
    )
    .decode_data()
}

#[instrument(skip(api, bearer))]
pub async fn handle_delete_user(
    api: &ApiClient,
    bearer: Option<&SecretString>,
    id: &str,
) -> ActionResult<()> {
    ActionResult::settle(client::delete_user(api, id, bearer).await, DELETE_USER).map(|_| ())
}

fn single_page(query: &ListQuery, count: usize) -> Pagination {
    Pagination {
        page: 1,
        size: query.size,
        total: count as u64,
        total_pages: 1,
    }
}
