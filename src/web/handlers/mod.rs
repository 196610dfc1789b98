pub mod admin_users;
pub mod auth;
pub mod health;
pub mod pages;
pub mod password;
pub mod profile;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Re-rendered form after local validation failed.
fn invalid(html: Html<String>) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, html).into_response()
}
