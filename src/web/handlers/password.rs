//! Password reset: asking for a link, then redeeming its token.

use crate::{
    api::ApiClient,
    features::auth::{
        actions::{handle_request_password_reset, handle_reset_password},
        guards::LOGIN_PATH,
        schema::{RequestResetData, ResetPasswordData},
    },
    web::{
        handlers::invalid,
        views::{auth as view, Flash, Page, RenderError, Templates},
    },
};
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use tracing::instrument;
use url::form_urlencoded;

pub async fn request_form(State(templates): State<Templates>) -> Page {
    view::request_reset(&templates, &RequestResetData::default(), None, None)
}

#[instrument(skip_all)]
pub async fn request(
    State(api): State<ApiClient>,
    State(templates): State<Templates>,
    Form(data): Form<RequestResetData>,
) -> Result<Response, RenderError> {
    if let Err(errors) = data.check() {
        return Ok(invalid(view::request_reset(&templates, &data, Some(&errors), None)?));
    }

    let result = handle_request_password_reset(&api, &data).await;
    let page = if result.success {
        view::reset_link_sent(&templates, data.email.trim())?
    } else {
        view::request_reset(&templates, &data, None, Some(Flash::Error(&result.message)))?
    };
    Ok(page.into_response())
}

pub async fn reset_form(State(templates): State<Templates>, Path(token): Path<String>) -> Page {
    view::reset_password(&templates, &form_action(&token), None, None)
}

#[instrument(skip_all)]
pub async fn reset(
    State(api): State<ApiClient>,
    State(templates): State<Templates>,
    Path(token): Path<String>,
    Form(data): Form<ResetPasswordData>,
) -> Result<Response, RenderError> {
    let action = form_action(&token);
    if let Err(errors) = data.check() {
        return Ok(invalid(view::reset_password(&templates, &action, Some(&errors), None)?));
    }

    let result = handle_reset_password(&api, &token, &data).await;
    if result.success {
        Ok(Redirect::to(&format!("{LOGIN_PATH}?notice=password-reset")).into_response())
    } else {
        let page =
            view::reset_password(&templates, &action, None, Some(Flash::Error(&result.message)))?;
        Ok(page.into_response())
    }
}

fn form_action(token: &str) -> String {
    let token: String = form_urlencoded::byte_serialize(token.as_bytes()).collect();
    format!("/reset-password/{}", token.replace('+', "%20"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_encoded_into_the_action() {
        assert_eq!(form_action("abc123"), "/reset-password/abc123");
        assert_eq!(form_action("a b/c"), "/reset-password/a%20b%2Fc");
    }
}
