//! Sign-in, sign-up and sign-out.

use crate::{
    api::ApiClient,
    features::{
        auth::{
            actions::{handle_login, handle_logout, handle_register},
            guards::{landing_page, LOGIN_PATH},
            schema::{LoginData, RegisterData},
            session::CookieSession,
        },
        users::types::Role,
    },
    web::{
        handlers::invalid,
        views::{auth as view, Flash, Page, RenderError, Templates},
    },
};
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::instrument;

#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

pub async fn login_form(
    State(templates): State<Templates>,
    Query(query): Query<NoticeQuery>,
) -> Page {
    let flash = view::login_notice(query.notice.as_deref()).map(Flash::Info);
    view::login(&templates, "", None, flash)
}

/// Validates, signs in and redirects to the role landing page. Cookies are
/// only emitted on success.
#[instrument(skip_all)]
pub async fn login(
    State(api): State<ApiClient>,
    State(templates): State<Templates>,
    mut session: CookieSession,
    Form(data): Form<LoginData>,
) -> Result<Response, RenderError> {
    if let Err(errors) = data.check() {
        return Ok(invalid(view::login(&templates, &data.email, Some(&errors), None)?));
    }

    let result = handle_login(&api, &mut session, &data).await;
    if !result.success {
        let page = view::login(&templates, &data.email, None, Some(Flash::Error(&result.message)))?;
        return Ok(page.into_response());
    }

    let role = result.data.map_or(Role::Unknown, |user| user.role);
    Ok((session, Redirect::to(landing_page(role))).into_response())
}

pub async fn register_form(State(templates): State<Templates>) -> Page {
    view::register(&templates, &RegisterData::default(), None, None)
}

#[instrument(skip_all)]
pub async fn register(
    State(api): State<ApiClient>,
    State(templates): State<Templates>,
    Form(data): Form<RegisterData>,
) -> Result<Response, RenderError> {
    if let Err(errors) = data.check() {
        return Ok(invalid(view::register(&templates, &data, Some(&errors), None)?));
    }

    let result = handle_register(&api, &data).await;
    if result.success {
        Ok(Redirect::to(&format!("{LOGIN_PATH}?notice=registered")).into_response())
    } else {
        let page = view::register(&templates, &data, None, Some(Flash::Error(&result.message)))?;
        Ok(page.into_response())
    }
}

pub async fn logout(mut session: CookieSession) -> Response {
    handle_logout(&mut session);
    (
        session,
        Redirect::to(&format!("{LOGIN_PATH}?notice=logged-out")),
    )
        .into_response()
}
