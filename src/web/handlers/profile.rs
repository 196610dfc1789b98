//! The signed-in user's own profile.

use crate::{
    api::ApiClient,
    features::auth::{
        actions::handle_update_profile, guards::CurrentUser, schema::ProfileData,
        session::CookieSession,
    },
    web::{
        handlers::invalid,
        views::{auth as view, Flash, Page, RenderError, Templates},
    },
};
use axum::{
    extract::{Extension, State},
    response::{IntoResponse, Response},
    Form,
};
use tracing::instrument;

pub async fn show(
    State(templates): State<Templates>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Page {
    view::profile(&templates, &user, &view::profile_data(&user), None, None)
}

/// Saves the profile and refreshes the `user_data` cookie on success.
#[instrument(skip_all)]
pub async fn update(
    State(api): State<ApiClient>,
    State(templates): State<Templates>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    mut session: CookieSession,
    Form(data): Form<ProfileData>,
) -> Result<Response, RenderError> {
    if let Err(errors) = data.check() {
        return Ok(invalid(view::profile(&templates, &user, &data, Some(&errors), None)?));
    }

    let result = handle_update_profile(&api, &mut session, &data).await;
    match result.data {
        Some(updated) if result.success => {
            let page = view::profile(
                &templates,
                &updated,
                &view::profile_data(&updated),
                None,
                Some(Flash::Info(&result.message)),
            )?;
            Ok((session, page).into_response())
        }
        _ => {
            let page =
                view::profile(&templates, &user, &data, None, Some(Flash::Error(&result.message)))?;
            Ok(page.into_response())
        }
    }
}
