use crate::{
    features::auth::{
        guards::{landing_page, CurrentUser},
        session::{CookieSession, SessionStore},
    },
    web::views::{self, auth as view, Page, RenderError, Templates},
};
use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

pub async fn root() -> Redirect {
    Redirect::to("/dashboard")
}

pub async fn home(State(templates): State<Templates>, session: CookieSession) -> Page {
    view::home(&templates, session.user().user())
}

/// Sends a signed-in visitor to the landing page of their role.
pub async fn dashboard(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Redirect {
    Redirect::to(landing_page(user.role))
}

pub async fn not_found(
    State(templates): State<Templates>,
    session: CookieSession,
) -> Result<Response, RenderError> {
    let page = views::error_page(
        &templates,
        "Not found",
        session.user().user(),
        "The page you are looking for does not exist.",
        "/home",
    )?;
    Ok((StatusCode::NOT_FOUND, page).into_response())
}
