//! Route guards. `authorize` is the whole decision; the middleware functions
//! apply it to a request before the protected handler runs, so a rejected
//! visitor never receives protected markup.
//!
//! UX-only guard: the cookie is client-controlled, real access control must
//! live on the API.

use crate::features::{
    auth::session::{CookieSession, SessionStore, UserCookie},
    users::types::{Role, UserRecord},
};
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/home";
pub const ADMIN_LANDING_PATH: &str = "/admin/users";
pub const USER_LANDING_PATH: &str = "/user/profile";

/// What a route demands from the visitor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requirement {
    /// Any decodable session.
    Session,
    Role(Role),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    /// No usable session; send the visitor to the login page.
    Login,
    /// Signed in without the required role.
    Redirect(&'static str),
    Allow(UserRecord),
}

/// Signed-in user attached to requests that passed a guard.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub UserRecord);

/// Decides the outcome for a decoded `user_data` cookie. Missing and invalid
/// cookies are treated the same.
#[must_use]
pub fn authorize(cookie: &UserCookie, requirement: Requirement) -> GuardOutcome {
    let Some(user) = cookie.user() else {
        return GuardOutcome::Login;
    };

    match requirement {
        Requirement::Session => GuardOutcome::Allow(user.clone()),
        Requirement::Role(role) if user.role == role && role != Role::Unknown => {
            GuardOutcome::Allow(user.clone())
        }
        Requirement::Role(_) => GuardOutcome::Redirect(HOME_PATH),
    }
}

/// Where a freshly signed-in user lands.
#[must_use]
pub const fn landing_page(role: Role) -> &'static str {
    match role {
        Role::Admin => ADMIN_LANDING_PATH,
        Role::User => USER_LANDING_PATH,
        Role::Unknown => HOME_PATH,
    }
}

/// Middleware for `/admin/**`.
pub async fn require_admin(session: CookieSession, request: Request, next: Next) -> Response {
    guard(&session, Requirement::Role(Role::Admin), request, next).await
}

/// Middleware for pages that only need a signed-in visitor.
pub async fn require_session(session: CookieSession, request: Request, next: Next) -> Response {
    guard(&session, Requirement::Session, request, next).await
}

async fn guard(
    session: &CookieSession,
    requirement: Requirement,
    mut request: Request,
    next: Next,
) -> Response {
    match authorize(session.user(), requirement) {
        GuardOutcome::Allow(user) => {
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        GuardOutcome::Login => {
            debug!(path = %request.uri().path(), "no session, redirecting to login");
            Redirect::to(LOGIN_PATH).into_response()
        }
        GuardOutcome::Redirect(target) => {
            debug!(path = %request.uri().path(), ?requirement, "insufficient role");
            Redirect::to(target).into_response()
        }
    }
}
