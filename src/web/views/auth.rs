//! Sign-in, sign-up, password reset, home and profile pages.

use crate::{
    features::{
        auth::schema::{ProfileData, RegisterData, RequestResetData},
        forms::FieldErrors,
        users::types::UserRecord,
    },
    web::views::{context, form::FormView, Flash, Page, Templates},
};

/// Query-string notices understood by the login page.
#[must_use]
pub fn login_notice(notice: Option<&str>) -> Option<&'static str> {
    match notice? {
        "registered" => Some("Registration successful. Please sign in."),
        "password-reset" => Some("Password reset successfully. Please sign in."),
        "logged-out" => Some("You have been signed out."),
        _ => None,
    }
}

/// # Errors
/// Returns an error if the template fails to render.
pub fn login(
    templates: &Templates,
    email: &str,
    errors: Option<&FieldErrors>,
    flash: Option<Flash<'_>>,
) -> Page {
    let form = FormView::new("/login", errors, "Sign in")
        .input("email", "Email", "email", email)
        .input("password", "Password", "password", "");
    let mut context = context("Sign in", None, flash);
    context.insert("form", &form);
    templates.render("login.html", &context)
}

/// # Errors
/// Returns an error if the template fails to render.
pub fn register(
    templates: &Templates,
    data: &RegisterData,
    errors: Option<&FieldErrors>,
    flash: Option<Flash<'_>>,
) -> Page {
    let form = FormView::new("/register", errors, "Create account")
        .input("name", "Name", "text", &data.name)
        .input("email", "Email", "email", &data.email)
        .input("password", "Password", "password", "")
        .input("confirm_password", "Confirm password", "password", "");
    let mut context = context("Create account", None, flash);
    context.insert("form", &form);
    templates.render("register.html", &context)
}

/// # Errors
/// Returns an error if the template fails to render.
pub fn request_reset(
    templates: &Templates,
    data: &RequestResetData,
    errors: Option<&FieldErrors>,
    flash: Option<Flash<'_>>,
) -> Page {
    let form = FormView::new("/request-reset-password", errors, "Send reset link")
        .input("email", "Email", "email", &data.email);
    let mut context = context("Reset password", None, flash);
    context.insert("form", &form);
    templates.render("request_reset.html", &context)
}

/// # Errors
/// Returns an error if the template fails to render.
pub fn reset_link_sent(templates: &Templates, email: &str) -> Page {
    let mut context = context("Check your inbox", None, Some(Flash::Info("Reset link sent")));
    context.insert("email", email);
    templates.render("reset_link_sent.html", &context)
}

/// `action` is the already-encoded path of the form, token included.
///
/// # Errors
/// Returns an error if the template fails to render.
pub fn reset_password(
    templates: &Templates,
    action: &str,
    errors: Option<&FieldErrors>,
    flash: Option<Flash<'_>>,
) -> Page {
    let form = FormView::new(action, errors, "Reset password")
        .input("password", "New password", "password", "")
        .input("confirm_password", "Confirm password", "password", "");
    let mut context = context("Choose a new password", None, flash);
    context.insert("form", &form);
    templates.render("reset_password.html", &context)
}

/// # Errors
/// Returns an error if the template fails to render.
pub fn home(templates: &Templates, viewer: Option<&UserRecord>) -> Page {
    templates.render("home.html", &context("Home", viewer, None))
}

/// # Errors
/// Returns an error if the template fails to render.
pub fn profile(
    templates: &Templates,
    viewer: &UserRecord,
    data: &ProfileData,
    errors: Option<&FieldErrors>,
    flash: Option<Flash<'_>>,
) -> Page {
    let form = FormView::new("/user/profile", errors, "Save profile")
        .input("name", "Name", "text", &data.name)
        .input("email", "Email", "email", &data.email)
        .input("username", "Username", "text", &data.username);
    let mut context = context("Your profile", Some(viewer), flash);
    context.insert("role", viewer.role.as_str());
    context.insert("form", &form);
    templates.render("profile.html", &context)
}

/// Profile form prefilled from the session user.
#[must_use]
pub fn profile_data(user: &UserRecord) -> ProfileData {
    ProfileData {
        name: user.name.clone(),
        email: user.email.clone(),
        username: user.username.clone().unwrap_or_default(),
    }
}
