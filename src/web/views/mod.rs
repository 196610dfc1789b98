//! HTML rendering. Pages are Tera templates compiled into the binary; their
//! names end in `.html`, so every value is autoescaped.

pub mod auth;
pub mod form;
pub mod users;

use crate::features::users::types::{Role, UserRecord};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;
use tera::{Context, Tera};
use tracing::error;

const TEMPLATES: [(&str, &str); 15] = [
    ("base.html", include_str!("../../../templates/base.html")),
    ("flash.html", include_str!("../../../templates/flash.html")),
    ("form.html", include_str!("../../../templates/form.html")),
    ("error.html", include_str!("../../../templates/error.html")),
    ("home.html", include_str!("../../../templates/home.html")),
    ("login.html", include_str!("../../../templates/login.html")),
    ("register.html", include_str!("../../../templates/register.html")),
    ("request_reset.html", include_str!("../../../templates/request_reset.html")),
    ("reset_link_sent.html", include_str!("../../../templates/reset_link_sent.html")),
    ("reset_password.html", include_str!("../../../templates/reset_password.html")),
    ("profile.html", include_str!("../../../templates/profile.html")),
    ("users/list.html", include_str!("../../../templates/users/list.html")),
    ("users/detail.html", include_str!("../../../templates/users/detail.html")),
    ("users/create.html", include_str!("../../../templates/users/create.html")),
    ("users/edit.html", include_str!("../../../templates/users/edit.html")),
];

/// Compiled page templates, shared by every request.
#[derive(Clone, Debug)]
pub struct Templates {
    tera: Arc<Tera>,
}

impl Templates {
    /// # Errors
    /// Returns an error if a template does not parse.
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    fn render(&self, name: &str, context: &Context) -> Page {
        self.tera
            .render(name, context)
            .map(Html)
            .map_err(RenderError)
    }
}

/// A template failed to render; answered with a bare 500.
#[derive(Debug)]
pub struct RenderError(tera::Error);

impl IntoResponse for RenderError {
    fn into_response(self) -> Response {
        error!("Failed to render page: {:?}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

pub type Page = Result<Html<String>, RenderError>;

/// Inline message shown above a form or a page body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum Flash<'a> {
    Info(&'a str),
    Error(&'a str),
}

#[derive(Serialize)]
struct Viewer<'a> {
    name: &'a str,
    admin: bool,
}

/// Values every page uses: the title, who is signed in (for the navigation)
/// and the flash line.
fn context(title: &str, viewer: Option<&UserRecord>, flash: Option<Flash<'_>>) -> Context {
    let mut context = Context::new();
    context.insert("app", env!("CARGO_PKG_NAME"));
    context.insert("title", title);
    context.insert(
        "viewer",
        &viewer.map(|user| Viewer {
            name: display_name(user),
            admin: user.role == Role::Admin,
        }),
    );
    context.insert("flash", &flash);
    context
}

/// Page shown when data behind a page could not be loaded.
///
/// # Errors
/// Returns an error if the template fails to render.
pub fn error_page(
    templates: &Templates,
    title: &str,
    viewer: Option<&UserRecord>,
    message: &str,
    back: &str,
) -> Page {
    let mut context = context(title, viewer, Some(Flash::Error(message)));
    context.insert("back", back);
    templates.render("error.html", &context)
}

/// Falls back to the email when the backend sent no name.
#[must_use]
pub fn display_name(user: &UserRecord) -> &str {
    if user.name.trim().is_empty() {
        &user.email
    } else {
        &user.name
    }
}

#[cfg(test)]
pub(crate) fn templates() -> Templates {
    Templates::new().expect("templates")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::user;

    #[test]
    fn every_template_parses() {
        let templates = templates();
        for (name, _) in TEMPLATES {
            assert!(
                templates.tera.get_template_names().any(|known| known == name),
                "{name}"
            );
        }
    }

    #[test]
    fn navigation_follows_viewer() {
        let templates = templates();

        let Html(anonymous) = error_page(&templates, "Oops", None, "gone", "/home").expect("page");
        assert!(anonymous.contains(r#"href="/login""#));
        assert!(!anonymous.contains("/logout"));

        let member = user(Role::User);
        let Html(html) = error_page(&templates, "Oops", Some(&member), "gone", "/home").expect("page");
        assert!(html.contains("/logout"));
        assert!(html.contains("Ada Lovelace"));
        assert!(!html.contains(r#"href="/admin/users""#));

        let admin = user(Role::Admin);
        let Html(html) = error_page(&templates, "Oops", Some(&admin), "gone", "/home").expect("page");
        assert!(html.contains(r#"href="/admin/users""#));
    }

    #[test]
    fn values_are_escaped() {
        let Html(html) =
            error_page(&templates(), "<b>", None, r#"<script>alert("x")</script>"#, "/home")
                .expect("page");
        assert!(html.contains("<h1>&lt;b&gt;</h1>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"<p class="flash error" role="alert">&lt;script&gt;"#));
    }

    #[test]
    fn flash_serializes_with_its_kind() {
        let json = serde_json::to_value(Flash::Info("saved")).expect("json");
        assert_eq!(json, serde_json::json!({"kind": "info", "message": "saved"}));
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let mut record = user(Role::User);
        assert_eq!(display_name(&record), "Ada Lovelace");
        record.name = " ".to_string();
        assert_eq!(display_name(&record), "ada@example.com");
    }
}
